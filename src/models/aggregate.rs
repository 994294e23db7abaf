//! Running per-station statistics.

/// Min/mean/max statistics for one station, in tenths of a degree.
///
/// The default value is the identity of [`merge`](Self::merge): sentinel
/// extremes and a zero sum, so folding records into it is equivalent to
/// building the aggregate from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationAggregate {
    pub min: i32,
    pub max: i32,
    pub sum: i64,
    pub count: u64,
}

impl Default for StationAggregate {
    fn default() -> Self {
        Self {
            min: i32::MAX,
            max: i32::MIN,
            sum: 0,
            count: 0,
        }
    }
}

impl StationAggregate {
    /// Aggregate of a single measurement.
    pub fn of(tenths: i32) -> Self {
        Self {
            min: tenths,
            max: tenths,
            sum: i64::from(tenths),
            count: 1,
        }
    }

    /// Fold one measurement into the running statistics.
    #[inline]
    pub fn record(&mut self, tenths: i32) {
        self.min = self.min.min(tenths);
        self.max = self.max.max(tenths);
        self.sum += i64::from(tenths);
        self.count += 1;
    }

    /// Combine with statistics built from a disjoint set of records.
    ///
    /// Commutative and associative, so chunk aggregates can be merged in
    /// any order.
    pub fn merge(&mut self, other: &StationAggregate) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Arithmetic mean in tenths, rounded half away from zero.
    pub fn mean_tenths(&self) -> i32 {
        debug_assert!(self.count > 0, "mean of an empty aggregate");
        let count = self.count as i64;
        let biased = if self.sum >= 0 {
            self.sum + count / 2
        } else {
            self.sum - count / 2
        };
        (biased / count) as i32
    }
}
