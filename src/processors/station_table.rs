use crate::models::StationAggregate;
use crate::utils::constants::EXPECTED_STATIONS;

/// Open-addressed hash table from station name to running statistics.
///
/// Linear probing over a power-of-two bucket array kept at or below 3/4
/// load. Buckets hold the precomputed 64-bit hash, a key slice borrowed
/// from the mapped input, and the aggregate inline, so the record fold is
/// one probe sequence with no pointer chasing and no per-record
/// allocation. Station names are non-empty by grammar; an empty key marks
/// a vacant bucket.
pub struct StationTable<'a> {
    buckets: Vec<Bucket<'a>>,
    mask: usize,
    len: usize,
}

#[derive(Clone, Copy)]
struct Bucket<'a> {
    hash: u64,
    station: &'a [u8],
    aggregate: StationAggregate,
}

impl<'a> Bucket<'a> {
    fn vacant() -> Self {
        Self {
            hash: 0,
            station: &[],
            aggregate: StationAggregate::default(),
        }
    }

    #[inline]
    fn is_vacant(&self) -> bool {
        self.station.is_empty()
    }
}

impl<'a> StationTable<'a> {
    /// Table pre-sized for the canonical workload's distinct stations.
    pub fn new() -> Self {
        Self::with_capacity(EXPECTED_STATIONS)
    }

    /// Table sized so `expected` distinct stations stay under the load
    /// ceiling without resizing.
    pub fn with_capacity(expected: usize) -> Self {
        let capacity = (expected.max(1) * 4 / 3 + 1).next_power_of_two();
        Self {
            buckets: vec![Bucket::vacant(); capacity],
            mask: capacity - 1,
            len: 0,
        }
    }

    /// Number of distinct stations seen.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fold one measurement into the aggregate for `station`.
    #[inline]
    pub fn record(&mut self, station: &'a [u8], tenths: i32) {
        let hash = fxhash::hash64(station);
        let mut index = (hash as usize) & self.mask;
        loop {
            let bucket = &mut self.buckets[index];
            if bucket.is_vacant() {
                *bucket = Bucket {
                    hash,
                    station,
                    aggregate: StationAggregate::of(tenths),
                };
                self.grow_if_loaded();
                return;
            }
            if bucket.hash == hash && bucket.station == station {
                bucket.aggregate.record(tenths);
                return;
            }
            index = (index + 1) & self.mask;
        }
    }

    /// Fold an already-built aggregate in; used by the merge phase.
    fn insert_aggregate(&mut self, hash: u64, station: &'a [u8], aggregate: StationAggregate) {
        let mut index = (hash as usize) & self.mask;
        loop {
            let bucket = &mut self.buckets[index];
            if bucket.is_vacant() {
                *bucket = Bucket {
                    hash,
                    station,
                    aggregate,
                };
                self.grow_if_loaded();
                return;
            }
            if bucket.hash == hash && bucket.station == station {
                bucket.aggregate.merge(&aggregate);
                return;
            }
            index = (index + 1) & self.mask;
        }
    }

    /// Pairwise merge: drains the smaller table into the larger and
    /// returns the result. Commutative and associative, so the final
    /// aggregate is independent of merge order.
    pub fn merged(mut a: StationTable<'a>, mut b: StationTable<'a>) -> StationTable<'a> {
        if a.len < b.len {
            std::mem::swap(&mut a, &mut b);
        }
        for bucket in b.buckets {
            if !bucket.is_vacant() {
                a.insert_aggregate(bucket.hash, bucket.station, bucket.aggregate);
            }
        }
        a
    }

    /// All occupied entries, in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a [u8], &StationAggregate)> + '_ {
        self.buckets
            .iter()
            .filter(|bucket| !bucket.is_vacant())
            .map(|bucket| (bucket.station, &bucket.aggregate))
    }

    /// Total records folded in across all stations.
    pub fn total_records(&self) -> u64 {
        self.entries().map(|(_, aggregate)| aggregate.count).sum()
    }

    fn grow_if_loaded(&mut self) {
        self.len += 1;
        if self.len * 4 > self.buckets.len() * 3 {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, vec![Bucket::vacant(); capacity]);
        self.mask = capacity - 1;

        for bucket in old {
            if bucket.is_vacant() {
                continue;
            }
            let mut index = (bucket.hash as usize) & self.mask;
            while !self.buckets[index].is_vacant() {
                index = (index + 1) & self.mask;
            }
            self.buckets[index] = bucket;
        }
    }
}

impl Default for StationTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}
