pub mod aggregate;
pub mod temperature;

pub use aggregate::StationAggregate;
pub use temperature::{format_tenths, parse_tenths};
