pub mod chunker;
pub mod mapped_file;
pub mod measurement_reader;

pub use chunker::Chunker;
pub use mapped_file::MappedFile;
pub use measurement_reader::{Measurement, MeasurementIterator};
