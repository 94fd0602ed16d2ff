pub mod class;
pub mod sample;
pub mod samples_set;

pub use class::{OutputEncoding, SampleClass};
pub use sample::Sample;
pub use samples_set::SamplesSet;
