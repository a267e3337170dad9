pub mod dataset;
pub mod synthetic;

pub use dataset::Dataset;
pub use synthetic::{generate_two_class, TwoClassMixture};
