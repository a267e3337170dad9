pub mod trainer;
pub mod report;
pub mod train_config;
pub mod loop_fn;

pub use trainer::gradient_step;
pub use report::{TrainOutcome, TrainReport};
pub use train_config::TrainConfig;
pub use loop_fn::train_until_converged;
