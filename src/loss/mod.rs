pub mod bce;
pub mod sse;
pub mod objective;

pub use bce::BceLoss;
pub use sse::SseLoss;
pub use objective::Objective;
