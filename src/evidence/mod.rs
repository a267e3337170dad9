pub mod approximator;
pub mod fixed_point;
pub mod hessian;

pub use approximator::{EvidenceApproximator, EvidenceReport};
pub use fixed_point::{alpha_fixed_point, effective_parameters, FixedPoint};
pub use hessian::{finite_difference_hessian, finite_difference_jacobian, skipped_coordinates, StepPolicy};
