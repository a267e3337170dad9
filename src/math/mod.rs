pub mod matrix;
pub mod eigen;
pub mod gaussian;

pub use matrix::Matrix;
pub use gaussian::Gaussian2;
