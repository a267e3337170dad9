pub mod canvas;
pub mod contour;
pub mod figure;
pub mod grid;
pub mod reference;

pub use contour::{contour_segments, Segment};
pub use figure::DecisionSurfaceRenderer;
pub use grid::{linspace, Grid};
pub use reference::ReferenceDensity;
