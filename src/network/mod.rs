pub mod network;
pub mod params;
pub mod spec;

pub use network::Network;
pub use params::{Gradients, ParamEntry, ParamRegistry, ParamRole};
pub use spec::{NetworkSpec, LayerSpec};
