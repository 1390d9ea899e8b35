//! Hierarchical device configuration.
//!
//! [`ParameterTree`] is the pure, read-only model; [`ParameterStore`] fetches
//! groups from a device and decodes them.

mod device;
mod store;
mod tree;

pub use device::DeviceInfo;
pub use store::ParameterStore;
pub use tree::{ParamNode, ParameterTree};
