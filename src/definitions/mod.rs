//! Language definitions: the data model, where it comes from, and the
//! registry that caches it

pub mod composite;
pub mod embedded;
pub mod filesystem;
pub mod manifest;
pub mod registry;
pub mod traits;
pub mod types;

pub use composite::*;
pub use embedded::*;
pub use filesystem::*;
pub use registry::*;
pub use traits::*;
pub use types::*;
