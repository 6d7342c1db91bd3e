pub mod bounds;
pub mod error;
pub mod geo;
pub mod precision;
pub mod region;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use error::*;
pub use geo::*;
pub use precision::*;
pub use region::*;
