pub mod analysis;
pub mod cache;

pub use analysis::clusters::*;
pub use analysis::statistics::*;
pub use cache::*;
