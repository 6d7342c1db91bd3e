pub mod dataset;
pub mod map_config;

pub use dataset::*;
pub use map_config::*;
