pub mod clusters;
pub mod statistics;
