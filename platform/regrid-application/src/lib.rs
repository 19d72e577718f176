pub mod config;
pub mod inspection;
pub mod resampling;
mod shared;
