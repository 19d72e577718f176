pub mod resampled;
pub mod table;
