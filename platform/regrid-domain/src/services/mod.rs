pub mod data_quality;
pub mod grid;
pub mod initial_value;
pub mod interpolate;
pub mod resample;
pub mod step;
pub mod time_axis;
