pub mod cell;
pub mod file_format;
pub mod interval;
pub mod resample_config;
pub mod time_unit;
pub mod timestamp;
