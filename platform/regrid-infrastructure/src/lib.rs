pub mod tables;
pub mod writers;
