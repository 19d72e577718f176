pub mod table_sink;
pub mod table_source;
