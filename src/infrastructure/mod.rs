pub mod content_producer;
pub mod csv;
