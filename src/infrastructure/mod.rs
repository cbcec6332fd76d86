pub mod config;
pub mod csv;
pub mod speech;
pub mod storage;
