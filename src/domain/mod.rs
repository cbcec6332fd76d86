pub mod command;
pub mod database;
pub mod error;
pub mod import;
pub mod inventory;
