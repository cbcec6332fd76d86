pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use crate::application::{ImportInventoryUseCase, ImportOutcome};
pub use crate::domain::error::{AppError, Result};
pub use crate::infrastructure::config::Settings;
pub use crate::interfaces::http::start_server;
