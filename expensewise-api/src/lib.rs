pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod helpers;

pub use database::Database;
pub use error::{ApiError, ApiResult};
