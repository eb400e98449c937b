pub mod config;
pub mod errors;
pub mod http;
pub mod util;

pub use errors::{AppError, AppResult};
