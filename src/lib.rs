pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod seed;
pub mod server;

pub use error::{AppError, AppResult};
