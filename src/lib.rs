//! Veribakery: customer CRUD REST service over SQLite.

pub mod config;
pub mod error;
pub mod model;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::Settings;
pub use error::AppError;
pub use state::AppState;
pub use store::{connect, ensure_schema};
pub use routes::{common_routes, customer_routes};
pub use service::CustomerService;
