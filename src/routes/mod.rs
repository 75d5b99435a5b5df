//! Routers: the /customers resource and the common service routes.

mod common;
mod customer;
pub use common::common_routes;
pub use customer::customer_routes;
