//! CustomerService: transactional CRUD plus payload validation.

mod crud;
mod validation;
pub use crud::CustomerService;
pub use validation::{patch_fields, validate_create, validate_replace};
