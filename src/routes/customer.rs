//! Customer resource routes, mounted under /customers.

use crate::handlers::customer::{
    create, delete as delete_handler, get as get_one, list, patch, replace,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route(
            "/:id",
            get(get_one)
                .put(replace)
                .patch(patch)
                .delete(delete_handler),
        )
        .with_state(state)
}
