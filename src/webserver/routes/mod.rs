use std::sync::Arc;

use axum::Router;

use crate::webserver::state::AppState;

pub mod analysis;
pub mod engines;
pub mod market;
pub mod products;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(engines::routes())
        .merge(products::routes())
        .merge(analysis::routes())
        .merge(market::routes())
        .with_state(state)
}
