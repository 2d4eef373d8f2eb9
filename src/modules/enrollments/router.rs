use crate::modules::enrollments::controller::{
    create_enrollment, delete_enrollment, list_enrollments,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/{id}", delete(delete_enrollment))
}
