use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{
    delete_user, get_user, list_users, register, update_user,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
