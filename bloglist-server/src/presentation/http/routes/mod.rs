use axum::{Router, middleware, routing::post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::{login::login, testing::reset};
use crate::presentation::http::middleware::auth::user_extractor;

pub(crate) mod blogs;
pub(crate) mod users;

pub(crate) fn router(state: AppState, enable_testing_routes: bool) -> Router<AppState> {
    let mut api = Router::new()
        .nest("/blogs", blogs::router())
        .nest("/users", users::router())
        .route("/login", post(login));

    if enable_testing_routes {
        api = api.route("/testing/reset", post(reset));
    }

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state, user_extractor))
}
