use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::blogs::{
    blog_stats, create_blog, delete_blog, get_blog, list_blogs, update_blog,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/stats", get(blog_stats))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
}
