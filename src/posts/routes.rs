//! Router binding the post handlers to a prefix.

use axum::{routing::get, Router};

use crate::http::server::AppState;
use crate::posts::handlers::{
    create_post, delete_post, delete_post_without_id, list_posts, read_post, update_post,
    update_post_without_id,
};

/// Routes for the five post operations under `prefix` (e.g. `/posts`).
///
/// `{prefix}/` is accepted as well: GET and POST behave as on the collection,
/// PUT and DELETE are forwarded with an empty identifier.
pub fn posts_router(prefix: &str) -> Router<AppState> {
    let collection = get(list_posts).post(create_post);

    Router::new()
        .route(prefix, collection.clone())
        .route(
            &format!("{prefix}/"),
            collection
                .put(update_post_without_id)
                .delete(delete_post_without_id),
        )
        .route(
            &format!("{prefix}/{{id}}"),
            get(read_post).put(update_post).delete(delete_post),
        )
}
