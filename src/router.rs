use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth, company, shared::AppState};

/// Builds the application router. Everything except `/login` sits behind
/// the session gate.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/home", get(auth::home))
        .route("/refresh", get(auth::refresh))
        .route("/companies", post(company::create_company))
        .route(
            "/companies/:id",
            get(company::get_company)
                .patch(company::patch_company)
                .delete(company::delete_company),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::cookie_auth,
        ));

    Router::new()
        .route("/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
