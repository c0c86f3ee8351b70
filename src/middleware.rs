//! Authentication Middleware
//!
//! Request-pipeline glue for the calling application. Both layers take the
//! [`AuthService`] from router state via `axum::middleware::from_fn_with_state`;
//! secrets are never read from the environment at request time.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/posts", post(create_post))
//!     .layer(axum::middleware::from_fn_with_state(
//!         auth.clone(),
//!         warbler_auth::middleware::require_user,
//!     ))
//!     .with_state(state);
//! ```

use crate::error::AuthError;
use crate::extract::AuthUser;
use crate::service::AuthService;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Require a valid bearer token.
///
/// On success the caller's identity is stored in request extensions, where the
/// [`AuthUser`] extractor picks it up.
pub async fn require_user(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user_id = auth.authenticate_bearer(req.headers())?;

    req.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(req).await)
}

/// Require the webhook shared key.
///
/// Used exclusively on the trusted webhook route; grants no user identity.
pub async fn require_webhook_key(
    State(auth): State<Arc<AuthService>>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    auth.authenticate_webhook(req.headers())?;
    Ok(next.run(req).await)
}
