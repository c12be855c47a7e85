//! Authentication middleware and extractor for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens, loads the
//!   account and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port to learn *who* the caller
//! is, then resolves the account row to learn *what* they may do:
//!
//! ```text
//! Request → auth_middleware → SessionValidator → ResolveCurrentUser
//!                                      ↓
//!                 injects AuthenticatedUser (role from users table)
//!                                      ↓
//!              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! Role claims, cookies or headers sent by the client are never consulted.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::ResolveCurrentUserCommand;
use crate::domain::foundation::AuthenticatedUser;

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `SessionValidator` port
/// 3. Loads (or provisions) the account and rejects disabled accounts
/// 4. On success, injects `AuthenticatedUser` into request extensions
/// 5. On missing token, continues without injecting
/// 6. On invalid token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let Some(token) = token else {
        // Handlers use RequireAuth to enforce authentication
        return next.run(request).await;
    };

    let identity = match state.sessions.validate(&token).await {
        Ok(identity) => identity,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let resolved = state
        .resolve_current_user_handler()
        .handle(ResolveCurrentUserCommand { identity })
        .await;

    match resolved {
        Ok(result) => {
            request
                .extensions_mut()
                .insert(result.account.to_authenticated());
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extractor that requires authentication.
///
/// If no user is in the request extensions (i.e., auth middleware didn't
/// resolve an account), returns 401 Unauthorized.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Xin chào, {}!", user.display_name_or_email())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHORIZED", "Authentication required")),
            )
                .into_response(),
        }
    }
}
