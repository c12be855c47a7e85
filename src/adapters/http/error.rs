//! API error type and the JSON error body.
//!
//! Every handler returns `Result<_, ApiError>`. Application errors convert
//! into it through their `code()` and `message()`, and the status is
//! derived from the [`ErrorCode`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::tutor::TutorError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use crate::domain::payment::PaymentError;
use crate::domain::quota::QuotaError;
use crate::domain::user::UserError;

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// API error that converts application errors to HTTP responses.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: status_for(code),
            code,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthorized, "Authentication required")
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound | ErrorCode::PaymentRequestNotFound | ErrorCode::QuotaNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::InvalidStateTransition
        | ErrorCode::PendingPaymentExists
        | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            "Internal server error".to_string()
        } else {
            self.message
        };

        let body = ErrorResponse::new(self.code.to_string(), message);
        (self.status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<QuotaError> for ApiError {
    fn from(err: QuotaError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<TutorError> for ApiError {
    fn from(err: TutorError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        Self::new(code, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => Self::new(ErrorCode::Unauthorized, "Invalid token"),
            AuthError::TokenExpired => Self::new(ErrorCode::Unauthorized, "Token expired"),
            AuthError::UserNotFound => Self::new(ErrorCode::Unauthorized, "Unknown account"),
            AuthError::AccountDisabled => Self::new(ErrorCode::Forbidden, "Account disabled"),
            AuthError::InsufficientPermissions => {
                Self::new(ErrorCode::Forbidden, "Insufficient permissions")
            }
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "auth service unavailable");
                Self::new(ErrorCode::InternalError, "Authentication service unavailable")
                    .with_status(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PaymentRequestId, UserId};
    use crate::ports::AIError;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_mapping_covers_categories() {
        assert_eq!(status_for(ErrorCode::InvalidFormat), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::PendingPaymentExists), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::QuotaExceeded), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(ErrorCode::AIProviderError), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorCode::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn quota_exceeded_renders_429_with_code() {
        let (status, body) = body_of(QuotaError::exceeded(20_000, 20_000).into()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.code, "QUOTA_EXCEEDED");
    }

    #[tokio::test]
    async fn reviewed_payment_renders_409() {
        let err: ApiError = PaymentError::invalid_state("approved", "approve").into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "INVALID_STATE_TRANSITION");
    }

    #[tokio::test]
    async fn infrastructure_details_are_hidden() {
        let err: ApiError = UserError::infrastructure("connection refused on 10.0.0.5").into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn ai_failure_renders_502() {
        let err: ApiError = TutorError::from(AIError::unavailable("down")).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "AI_PROVIDER_ERROR");
    }

    #[test]
    fn auth_errors_map_to_401_403_503() {
        assert_eq!(ApiError::from(AuthError::TokenExpired).status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::AccountDisabled).status, StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(AuthError::service_unavailable("db")).status,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn not_found_errors_map_to_404() {
        assert_eq!(ApiError::from(UserError::not_found(UserId::new())).status, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(PaymentError::not_found(PaymentRequestId::new())).status,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn validation_error_keeps_specific_code() {
        let err = ApiError::from(ValidationError::empty_field("topic"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, ErrorCode::EmptyField);
    }
}
