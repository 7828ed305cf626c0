use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use turnstile_application::{
    OAuth2Error, ResendVerificationError, SigninError, SignupError, TokenError, VerifyEmailError,
};
use turnstile_core::RepositoryError;

/// Wire shape of every error response:
/// `{"error": {"message", "code"?, "errors"?}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation Error")]
    Validation(Vec<String>),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Email not verified")]
    EmailNotVerified,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("User not found")]
    UserNotFound,
    #[error("Email already verified")]
    EmailAlreadyVerified,
    #[error("{0}")]
    Token(TokenError),
    /// The detail is logged at the boundary and never leaks to the caller.
    #[error("An error occurred. Please view logs for more details")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, errors) = match &self {
            ApiError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                Some("ERR_VALIDATION"),
                Some(
                    messages
                        .iter()
                        .map(|message| FieldError {
                            message: message.clone(),
                        })
                        .collect(),
                ),
            ),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, Some("ERR_AUTH"), None),
            ApiError::EmailNotVerified => (StatusCode::BAD_REQUEST, Some("ERR_AUTH"), None),
            ApiError::AuthenticationFailed => (StatusCode::UNAUTHORIZED, Some("ERR_AUTH"), None),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, Some("ERR_NOT_FOUND"), None),
            ApiError::EmailAlreadyVerified => (
                StatusCode::BAD_REQUEST,
                Some("ERR_EMAIL_ALREADY_VERIFIED"),
                None,
            ),
            ApiError::Token(error) => {
                let (status, code) = token_status_and_code(error);
                (status, Some(code), None)
            }
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "request failed unexpectedly");
                (StatusCode::INTERNAL_SERVER_ERROR, None, None)
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.to_string(),
                code,
                errors,
            },
        });

        (status, body).into_response()
    }
}

fn token_status_and_code(error: &TokenError) -> (StatusCode, &'static str) {
    match error {
        TokenError::Missing => (StatusCode::BAD_REQUEST, "ERR_TOKEN_REQUIRED"),
        TokenError::Malformed => (StatusCode::BAD_REQUEST, "ERR_INVALID_TOKEN"),
        TokenError::Expired => (StatusCode::UNAUTHORIZED, "ERR_TOKEN_EXPIRED"),
        TokenError::PayloadInvalid => (StatusCode::BAD_REQUEST, "ERR_INVALID_PAYLOAD"),
        TokenError::VerificationFailed => (StatusCode::BAD_REQUEST, "ERR_TOKEN_VERIFICATION"),
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ApiError::UserNotFound,
            RepositoryError::Unexpected(detail) => ApiError::Unexpected(detail),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        ApiError::Unexpected(error.to_string())
    }
}

impl From<SigninError> for ApiError {
    fn from(error: SigninError) -> Self {
        match error {
            SigninError::InvalidCredentials => ApiError::InvalidCredentials,
            SigninError::EmailNotVerified => ApiError::EmailNotVerified,
            SigninError::Credential(e) => ApiError::Unexpected(e.to_string()),
            SigninError::Repository(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::Token(e) => ApiError::Token(e),
            VerifyEmailError::UserNotFound => ApiError::UserNotFound,
            VerifyEmailError::AlreadyVerified => ApiError::EmailAlreadyVerified,
            VerifyEmailError::Repository(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<ResendVerificationError> for ApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::UserNotFound => ApiError::UserNotFound,
            ResendVerificationError::AlreadyVerified => ApiError::EmailAlreadyVerified,
            ResendVerificationError::Token(e) => ApiError::Unexpected(e.to_string()),
            ResendVerificationError::Email(e) => ApiError::Unexpected(e.to_string()),
            ResendVerificationError::Mailer(e) => ApiError::Unexpected(e.to_string()),
            ResendVerificationError::Repository(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<OAuth2Error> for ApiError {
    fn from(error: OAuth2Error) -> Self {
        match error {
            OAuth2Error::Repository(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}
