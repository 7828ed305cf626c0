pub mod error;
pub mod oauth2;
pub mod resend_verification;
pub mod signin;
pub mod signup;
pub mod verify_email;

// Re-export for convenience
pub use error::ApiError;
pub use oauth2::google_callback;
pub use resend_verification::resend_verification;
pub use signin::signin;
pub use signup::signup;
pub use verify_email::verify_email;

use serde::Serialize;
use turnstile_core::UserDto;

/// Success envelope for endpoints returning the authenticated user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
