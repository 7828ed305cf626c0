mod helpers;
mod oauth2;
mod resend_verification;
mod signin;
mod signup;
mod verify_email;
