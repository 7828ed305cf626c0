pub mod mailer;
pub mod repository;
