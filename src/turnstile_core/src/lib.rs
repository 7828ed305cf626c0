pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    social::{OAuthIdentity, SocialProfile},
    user::{NewUser, User, UserDto, UserUpdate},
};

pub use ports::{
    mailer::{MailNotification, Mailer, MailerError},
    repository::{RepositoryError, UserRepository},
};
