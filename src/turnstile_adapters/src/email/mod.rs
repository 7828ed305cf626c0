pub mod console_mailer;
pub mod mock_mailer;
pub mod postmark_mailer;

pub use console_mailer::ConsoleMailer;
pub use mock_mailer::MockMailer;
pub use postmark_mailer::PostmarkMailer;
