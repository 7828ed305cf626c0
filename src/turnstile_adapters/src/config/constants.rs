pub mod env {
    pub const BASE_URL_ENV_VAR: &str = "BASE_URL";
    pub const APP_HOST_ENV_VAR: &str = "APP_HOST";
    pub const APP_PORT_ENV_VAR: &str = "APP_PORT";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ALLOWED_ORIGINS";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const TOKEN_TTL_SECONDS_ENV_VAR: &str = "TOKEN_TTL_SECONDS";
    pub const ARGON2_M_COST_ENV_VAR: &str = "ARGON2_M_COST";
    pub const ARGON2_T_COST_ENV_VAR: &str = "ARGON2_T_COST";
    pub const ARGON2_P_COST_ENV_VAR: &str = "ARGON2_P_COST";
    pub const CONSOLE_LOG_EMAILS_ENV_VAR: &str = "CONSOLE_LOG_EMAILS";
    pub const POSTMARK_BASE_URL_ENV_VAR: &str = "POSTMARK_BASE_URL";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "POSTMARK_AUTH_TOKEN";
    pub const EMAIL_SENDER_ENV_VAR: &str = "EMAIL_SENDER";
    pub const EMAIL_TIMEOUT_MILLIS_ENV_VAR: &str = "EMAIL_TIMEOUT_MILLIS";
    pub const GOOGLE_USERINFO_URL_ENV_VAR: &str = "GOOGLE_USERINFO_URL";
}

pub mod defaults {
    pub const APP_HOST: &str = "0.0.0.0";
    pub const APP_PORT: u16 = 3000;
    pub const BASE_URL: &str = "http://localhost:3000";
    pub const POSTMARK_BASE_URL: &str = "https://api.postmarkapp.com";
    pub const EMAIL_TIMEOUT_MILLIS: u64 = 10_000;
    pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
}
