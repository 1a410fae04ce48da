use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::{info, LevelFilter};
use std::fmt;
use std::str::FromStr;

/// Default Groq API base URL used when `GROQ_BASE_URL` is not set.
/// Groq exposes an OpenAI-compatible chat completions API.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model identifier used for summary generation.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Default MailerSend API base URL used when `MAILERSEND_BASE_URL` is not set.
pub const DEFAULT_MAILERSEND_BASE_URL: &str = "https://api.mailersend.com/v1";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The API key to use when calling the Groq chat completions API.
    #[arg(long, env)]
    groq_api_key: Option<String>,

    /// The base URL of the Groq (OpenAI-compatible) API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GROQ_BASE_URL)]
    groq_base_url: String,

    /// The model identifier to request for summary generation.
    #[arg(long, env, default_value = DEFAULT_GROQ_MODEL)]
    groq_model: String,

    /// The base URL of the MailerSend API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_MAILERSEND_BASE_URL)]
    mailersend_base_url: String,

    /// The API key to use when calling the MailerSend API.
    #[arg(long, env)]
    mailersend_api_key: Option<String>,

    /// The sender address used as the From identity on outbound email.
    #[arg(long, env)]
    smtp_user: Option<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 5000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the Groq API key, if configured.
    pub fn groq_api_key(&self) -> Option<String> {
        self.groq_api_key.clone()
    }

    pub fn set_groq_api_key(mut self, groq_api_key: Option<String>) -> Self {
        self.groq_api_key = groq_api_key;
        self
    }

    /// Returns the Groq API base URL.
    pub fn groq_base_url(&self) -> &str {
        &self.groq_base_url
    }

    pub fn set_groq_base_url(mut self, groq_base_url: String) -> Self {
        self.groq_base_url = groq_base_url;
        self
    }

    /// Returns the model identifier requested for summary generation.
    pub fn groq_model(&self) -> &str {
        &self.groq_model
    }

    /// Returns the MailerSend API base URL.
    pub fn mailersend_base_url(&self) -> &str {
        &self.mailersend_base_url
    }

    pub fn set_mailersend_base_url(mut self, mailersend_base_url: String) -> Self {
        self.mailersend_base_url = mailersend_base_url;
        self
    }

    /// Returns the MailerSend API key, if configured.
    pub fn mailersend_api_key(&self) -> Option<String> {
        self.mailersend_api_key.clone()
    }

    pub fn set_mailersend_api_key(mut self, mailersend_api_key: Option<String>) -> Self {
        self.mailersend_api_key = mailersend_api_key;
        self
    }

    /// Returns the sender address used as the From identity on outbound email.
    pub fn smtp_user(&self) -> Option<String> {
        self.smtp_user.clone()
    }

    pub fn set_smtp_user(mut self, smtp_user: Option<String>) -> Self {
        self.smtp_user = smtp_user;
        self
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn set_runtime_env(mut self, runtime_env: RustEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }

    /// Whether error responses may carry diagnostic detail (error chains).
    /// Suppressed outside of the development environment.
    pub fn diagnostics_enabled(&self) -> bool {
        self.runtime_env() == RustEnv::Development
    }

    /// Logs which provider credentials are configured, without logging values.
    pub fn log_credential_presence(&self) {
        info!(
            "Environment check: GROQ_API_KEY: {}, MAILERSEND_API_KEY: {}, SMTP_USER: {}, RUNTIME_ENV: {}",
            presence(&self.groq_api_key),
            presence(&self.mailersend_api_key),
            presence(&self.smtp_user),
            self.runtime_env,
        );
    }
}

fn presence(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "Found",
        None => "Missing",
    }
}
