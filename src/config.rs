/*
 * Responsibility
 * - Load settings from the environment (.env supported via dotenvy)
 * - Validate them up front (startup fails on missing / invalid values)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::services::access::Token;
use crate::services::identity::SessionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Session store (identity provider backend). None => in-memory store.
    pub session_store_url: Option<String>,
    pub session_key_prefix: String,
    // Development-only seed for the in-memory store
    pub dev_sessions: Vec<(Token, SessionRecord)>,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = parse_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let session_store_url =
            session_store_url(app_env, std::env::var("SESSION_STORE_URL").ok())?;

        let session_key_prefix =
            std::env::var("SESSION_KEY_PREFIX").unwrap_or_else(|_| "session".to_string());
        if session_key_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("SESSION_KEY_PREFIX"));
        }

        let dev_sessions = match std::env::var("DEV_SESSIONS") {
            Ok(raw) if !raw.trim().is_empty() => {
                // Never let hard-coded tokens into production.
                if app_env.is_production() {
                    return Err(ConfigError::Invalid("DEV_SESSIONS"));
                }
                parse_dev_sessions(&raw)?
            }
            _ => Vec::new(),
        };

        let request_timeout = Duration::from_secs(parse_positive(
            "REQUEST_TIMEOUT_SECONDS",
            std::env::var("REQUEST_TIMEOUT_SECONDS").ok(),
            30,
        )?);

        let request_body_limit_bytes = parse_positive(
            "REQUEST_BODY_LIMIT_BYTES",
            std::env::var("REQUEST_BODY_LIMIT_BYTES").ok(),
            1024 * 1024,
        )?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            session_store_url,
            session_key_prefix,
            dev_sessions,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

// Production has no in-memory fallback: every token would be rejected.
fn session_store_url(app_env: AppEnv, raw: Option<String>) -> Result<Option<String>, ConfigError> {
    let url = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    if url.is_none() && app_env.is_production() {
        return Err(ConfigError::Missing("SESSION_STORE_URL"));
    }
    Ok(url)
}

// Unset => default; set but unparsable or zero => error.
fn parse_positive<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: T = raw.trim().parse().map_err(|_| ConfigError::Invalid(key))?;
    if value == T::default() {
        return Err(ConfigError::Invalid(key));
    }
    Ok(value)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parses `token=<uuid>:<role>|<role>;token2=<uuid>` into session seeds.
/// The role list (and its leading `:`) may be omitted.
pub fn parse_dev_sessions(raw: &str) -> Result<Vec<(Token, SessionRecord)>, ConfigError> {
    let mut sessions = Vec::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (token, rest) = entry
            .split_once('=')
            .ok_or(ConfigError::Invalid("DEV_SESSIONS"))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Invalid("DEV_SESSIONS"));
        }

        let (user_id, roles) = rest.split_once(':').unwrap_or((rest, ""));
        let user_id =
            Uuid::parse_str(user_id.trim()).map_err(|_| ConfigError::Invalid("DEV_SESSIONS"))?;
        let roles = roles
            .split('|')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        sessions.push((Token::new(token), SessionRecord::new(user_id, roles)));
    }

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "6f1c2a3e-0d4b-4c8e-9a51-2b7f3d9e1a00";
    const BOB: &str = "0b9e4d2c-7a61-4f3e-8c12-5d6e7f8a9b10";

    #[test]
    fn parses_sessions_with_and_without_roles() {
        let raw = format!("alice-token={ALICE}:admin|auditor; bob-token={BOB}");
        let sessions = parse_dev_sessions(&raw).unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].0, Token::new("alice-token"));
        assert_eq!(sessions[0].1.roles, vec!["admin", "auditor"]);
        assert_eq!(sessions[1].0, Token::new("bob-token"));
        assert!(sessions[1].1.roles.is_empty());
    }

    #[test]
    fn rejects_bad_uuid() {
        assert_eq!(
            parse_dev_sessions("t=not-a-uuid:admin").unwrap_err(),
            ConfigError::Invalid("DEV_SESSIONS")
        );
    }

    #[test]
    fn rejects_entry_without_token() {
        let raw = format!("={ALICE}");
        assert!(parse_dev_sessions(&raw).is_err());
        assert!(parse_dev_sessions("just-a-token").is_err());
    }

    #[test]
    fn empty_input_is_no_sessions() {
        assert!(parse_dev_sessions(" ; ").unwrap().is_empty());
    }

    #[test]
    fn app_env_parsing() {
        assert!(AppEnv::parse("PROD").is_production());
        assert!(AppEnv::parse("production").is_production());
        assert!(!AppEnv::parse("staging").is_production());
    }

    #[test]
    fn unset_limits_use_defaults() {
        assert_eq!(parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", None, 30), Ok(30));
        assert_eq!(
            parse_positive::<usize>("REQUEST_BODY_LIMIT_BYTES", None, 1024),
            Ok(1024)
        );
    }

    #[test]
    fn set_limits_are_parsed() {
        assert_eq!(
            parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", Some(" 5 ".into()), 30),
            Ok(5)
        );
    }

    #[test]
    fn invalid_limits_fail_instead_of_defaulting() {
        assert_eq!(
            parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", Some("thirty".into()), 30),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        );
        assert_eq!(
            parse_positive::<usize>("REQUEST_BODY_LIMIT_BYTES", Some("-1".into()), 1024),
            Err(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))
        );
        assert_eq!(
            parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", Some(String::new()), 30),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        );
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert_eq!(
            parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", Some("0".into()), 30),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        );
        assert_eq!(
            parse_positive::<usize>("REQUEST_BODY_LIMIT_BYTES", Some("0".into()), 1024),
            Err(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))
        );
    }

    #[test]
    fn production_requires_a_session_store() {
        assert_eq!(
            session_store_url(AppEnv::Production, None),
            Err(ConfigError::Missing("SESSION_STORE_URL"))
        );
        assert_eq!(
            session_store_url(AppEnv::Production, Some("  ".into())),
            Err(ConfigError::Missing("SESSION_STORE_URL"))
        );
        assert_eq!(
            session_store_url(AppEnv::Production, Some("redis://cache:6379".into())),
            Ok(Some("redis://cache:6379".to_string()))
        );
        assert_eq!(session_store_url(AppEnv::Development, None), Ok(None));
    }

    #[test]
    fn list_parsing_drops_blanks() {
        assert_eq!(
            parse_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
