use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{env, fmt, str::FromStr};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime; `None` issues tokens that never expire.
    pub token_ttl_secs: Option<u64>,
    pub admin_email: String,
    pub admin_password: String,
    pub protect_writes: bool,
    pub strict_delete: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Movie catalogue API")]
pub struct Args {
    /// Host to bind to (overrides MOVIE_API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides MOVIE_API_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides MOVIE_API_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Token signing secret (overrides MOVIE_API_JWT_SECRET)
    #[arg(long)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in seconds, unset for non-expiring tokens
    /// (overrides MOVIE_API_TOKEN_TTL_SECS)
    #[arg(long)]
    pub token_ttl_secs: Option<u64>,

    /// Require a bearer token on POST/PUT/DELETE as well
    #[arg(long)]
    pub protect_writes: bool,

    /// Answer 404 when DELETE matched no row
    #[arg(long)]
    pub strict_delete: bool,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

const DEFAULT_PORT: u16 = 8000;

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("MOVIE_API_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = env_parsed("MOVIE_API_PORT", DEFAULT_PORT)?;
        let env_db = env::var("MOVIE_API_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/movies.db".into());
        let env_secret = env::var("MOVIE_API_JWT_SECRET").ok();
        let env_ttl = env_optional::<u64>("MOVIE_API_TOKEN_TTL_SECS")?;
        let env_protect = env_flag("MOVIE_API_PROTECT_WRITES")?;
        let env_strict = env_flag("MOVIE_API_STRICT_DELETE")?;

        let jwt_secret = match args.jwt_secret.or(env_secret) {
            Some(secret) if !secret.is_empty() => secret,
            _ => bail!("MOVIE_API_JWT_SECRET (or --jwt-secret) must be set to a non-empty value"),
        };

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            jwt_secret,
            token_ttl_secs: args.token_ttl_secs.or(env_ttl),
            admin_email: env::var("MOVIE_API_ADMIN_EMAIL").unwrap_or_else(|_| "daparamo".into()),
            admin_password: env::var("MOVIE_API_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "1234".into()),
            protect_writes: args.protect_writes || env_protect,
            strict_delete: args.strict_delete || env_strict,
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("protect_writes", &self.protect_writes)
            .field("strict_delete", &self.strict_delete)
            .finish()
    }
}

fn env_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn env_optional<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn env_flag(name: &str) -> Result<bool> {
    match env::var(name) {
        Ok(value) => parse_flag(&value)
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(false),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got `{}`", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" ON ").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(!parse_flag("").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = AppConfig {
            host: "127.0.0.1".into(),
            port: 8000,
            database_url: "sqlite::memory:".into(),
            jwt_secret: "super-secret".into(),
            token_ttl_secs: Some(60),
            admin_email: "daparamo".into(),
            admin_password: "1234".into(),
            protect_writes: false,
            strict_delete: false,
        };
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("1234"));
        assert_eq!(cfg.addr(), "127.0.0.1:8000");
    }
}
