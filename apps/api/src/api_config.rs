use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::FixedOffset;
use ombaro_application::DEFAULT_BUSINESS_UTC_OFFSET_SECONDS;
use ombaro_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_FRONTEND_ORIGINS: [&str; 2] = ["http://localhost:5000", "http://localhost:3000"];

/// Storage selected for the repository ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    Postgres,
    Memory,
}

impl FromStr for DataBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::Validation(format!(
                "DATA_BACKEND must be either 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub data_backend: DataBackend,
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub access_catalog_path: Option<PathBuf>,
    pub dev_seed: bool,
    /// Timezone that decides the calendar day of attendance records.
    pub business_offset: FixedOffset,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let data_backend = env::var("DATA_BACKEND")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<DataBackend>())
            .transpose()?
            .unwrap_or(DataBackend::Postgres);

        let database_url = match data_backend {
            DataBackend::Postgres => Some(required_non_empty_env("DATABASE_URL")?),
            DataBackend::Memory if migrate_only => Some(required_non_empty_env("DATABASE_URL")?),
            DataBackend::Memory => env::var("DATABASE_URL").ok(),
        };

        let frontend_origins =
            parse_frontend_origins(env::var("FRONTEND_ORIGINS").ok().as_deref());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let access_catalog_path = env::var("ACCESS_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let dev_seed = env::var("DEV_SEED")
            .ok()
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(data_backend == DataBackend::Memory);

        let business_offset =
            parse_business_offset(env::var("BUSINESS_UTC_OFFSET_MINUTES").ok().as_deref())?;

        Ok(Self {
            migrate_only,
            data_backend,
            database_url,
            frontend_origins,
            api_host,
            api_port,
            cookie_secure,
            access_catalog_path,
            dev_seed,
            business_offset,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    pub fn database_url(&self) -> Result<&str, AppError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Merges the configured origins with the local development defaults.
fn parse_frontend_origins(configured: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = DEFAULT_FRONTEND_ORIGINS
        .iter()
        .map(|origin| (*origin).to_owned())
        .collect();

    for origin in configured
        .unwrap_or_default()
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
    {
        if !origins.iter().any(|known| known == origin) {
            origins.push(origin.to_owned());
        }
    }

    origins
}

/// Parses a UTC offset in minutes, defaulting to India Standard Time.
fn parse_business_offset(configured: Option<&str>) -> Result<FixedOffset, AppError> {
    let seconds = match configured.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse::<i32>()
            .ok()
            .and_then(|minutes| minutes.checked_mul(60))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "BUSINESS_UTC_OFFSET_MINUTES must be a whole number of minutes, got '{value}'"
                ))
            })?,
        None => DEFAULT_BUSINESS_UTC_OFFSET_SECONDS,
    };

    FixedOffset::east_opt(seconds).ok_or_else(|| {
        AppError::Validation(format!(
            "BUSINESS_UTC_OFFSET_MINUTES is out of range: {} minutes",
            seconds / 60
        ))
    })
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{DataBackend, parse_business_offset, parse_frontend_origins};

    #[test]
    fn frontend_origins_extend_local_defaults() {
        let origins = parse_frontend_origins(Some(
            " https://admin.ombaro.com/ ,http://localhost:3000,, ",
        ));

        assert_eq!(
            origins,
            vec![
                "http://localhost:5000".to_owned(),
                "http://localhost:3000".to_owned(),
                "https://admin.ombaro.com".to_owned(),
            ]
        );
    }

    #[test]
    fn frontend_origins_default_without_configuration() {
        assert_eq!(parse_frontend_origins(None).len(), 2);
    }

    #[test]
    fn business_offset_defaults_to_india_standard_time() {
        let default = parse_business_offset(None).map(|offset| offset.local_minus_utc());
        assert_eq!(default.ok(), Some(19_800));

        let configured =
            parse_business_offset(Some(" -300 ")).map(|offset| offset.local_minus_utc());
        assert_eq!(configured.ok(), Some(-18_000));

        assert!(parse_business_offset(Some("IST")).is_err());
        assert!(parse_business_offset(Some("1500")).is_err());
    }

    #[test]
    fn data_backend_parses_case_insensitively() {
        assert_eq!("Memory".parse::<DataBackend>().ok(), Some(DataBackend::Memory));
        assert_eq!(
            " postgres ".parse::<DataBackend>().ok(),
            Some(DataBackend::Postgres)
        );
        assert!("sqlite".parse::<DataBackend>().is_err());
    }
}
