use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub server_addr: String,
    pub log_filter: String,
}

impl Config {
    pub fn init() -> Config {
        dotenv().ok();
        Config {
            db_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            server_addr: env_or("SERVER_ADDR", DEFAULT_SERVER_ADDR),
            log_filter: env_or("RUST_LOG", DEFAULT_LOG_FILTER),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Config {
        Config {
            db_url: DEFAULT_DATABASE_URL.to_owned(),
            server_addr: "127.0.0.1:0".to_owned(),
            log_filter: "warn".to_owned(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        assert_eq!(env_or("MASS_ASSIGNMENT_DEMO_UNSET_KEY", "fallback"), "fallback");
    }

    #[test]
    fn test_config_uses_in_memory_database() {
        let config = Config::for_tests();
        assert_eq!(config.db_url, "sqlite::memory:");
    }
}
