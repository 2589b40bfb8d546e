use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

pub const DEFAULT_ROUTES_FILE: &str = "data/routes.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub routes_file: PathBuf,
    pub word_bank_file: Option<PathBuf>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let routes_file = env::var("ROUTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ROUTES_FILE));

        let word_bank_file = env::var("WORD_BANK_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            routes_file,
            word_bank_file,
            service_port,
            service_host,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Routes file: {}", self.routes_file.display());
        tracing::info!("  Word bank: {}",
            self.word_bank_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "disabled".to_string()));
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env_vars() {
        unsafe {
            env::remove_var("ROUTES_FILE");
            env::remove_var("WORD_BANK_FILE");
            env::remove_var("SERVICE_PORT");
            env::remove_var("SERVICE_HOST");
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("ROUTES_FILE", "/var/lib/redirects/routes.json");
            env::set_var("WORD_BANK_FILE", "/etc/redirects/words.json");
            env::set_var("SERVICE_PORT", "8080");
            env::set_var("SERVICE_HOST", "127.0.0.1");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.routes_file, PathBuf::from("/var/lib/redirects/routes.json"));
        assert_eq!(config.word_bank_file, Some(PathBuf::from("/etc/redirects/words.json")));
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        clear_env_vars();
    }

    #[test]
    fn test_config_with_defaults() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.routes_file, PathBuf::from(DEFAULT_ROUTES_FILE));
        assert_eq!(config.word_bank_file, None);
        assert_eq!(config.service_port, 3000);
        assert_eq!(config.service_host, "0.0.0.0");
    }

    #[test]
    fn test_blank_word_bank_is_disabled() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("WORD_BANK_FILE", "  ");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.word_bank_file, None);
        clear_env_vars();
    }

    #[test]
    fn test_invalid_port() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "not-a-number");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("SERVICE_PORT"));
        clear_env_vars();
    }

    #[test]
    fn test_port_out_of_range() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env_vars();
        unsafe {
            env::set_var("SERVICE_PORT", "99999");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        clear_env_vars();
    }
}
