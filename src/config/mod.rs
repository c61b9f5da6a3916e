//! Configuration module for the survey backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::export::DEFAULT_TEMPLATE_ROWS;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// CSV whose first rows head the export
    pub export_template: PathBuf,
    /// Where the export is written
    pub export_output: PathBuf,
    /// Number of template rows copied into the export
    pub template_rows: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("PARK_SURVEY_DB_PATH")
            .unwrap_or_else(|_| "./data/survey.sqlite".to_string())
            .into();

        let bind_addr = env::var("PARK_SURVEY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError {
                variable: "PARK_SURVEY_BIND_ADDR",
                message: e.to_string(),
            })?;

        let log_level = env::var("PARK_SURVEY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let export_template = env::var("PARK_SURVEY_EXPORT_TEMPLATE")
            .unwrap_or_else(|_| "./data/parkexample.csv".to_string())
            .into();

        let export_output = env::var("PARK_SURVEY_EXPORT_OUTPUT")
            .unwrap_or_else(|_| "./data/import.csv".to_string())
            .into();

        let template_rows = match env::var("PARK_SURVEY_TEMPLATE_ROWS") {
            Ok(value) => value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
                variable: "PARK_SURVEY_TEMPLATE_ROWS",
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_TEMPLATE_ROWS,
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            export_template,
            export_output,
            template_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "PARK_SURVEY_DB_PATH",
        "PARK_SURVEY_BIND_ADDR",
        "PARK_SURVEY_LOG_LEVEL",
        "PARK_SURVEY_EXPORT_TEMPLATE",
        "PARK_SURVEY_EXPORT_OUTPUT",
        "PARK_SURVEY_TEMPLATE_ROWS",
    ];

    // Both cases share one test since they mutate the process environment.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/survey.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.export_template, PathBuf::from("./data/parkexample.csv"));
        assert_eq!(config.export_output, PathBuf::from("./data/import.csv"));
        assert_eq!(config.template_rows, 3);

        env::set_var("PARK_SURVEY_TEMPLATE_ROWS", "three");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.variable, "PARK_SURVEY_TEMPLATE_ROWS");
        env::remove_var("PARK_SURVEY_TEMPLATE_ROWS");
    }
}
