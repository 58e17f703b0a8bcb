use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_MAX_PAYLOAD_BYTES: usize = 256 * 1024;

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reports: ReportConfig,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Clone)]
pub struct ReportConfig {
    /// Where transient report files are written before download.
    pub dir: PathBuf,
    pub seed_file: Option<PathBuf>,
    pub max_payload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".into()))?,
                workers: std::env::var("WORKERS")
                    .ok()
                    .map(|w| w.parse())
                    .transpose()
                    .map_err(|_| ConfigError::InvalidValue("WORKERS".into()))?,
            },
            reports: ReportConfig {
                dir: std::env::var("REPORT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_report_dir()),
                seed_file: std::env::var("GRADES_SEED_FILE").ok().map(PathBuf::from),
                max_payload_bytes: std::env::var("MAX_PAYLOAD_BYTES")
                    .unwrap_or_else(|_| DEFAULT_MAX_PAYLOAD_BYTES.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES),
            },
        })
    }
}

fn default_report_dir() -> PathBuf {
    std::env::temp_dir().join("grades-api-reports")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
            seed_file: None,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);
        assert_eq!(server.host, "0.0.0.0");
        assert!(server.workers.is_none());
    }

    #[test]
    fn test_report_config_default() {
        let reports = ReportConfig::default();
        assert!(reports.seed_file.is_none());
        assert_eq!(reports.max_payload_bytes, 256 * 1024);
        assert!(reports.dir.ends_with("grades-api-reports"));
    }
}
