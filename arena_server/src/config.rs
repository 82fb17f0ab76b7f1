//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Store backend configuration
    pub store: StoreConfig,
    /// Security configuration
    pub security: SecurityConfig,
}

/// Which backend serves the resource collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process collections, lost on shutdown
    Memory,
    /// Flat JSON files under the data directory
    Json,
}

impl StoreBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Json => "json",
        }
    }
}

/// Store-related configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Data directory for the JSON backend
    pub data_dir: PathBuf,
    /// Seed fresh stores with the demo data set
    pub seed_demo_data: bool,
}

/// Security-related configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT signing secret (required)
    pub jwt_secret: String,
    /// Password hashing pepper (required)
    pub password_pepper: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `backend_override` - Optional store backend override (from CLI args)
    /// * `data_dir_override` - Optional data directory override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        backend_override: Option<String>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        // Bind address
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:3000"
                    .parse()
                    .expect("Default bind address is valid")
            });

        // Store configuration
        let backend_name = backend_override
            .or_else(|| std::env::var("STORE_BACKEND").ok())
            .unwrap_or_else(|| "memory".to_string());

        let backend = match backend_name.to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "json" => StoreBackend::Json,
            _ => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND".to_string(),
                    reason: format!("Unknown backend '{backend_name}': use 'memory' or 'json'"),
                });
            }
        };

        let data_dir = data_dir_override
            .or_else(|| std::env::var("DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("./data"));

        let seed_demo_data = parse_env_or("SEED_DEMO_DATA", true);

        let store = StoreConfig {
            backend,
            data_dir,
            seed_demo_data,
        };

        // Security configuration (REQUIRED)
        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingRequired {
            var: "JWT_SECRET".to_string(),
            hint: "Generate with: openssl rand -hex 32".to_string(),
        })?;

        let password_pepper =
            std::env::var("PASSWORD_PEPPER").map_err(|_| ConfigError::MissingRequired {
                var: "PASSWORD_PEPPER".to_string(),
                hint: "Generate with: openssl rand -hex 16".to_string(),
            })?;

        // Validate security params
        if jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET".to_string(),
                reason: "Must be at least 32 characters (128-bit security)".to_string(),
            });
        }

        if password_pepper.len() < 16 {
            return Err(ConfigError::Invalid {
                var: "PASSWORD_PEPPER".to_string(),
                reason: "Must be at least 16 characters (64-bit security)".to_string(),
            });
        }

        let security = SecurityConfig {
            jwt_secret,
            password_pepper,
        };

        Ok(ServerConfig {
            bind,
            store,
            security,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Json
            && self.store.data_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid {
                var: "DATA_DIR".to_string(),
                reason: "Must not be empty for the json backend".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "JWT_SECRET".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("JWT_SECRET"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_backend_labels() {
        assert_eq!(StoreBackend::Memory.label(), "memory");
        assert_eq!(StoreBackend::Json.label(), "json");
    }

    #[test]
    fn test_validation_rejects_empty_data_dir() {
        let config = ServerConfig {
            bind: "127.0.0.1:3000".parse().unwrap(),
            store: StoreConfig {
                backend: StoreBackend::Json,
                data_dir: PathBuf::new(),
                seed_demo_data: true,
            },
            security: SecurityConfig {
                jwt_secret: "a".repeat(32),
                password_pepper: "a".repeat(16),
            },
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_memory_backend_validates() {
        let config = ServerConfig {
            bind: "127.0.0.1:3000".parse().unwrap(),
            store: StoreConfig {
                backend: StoreBackend::Memory,
                data_dir: PathBuf::from("./data"),
                seed_demo_data: false,
            },
            security: SecurityConfig {
                jwt_secret: "a".repeat(32),
                password_pepper: "a".repeat(16),
            },
        };

        assert!(config.validate().is_ok());
    }
}
