//! Vision client configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{VisionError, VisionResult};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// Inference endpoint
// =============================================================================

/// Connection settings for the inference service.
#[derive(Clone)]
pub struct VisionConfig {
    /// Inference VM address (IP or hostname, optionally with scheme)
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// URL path of the detection endpoint
    pub path: String,
    /// Basic auth user
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl VisionConfig {
    /// Create config with default timeouts.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            path: normalize_path(&path.into()),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables.
    ///
    /// Fails if any of `INFERENCE_VM_IP`, `HTTP_PORT`, `INFERENCE_URL`,
    /// `INFERENCE_USER_NAME` or `INFERENCE_PASSWORD` is missing or empty.
    pub fn from_env() -> VisionResult<Self> {
        let host = required_var("INFERENCE_VM_IP")?;
        let port_raw = required_var("HTTP_PORT")?;
        let port: u16 = port_raw.trim().parse().map_err(|_| {
            VisionError::config_error(format!("HTTP_PORT is not a valid port: {}", port_raw))
        })?;
        let path = required_var("INFERENCE_URL")?;
        let username = required_var("INFERENCE_USER_NAME")?;
        let password = required_var("INFERENCE_PASSWORD")?;

        let config = Self {
            host,
            port,
            path: normalize_path(&path),
            username,
            password,
            timeout: secs_var("INFERENCE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout: secs_var(
                "INFERENCE_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every required value is present.
    pub fn validate(&self) -> VisionResult<()> {
        let required = [
            ("host", &self.host),
            ("path", &self.path),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(VisionError::config_error(format!(
                    "inference {} cannot be empty",
                    name
                )));
            }
        }
        if self.port == 0 {
            return Err(VisionError::config_error("inference port cannot be 0"));
        }
        if self.timeout.is_zero() {
            return Err(VisionError::config_error("request timeout cannot be 0"));
        }
        if self.connect_timeout.is_zero() {
            return Err(VisionError::config_error("connect timeout cannot be 0"));
        }
        Ok(())
    }

    /// Full URL of the detection endpoint, without query string.
    pub fn endpoint(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            format!("{}:{}{}", host, self.port, self.path)
        } else {
            format!("http://{}:{}{}", host, self.port, self.path)
        }
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// How the vision client should fake responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    /// Always call the inference service.
    #[default]
    Off,
    /// Replay a fixed sequence of responses.
    Scripted,
    /// Generate random boxes.
    Random,
}

impl SimulationMode {
    /// Parse a `VISION_SIMULATION` value.
    pub fn parse(value: &str) -> VisionResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "off" | "false" | "0" | "no" => Ok(Self::Off),
            "on" | "true" | "1" | "yes" | "scripted" => Ok(Self::Scripted),
            "random" => Ok(Self::Random),
            other => Err(VisionError::config_error(format!(
                "unknown VISION_SIMULATION mode: {}",
                other
            ))),
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub mode: SimulationMode,
    /// JSON file with scripted responses (scripted mode only)
    pub script_path: Option<PathBuf>,
    /// RNG seed (random mode only)
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create config from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        let mode = match std::env::var("VISION_SIMULATION") {
            Ok(value) => SimulationMode::parse(&value)?,
            Err(_) => SimulationMode::Off,
        };

        let script_path = std::env::var("VISION_SIMULATION_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let seed = match std::env::var("VISION_SIMULATION_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().map_err(|_| {
                VisionError::config_error(format!(
                    "VISION_SIMULATION_SEED is not a number: {}",
                    raw
                ))
            })?),
            _ => None,
        };

        Ok(Self {
            mode,
            script_path,
            seed,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.mode != SimulationMode::Off
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn required_var(name: &str) -> VisionResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(VisionError::config_error(format!("{} cannot be empty", name))),
        Err(_) => Err(VisionError::config_error(format!("{} must be set", name))),
    }
}

fn secs_var(name: &str, default: u64) -> VisionResult<Duration> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                VisionError::config_error(format!("{} is not a number of seconds: {}", name, raw))
            })?;
            Ok(Duration::from_secs(secs))
        }
        _ => Ok(Duration::from_secs(default)),
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const INFERENCE_VARS: [&str; 7] = [
        "INFERENCE_VM_IP",
        "HTTP_PORT",
        "INFERENCE_URL",
        "INFERENCE_USER_NAME",
        "INFERENCE_PASSWORD",
        "INFERENCE_TIMEOUT_SECS",
        "INFERENCE_CONNECT_TIMEOUT_SECS",
    ];

    fn set_inference_env() {
        for var in INFERENCE_VARS {
            std::env::remove_var(var);
        }
        std::env::set_var("INFERENCE_VM_IP", "10.142.0.2");
        std::env::set_var("HTTP_PORT", "8080");
        std::env::set_var("INFERENCE_URL", "/v1/objectInference");
        std::env::set_var("INFERENCE_USER_NAME", "derby");
        std::env::set_var("INFERENCE_PASSWORD", "secret");
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        set_inference_env();
        let config = VisionConfig::from_env().unwrap();
        assert_eq!(config.host, "10.142.0.2");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            config.connect_timeout,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
        assert_eq!(config.endpoint(), "http://10.142.0.2:8080/v1/objectInference");
    }

    #[test]
    #[serial]
    fn test_config_missing_var_fails() {
        set_inference_env();
        std::env::remove_var("INFERENCE_PASSWORD");
        let err = VisionConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            VisionError::ConfigError(ref msg) if msg.contains("INFERENCE_PASSWORD")
        ));
    }

    #[test]
    #[serial]
    fn test_config_empty_var_fails() {
        set_inference_env();
        std::env::set_var("INFERENCE_VM_IP", "  ");
        let err = VisionConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            VisionError::ConfigError(ref msg) if msg.contains("INFERENCE_VM_IP")
        ));
    }

    #[test]
    #[serial]
    fn test_config_invalid_port_fails() {
        set_inference_env();
        std::env::set_var("HTTP_PORT", "eighty");
        assert!(matches!(
            VisionConfig::from_env(),
            Err(VisionError::ConfigError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_config_parses_timeouts() {
        set_inference_env();
        std::env::set_var("INFERENCE_TIMEOUT_SECS", "12");
        std::env::set_var("INFERENCE_CONNECT_TIMEOUT_SECS", "3");
        let config = VisionConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));

        std::env::set_var("INFERENCE_TIMEOUT_SECS", "soon");
        assert!(VisionConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_config_zero_connect_timeout_fails() {
        set_inference_env();
        std::env::set_var("INFERENCE_CONNECT_TIMEOUT_SECS", "0");
        let err = VisionConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            VisionError::ConfigError(ref msg) if msg.contains("connect timeout")
        ));

        let mut config = VisionConfig::new("localhost", 9000, "/detect", "u", "p");
        config.connect_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_is_normalized() {
        let config = VisionConfig::new("localhost", 9000, "detect", "u", "p");
        assert_eq!(config.path, "/detect");
        assert_eq!(config.endpoint(), "http://localhost:9000/detect");
    }

    #[test]
    fn test_endpoint_keeps_explicit_scheme() {
        let config = VisionConfig::new("https://vision.internal/", 443, "/detect", "u", "p");
        assert_eq!(config.endpoint(), "https://vision.internal:443/detect");
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let config = VisionConfig::new("localhost", 9000, "/detect", "", "p");
        assert!(matches!(config.validate(), Err(VisionError::ConfigError(_))));

        let config = VisionConfig::new("localhost", 0, "/detect", "u", "p");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = VisionConfig::new("localhost", 9000, "/detect", "u", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_simulation_mode_parse() {
        assert_eq!(SimulationMode::parse("off").unwrap(), SimulationMode::Off);
        assert_eq!(SimulationMode::parse("TRUE").unwrap(), SimulationMode::Scripted);
        assert_eq!(SimulationMode::parse("1").unwrap(), SimulationMode::Scripted);
        assert_eq!(SimulationMode::parse("random").unwrap(), SimulationMode::Random);
        assert!(SimulationMode::parse("sometimes").is_err());
    }

    #[test]
    #[serial]
    fn test_simulation_config_from_env() {
        std::env::set_var("VISION_SIMULATION", "random");
        std::env::set_var("VISION_SIMULATION_SEED", "42");
        std::env::remove_var("VISION_SIMULATION_FILE");
        let config = SimulationConfig::from_env().unwrap();
        assert!(config.is_enabled());
        assert_eq!(config.mode, SimulationMode::Random);
        assert_eq!(config.seed, Some(42));
        assert!(config.script_path.is_none());

        std::env::remove_var("VISION_SIMULATION");
        std::env::remove_var("VISION_SIMULATION_SEED");
        let config = SimulationConfig::from_env().unwrap();
        assert!(!config.is_enabled());
    }
}
