//! 应用运行配置加载。

use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 映射到 0 m 的信号强度（dBm）。
    pub rfid_reference_dbm: f64,
    /// 映射到最大距离的信号强度（dBm）。
    pub rfid_max_range_dbm: f64,
    pub rfid_max_range_meters: f64,
    /// RFID 位置置信度，取值 [0, 1]。
    pub rfid_confidence: f64,
    pub rfid_bearing_seed: Option<u64>,
    pub sensor_problem_threshold_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rfid_reference_dbm: -30.0,
            rfid_max_range_dbm: -90.0,
            rfid_max_range_meters: 20.0,
            rfid_confidence: 0.8,
            rfid_bearing_seed: None,
            sensor_problem_threshold_seconds: 300,
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let rfid_reference_dbm =
            read_f64_with_default("PATIO_RFID_REFERENCE_DBM", defaults.rfid_reference_dbm)?;
        let rfid_max_range_dbm =
            read_f64_with_default("PATIO_RFID_MAX_RANGE_DBM", defaults.rfid_max_range_dbm)?;
        if rfid_reference_dbm <= rfid_max_range_dbm {
            return Err(ConfigError::Invalid(
                "PATIO_RFID_REFERENCE_DBM".to_string(),
                format!("{rfid_reference_dbm} must be greater than {rfid_max_range_dbm}"),
            ));
        }
        let rfid_max_range_meters = read_f64_with_default(
            "PATIO_RFID_MAX_RANGE_METERS",
            defaults.rfid_max_range_meters,
        )?;
        if rfid_max_range_meters <= 0.0 {
            return Err(ConfigError::Invalid(
                "PATIO_RFID_MAX_RANGE_METERS".to_string(),
                rfid_max_range_meters.to_string(),
            ));
        }
        let rfid_confidence =
            read_f64_with_default("PATIO_RFID_CONFIDENCE", defaults.rfid_confidence)?;
        if !(0.0..=1.0).contains(&rfid_confidence) {
            return Err(ConfigError::Invalid(
                "PATIO_RFID_CONFIDENCE".to_string(),
                rfid_confidence.to_string(),
            ));
        }
        let rfid_bearing_seed = read_optional_u64("PATIO_RFID_BEARING_SEED")?;
        let sensor_problem_threshold_seconds = read_u64_with_default(
            "PATIO_SENSOR_PROBLEM_THRESHOLD_SECONDS",
            defaults.sensor_problem_threshold_seconds,
        )?;

        Ok(Self {
            rfid_reference_dbm,
            rfid_max_range_dbm,
            rfid_max_range_meters,
            rfid_confidence,
            rfid_bearing_seed,
            sensor_problem_threshold_seconds,
        })
    }

    /// 读写器静默故障阈值。
    pub fn sensor_problem_threshold(&self) -> Duration {
        Duration::from_secs(self.sensor_problem_threshold_seconds)
    }
}

/// 读取非空环境变量（去除首尾空白）；未设置或为空视为缺省。
fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// 读取有限 f64，缺省时使用默认值。
fn read_f64_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let Some(value) = read_optional(key) else {
        return Ok(default);
    };
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    Ok(read_optional_u64(key)?.unwrap_or(default))
}

fn read_optional_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    read_optional(key)
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid(key.to_string(), value))
        })
        .transpose()
}
