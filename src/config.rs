use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "triage-engine";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remote scoring budget before the rule fallback takes over.
pub const DEFAULT_CLASSIFIER_TIMEOUT_MS: u64 = 10_000;

/// Patient turns gathered before the session is scored.
pub const DEFAULT_MIN_TURNS_BEFORE_ANALYSIS: u32 = 4;

pub const DEFAULT_EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
];

pub const DEFAULT_SYMPTOM_VOCABULARY: &[&str] = &[
    "headache",
    "fever",
    "cough",
    "sore throat",
    "fatigue",
    "nausea",
    "chest pain",
    "shortness of breath",
    "abdominal pain",
    "dizziness",
    "difficulty breathing",
    "severe bleeding",
    "unconscious",
];

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,triage_engine=debug"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Explicit configuration object handed to the engine by its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriageConfig {
    /// Remote scorer URL. `None` runs every session on the rule fallback.
    pub classifier_url: Option<String>,
    /// Model endpoint name forwarded to the scorer in each request.
    pub classifier_endpoint: Option<String>,
    pub classifier_timeout_ms: u64,
    pub emergency_keywords: Vec<String>,
    pub symptom_vocabulary: Vec<String>,
    pub min_turns_before_analysis: u32,
    /// Append a note to recommendations produced by the rule fallback.
    pub annotate_fallback: bool,
    /// Date given to bookings whose slot label names no day ("Walk-in Available", "Next Week").
    pub unscheduled_date: Option<NaiveDate>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            classifier_url: None,
            classifier_endpoint: None,
            classifier_timeout_ms: DEFAULT_CLASSIFIER_TIMEOUT_MS,
            emergency_keywords: to_owned(DEFAULT_EMERGENCY_KEYWORDS),
            symptom_vocabulary: to_owned(DEFAULT_SYMPTOM_VOCABULARY),
            min_turns_before_analysis: DEFAULT_MIN_TURNS_BEFORE_ANALYSIS,
            annotate_fallback: true,
            unscheduled_date: None,
        }
    }
}

impl TriageConfig {
    /// Parse a JSON configuration object. Missing options take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "classifierTimeoutMs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.min_turns_before_analysis == 0 {
            return Err(ConfigError::Invalid {
                field: "minTurnsBeforeAnalysis",
                reason: "must be at least one turn".into(),
            });
        }
        if self.symptom_vocabulary.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "symptomVocabulary",
                reason: "must contain at least one phrase".into(),
            });
        }
        if self.emergency_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "emergencyKeywords",
                reason: "must contain at least one keyword".into(),
            });
        }
        if let Some(url) = &self.classifier_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    field: "classifierUrl",
                    reason: format!("unsupported scheme in {url}"),
                });
            }
        }
        Ok(())
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_millis(self.classifier_timeout_ms)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_turns_before_analysis, 4);
        assert_eq!(config.classifier_timeout(), Duration::from_secs(10));
        assert!(config.annotate_fallback);
    }

    #[test]
    fn default_vocabulary_covers_emergency_keywords() {
        let config = TriageConfig::default();
        for keyword in &config.emergency_keywords {
            assert!(config.symptom_vocabulary.contains(keyword), "{keyword}");
        }
    }

    #[test]
    fn parses_recognized_options() {
        let config = TriageConfig::from_json_str(
            r#"{
                "classifierUrl": "http://localhost:9000/triage",
                "classifierTimeoutMs": 250,
                "emergencyKeywords": ["stroke"],
                "symptomVocabulary": ["stroke", "rash"],
                "minTurnsBeforeAnalysis": 2,
                "unscheduledDate": "2026-11-02"
            }"#,
        )
        .unwrap();
        assert_eq!(config.classifier_timeout_ms, 250);
        assert_eq!(config.emergency_keywords, vec!["stroke".to_string()]);
        assert_eq!(config.min_turns_before_analysis, 2);
        assert_eq!(
            config.unscheduled_date,
            NaiveDate::from_ymd_opt(2026, 11, 2)
        );
        assert!(config.annotate_fallback);
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = TriageConfig::from_json_str(r#"{"classifierTimeoutMs": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "classifierTimeoutMs", .. }
        ));
    }

    #[test]
    fn rejects_zero_min_turns() {
        let config = TriageConfig {
            min_turns_before_analysis: 0,
            ..TriageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_http_classifier_url() {
        let config = TriageConfig {
            classifier_url: Some("ftp://scorer".into()),
            ..TriageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            TriageConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
