//! Serializer configuration.
//!
//! Options are accepted either as a typed [`SerializerConfig`] built in
//! code or as Kafka-client style string properties parsed with
//! [`SerializerConfig::from_properties`]. Construction fails on any
//! unrecognized key, any value of the wrong type, and on the mutually
//! exclusive `use.latest.version` + `auto.register.schemas` combination.

use std::collections::HashMap;

use thiserror::Error;

use crate::subject::{ReferenceSubjectNameStrategy, SubjectNameStrategy};

/// Register the message's schema under its subject if it is not already
/// known to the registry. Boolean, default `true`.
pub const AUTO_REGISTER_SCHEMAS: &str = "auto.register.schemas";

/// Use the latest schema already registered under the subject instead of
/// registering or looking up this exact schema. Boolean, default `false`.
pub const USE_LATEST_VERSION: &str = "use.latest.version";

/// Skip `google/protobuf/` well-known imports during reference
/// resolution. Boolean, default `false`.
pub const SKIP_KNOWN_TYPES: &str = "skip.known.types";

/// Subject naming strategy for message schemas: `topic`, `topic-record`
/// or `record`. Default `topic`.
pub const SUBJECT_NAME_STRATEGY: &str = "subject.name.strategy";

/// Subject naming strategy for schema references: `reference-path`.
pub const REFERENCE_SUBJECT_NAME_STRATEGY: &str = "reference.subject.name.strategy";

/// Construction-time configuration failure. No partially configured
/// serializer is usable after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A recognized key carried a value of the wrong type or an unknown
    /// enumerant.
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    /// One or more keys are not recognized options, listed sorted
    /// lexically.
    #[error("unrecognized properties: {0}")]
    UnrecognizedProperties(String),

    /// Contradictory policies: one assumes the schema pre-exists and is
    /// authoritative, the other creates it.
    #[error("cannot enable both {USE_LATEST_VERSION} and {AUTO_REGISTER_SCHEMAS}")]
    MutuallyExclusive,
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &str, value: &str, expected: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Validated serializer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    pub auto_register_schemas: bool,
    pub use_latest_version: bool,
    pub skip_known_types: bool,
    pub subject_name_strategy: SubjectNameStrategy,
    pub reference_subject_name_strategy: ReferenceSubjectNameStrategy,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            auto_register_schemas: true,
            use_latest_version: false,
            skip_known_types: false,
            subject_name_strategy: SubjectNameStrategy::default(),
            reference_subject_name_strategy: ReferenceSubjectNameStrategy::default(),
        }
    }
}

impl SerializerConfig {
    /// Parses string properties over the defaults.
    ///
    /// All unrecognized keys are collected and reported in a single
    /// error, sorted lexically, so a typo'd deployment fails loudly and
    /// completely on the first attempt.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = SerializerConfig::default();
        let mut unrecognized = Vec::new();

        for (key, value) in properties {
            match key.as_str() {
                AUTO_REGISTER_SCHEMAS => {
                    config.auto_register_schemas = parse_bool(AUTO_REGISTER_SCHEMAS, value)?;
                }
                USE_LATEST_VERSION => {
                    config.use_latest_version = parse_bool(USE_LATEST_VERSION, value)?;
                }
                SKIP_KNOWN_TYPES => {
                    config.skip_known_types = parse_bool(SKIP_KNOWN_TYPES, value)?;
                }
                SUBJECT_NAME_STRATEGY => {
                    config.subject_name_strategy = value.parse()?;
                }
                REFERENCE_SUBJECT_NAME_STRATEGY => {
                    config.reference_subject_name_strategy = value.parse()?;
                }
                _ => unrecognized.push(key.clone()),
            }
        }

        if !unrecognized.is_empty() {
            unrecognized.sort();
            return Err(ConfigError::UnrecognizedProperties(unrecognized.join(", ")));
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects contradictory option combinations. Called by the parser
    /// and again by serializer construction, so configs assembled
    /// directly in code go through the same check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_latest_version && self.auto_register_schemas {
            return Err(ConfigError::MutuallyExclusive);
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::invalid_value(key, other, "a boolean value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = SerializerConfig::default();
        assert!(config.auto_register_schemas);
        assert!(!config.use_latest_version);
        assert!(!config.skip_known_types);
        assert_eq!(config.subject_name_strategy, SubjectNameStrategy::Topic);
        assert_eq!(
            config.reference_subject_name_strategy,
            ReferenceSubjectNameStrategy::ReferencePath
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_properties_yield_defaults() {
        let config = SerializerConfig::from_properties(&HashMap::new()).unwrap();
        assert_eq!(config, SerializerConfig::default());
    }

    #[test]
    fn recognized_properties_override_defaults() {
        let config = SerializerConfig::from_properties(&props(&[
            (AUTO_REGISTER_SCHEMAS, "false"),
            (USE_LATEST_VERSION, "true"),
            (SKIP_KNOWN_TYPES, "true"),
            (SUBJECT_NAME_STRATEGY, "topic-record"),
            (REFERENCE_SUBJECT_NAME_STRATEGY, "reference-path"),
        ]))
        .unwrap();

        assert!(!config.auto_register_schemas);
        assert!(config.use_latest_version);
        assert!(config.skip_known_types);
        assert_eq!(
            config.subject_name_strategy,
            SubjectNameStrategy::TopicRecord
        );
    }

    #[test]
    fn non_boolean_value_is_rejected() {
        let err = SerializerConfig::from_properties(&props(&[(SKIP_KNOWN_TYPES, "yes")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::invalid_value(SKIP_KNOWN_TYPES, "yes", "a boolean value")
        );
    }

    #[test]
    fn unknown_strategy_value_is_rejected() {
        let err =
            SerializerConfig::from_properties(&props(&[(SUBJECT_NAME_STRATEGY, "hostname")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unrecognized_keys_are_reported_sorted_in_one_error() {
        let err = SerializerConfig::from_properties(&props(&[
            ("made.this.up", "true"),
            ("also.made.up", "false"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnrecognizedProperties("also.made.up, made.this.up".to_string())
        );
    }

    #[test]
    fn use_latest_with_explicit_auto_register_is_rejected() {
        let err = SerializerConfig::from_properties(&props(&[
            (USE_LATEST_VERSION, "true"),
            (AUTO_REGISTER_SCHEMAS, "true"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MutuallyExclusive);
    }

    #[test]
    fn use_latest_alone_still_conflicts_with_the_auto_register_default() {
        let err = SerializerConfig::from_properties(&props(&[(USE_LATEST_VERSION, "true")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MutuallyExclusive);

        // explicitly disabling auto-registration resolves the conflict
        let config = SerializerConfig::from_properties(&props(&[
            (USE_LATEST_VERSION, "true"),
            (AUTO_REGISTER_SCHEMAS, "false"),
        ]))
        .unwrap();
        assert!(config.use_latest_version);
        assert!(!config.auto_register_schemas);
    }

    #[test]
    fn mutually_exclusive_error_names_both_options() {
        let message = ConfigError::MutuallyExclusive.to_string();
        assert!(message.contains(USE_LATEST_VERSION));
        assert!(message.contains(AUTO_REGISTER_SCHEMAS));
    }
}
