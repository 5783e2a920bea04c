//! Subject naming strategies.
//!
//! A subject is the logical name under which the registry tracks a schema
//! and its version history. How a message maps to a subject is policy:
//! the standard strategies derive it from the topic, the record name, or
//! both, and references get their own strategy. The strategy set is fixed,
//! so each one is a closed enum dispatched by `match`.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Whether a message is serialized as the record key or the record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    Key,
    Value,
}

impl MessageField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageField::Key => "key",
            MessageField::Value => "value",
        }
    }
}

impl fmt::Display for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-send context a naming strategy may draw on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationContext {
    /// Destination topic.
    pub topic: String,
    /// Key or value position of the message within the record.
    pub field: MessageField,
}

impl SerializationContext {
    pub fn new(topic: impl Into<String>, field: MessageField) -> Self {
        Self {
            topic: topic.into(),
            field,
        }
    }
}

/// How message subjects are derived. The default couples a schema to the
/// topic it is produced to; the record-based strategies let one schema be
/// shared across topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubjectNameStrategy {
    /// `"{topic}-{key|value}"`
    #[default]
    Topic,
    /// `"{topic}-{record full name}"`
    TopicRecord,
    /// `"{record full name}"`
    Record,
}

impl SubjectNameStrategy {
    /// Subject for a message with the given fully qualified record name.
    pub fn subject(&self, ctx: &SerializationContext, record_name: &str) -> String {
        match self {
            SubjectNameStrategy::Topic => format!("{}-{}", ctx.topic, ctx.field),
            SubjectNameStrategy::TopicRecord => format!("{}-{}", ctx.topic, record_name),
            SubjectNameStrategy::Record => record_name.to_string(),
        }
    }
}

impl FromStr for SubjectNameStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topic" => Ok(SubjectNameStrategy::Topic),
            "topic-record" => Ok(SubjectNameStrategy::TopicRecord),
            "record" => Ok(SubjectNameStrategy::Record),
            other => Err(ConfigError::invalid_value(
                crate::config::SUBJECT_NAME_STRATEGY,
                other,
                "one of 'topic', 'topic-record', 'record'",
            )),
        }
    }
}

/// How subjects are derived for schema references (imported files).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceSubjectNameStrategy {
    /// The import path of the referenced file, e.g. `"common/units.proto"`.
    #[default]
    ReferencePath,
}

impl ReferenceSubjectNameStrategy {
    /// Subject for a referenced schema file with the given import path.
    pub fn subject(&self, _ctx: &SerializationContext, import_path: &str) -> String {
        match self {
            ReferenceSubjectNameStrategy::ReferencePath => import_path.to_string(),
        }
    }
}

impl FromStr for ReferenceSubjectNameStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference-path" => Ok(ReferenceSubjectNameStrategy::ReferencePath),
            other => Err(ConfigError::invalid_value(
                crate::config::REFERENCE_SUBJECT_NAME_STRATEGY,
                other,
                "'reference-path'",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SerializationContext {
        SerializationContext::new("orders", MessageField::Value)
    }

    #[test]
    fn topic_strategy_uses_topic_and_field() {
        let strategy = SubjectNameStrategy::Topic;
        assert_eq!(strategy.subject(&ctx(), "billing.Invoice"), "orders-value");

        let key_ctx = SerializationContext::new("orders", MessageField::Key);
        assert_eq!(strategy.subject(&key_ctx, "billing.Invoice"), "orders-key");
    }

    #[test]
    fn topic_record_strategy_uses_topic_and_record_name() {
        let strategy = SubjectNameStrategy::TopicRecord;
        assert_eq!(
            strategy.subject(&ctx(), "billing.Invoice"),
            "orders-billing.Invoice"
        );
    }

    #[test]
    fn record_strategy_ignores_context() {
        let strategy = SubjectNameStrategy::Record;
        assert_eq!(strategy.subject(&ctx(), "billing.Invoice"), "billing.Invoice");
    }

    #[test]
    fn reference_strategy_uses_import_path() {
        let strategy = ReferenceSubjectNameStrategy::ReferencePath;
        assert_eq!(
            strategy.subject(&ctx(), "common/units.proto"),
            "common/units.proto"
        );
    }

    #[test]
    fn strategies_parse_from_config_values() {
        assert_eq!(
            "topic".parse::<SubjectNameStrategy>().unwrap(),
            SubjectNameStrategy::Topic
        );
        assert_eq!(
            "topic-record".parse::<SubjectNameStrategy>().unwrap(),
            SubjectNameStrategy::TopicRecord
        );
        assert_eq!(
            "record".parse::<SubjectNameStrategy>().unwrap(),
            SubjectNameStrategy::Record
        );
        assert!("TopicNameStrategy".parse::<SubjectNameStrategy>().is_err());

        assert_eq!(
            "reference-path"
                .parse::<ReferenceSubjectNameStrategy>()
                .unwrap(),
            ReferenceSubjectNameStrategy::ReferencePath
        );
        assert!("import".parse::<ReferenceSubjectNameStrategy>().is_err());
    }
}
