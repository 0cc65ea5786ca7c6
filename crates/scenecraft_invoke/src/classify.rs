//! Failure classification.
//!
//! Provider failures arrive as opaque strings. The table below maps them to a
//! [`FailureClass`] by ordered, case-insensitive patterns: the first matching
//! rule wins and unmatched messages are treated as transient.

use regex::Regex;
use scenecraft_error::{ConfigError, GenerationErrorKind, ScenecraftResult};
use tracing::{debug, error};

/// Version of the built-in rule set. Bump whenever a rule changes.
pub const CLASSIFICATION_VERSION: u32 = 2;

/// How the executor reacts to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureClass {
    /// Credentials, malformed requests, policy rejections: never retried
    Fatal,
    /// Rate limits, timeouts, 5xx and outages: retried with backoff
    Transient,
    /// Unusable auxiliary data, usually a reference image the provider could
    /// not fetch: retried once without reference images
    InputWithReference,
}

impl FailureClass {
    /// Error kind carrying `message` for this class.
    pub fn error_kind(self, message: impl Into<String>) -> GenerationErrorKind {
        match self {
            FailureClass::Fatal => GenerationErrorKind::Validation(message.into()),
            FailureClass::Transient => GenerationErrorKind::ProviderTransient(message.into()),
            FailureClass::InputWithReference => GenerationErrorKind::ProviderInput(message.into()),
        }
    }
}

/// Built-in rules, in match order.
const BUILTIN_RULES: &[(&str, FailureClass)] = &[
    (r"invalid[ _]input", FailureClass::InputWithReference),
    (r"invalid[ _]argument", FailureClass::InputWithReference),
    (r"(reference|input|source) image", FailureClass::InputWithReference),
    (r"(fetch|download|load)(ing)? (the )?image", FailureClass::InputWithReference),
    (r"image (url|could not|cannot|failed|unreachable)", FailureClass::InputWithReference),
    (r"unsupported (image|media)", FailureClass::InputWithReference),
    (r"unauthori[sz]ed", FailureClass::Fatal),
    (r"forbidden", FailureClass::Fatal),
    (r"invalid (api[ _-]?)?key", FailureClass::Fatal),
    (r"invalid credentials?", FailureClass::Fatal),
    (r"authentication", FailureClass::Fatal),
    (r"permission denied", FailureClass::Fatal),
    (r"\b40[134]\b", FailureClass::Fatal),
    (r"malformed request", FailureClass::Fatal),
    (r"bad request", FailureClass::Fatal),
    (r"model not found", FailureClass::Fatal),
    (r"content policy|safety (filter|system)", FailureClass::Fatal),
    (r"rate[ _-]?limit", FailureClass::Transient),
    (r"\b429\b|too many requests", FailureClass::Transient),
    (r"quota", FailureClass::Transient),
    (r"timed? ?out|timeout", FailureClass::Transient),
    (r"\b5\d\d\b", FailureClass::Transient),
    (r"unavailable|overloaded", FailureClass::Transient),
    (r"internal (server )?error", FailureClass::Transient),
    (r"connection", FailureClass::Transient),
    (r"try again", FailureClass::Transient),
];

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    class: FailureClass,
}

/// Ordered pattern table mapping failure messages to classes.
///
/// # Examples
///
/// ```
/// use scenecraft_invoke::{ClassificationTable, FailureClass};
///
/// let table = ClassificationTable::builtin();
/// assert_eq!(table.classify("HTTP 503: upstream overloaded"), FailureClass::Transient);
/// assert_eq!(table.classify("Invalid API key"), FailureClass::Fatal);
/// assert_eq!(
///     table.classify("INVALID_ARGUMENT: could not fetch reference image"),
///     FailureClass::InputWithReference
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    version: u32,
    rules: Vec<Rule>,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ClassificationTable {
    /// The built-in rule set.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter_map(|(pattern, class)| match compile(pattern) {
                Ok(pattern) => Some(Rule {
                    pattern,
                    class: *class,
                }),
                Err(e) => {
                    error!(pattern, error = %e, "Skipping invalid built-in classification rule");
                    None
                }
            })
            .collect();
        Self {
            version: CLASSIFICATION_VERSION,
            rules,
        }
    }

    /// A table with no rules; every message is transient.
    pub fn empty(version: u32) -> Self {
        Self {
            version,
            rules: Vec::new(),
        }
    }

    /// Insert a rule ahead of the existing ones.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the pattern does not compile.
    pub fn with_rule(mut self, pattern: &str, class: FailureClass) -> ScenecraftResult<Self> {
        let pattern = compile(pattern).map_err(|e| {
            ConfigError::new(format!("Invalid classification pattern '{}': {}", pattern, e))
        })?;
        self.rules.insert(0, Rule { pattern, class });
        Ok(self)
    }

    /// Rule set version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classify a provider failure message.
    pub fn classify(&self, message: &str) -> FailureClass {
        match self.rules.iter().find(|rule| rule.pattern.is_match(message)) {
            Some(rule) => {
                debug!(class = %rule.class, pattern = rule.pattern.as_str(), "Classified failure");
                rule.class
            }
            None => {
                debug!(message, "No classification rule matched, treating as transient");
                FailureClass::Transient
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_rule_compiles() {
        assert_eq!(ClassificationTable::builtin().len(), BUILTIN_RULES.len());
    }
}
