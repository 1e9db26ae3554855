use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const MAX_LENGTH_LABEL: &str = "maxMessageLength";
pub const REPEAT_WORDS_LABEL: &str = "repeatWords";
pub const REPETITIONS_LABEL: &str = "noOfRepetitions";
const DEFAULT_REPETITIONS: usize = 2;
pub const MAX_REPETITIONS: usize = 100;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("setting '{label}' must be a non-negative integer, got {value}")]
    InvalidNumber { label: String, value: String },
    #[error("setting '{label}' must be at most {max}, got {value}")]
    OutOfRange {
        label: String,
        value: usize,
        max: usize,
    },
}

/// formatter setting as sent by the platform; `default` may be a string or a number
#[derive(Debug, Clone, Deserialize)]
pub struct FormatterSetting {
    pub label: String,
    #[serde(default)]
    pub default: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRules {
    pub max_length: Option<usize>,
    pub repeat_words: Vec<String>,
    pub repetitions: usize,
}

impl Default for FormatRules {
    fn default() -> FormatRules {
        FormatRules {
            max_length: None,
            repeat_words: vec![],
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}

fn parse_count(label: &str, value: &Value) -> Result<Option<usize>, FormatError> {
    let invalid = || FormatError::InvalidNumber {
        label: label.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_u64().map(|n| Some(n as usize)).ok_or_else(invalid),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn parse_words(value: &Value) -> Vec<String> {
    let words: Vec<String> = match value {
        Value::String(s) => s.split(',').map(normalize).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(normalize)
            .collect(),
        _ => vec![],
    };

    words.into_iter().filter(|w| !w.is_empty()).collect()
}

impl FormatRules {
    /// reads the known labels, ignoring any other setting
    pub fn from_settings(settings: &[FormatterSetting]) -> Result<FormatRules, FormatError> {
        let mut rules = FormatRules::default();

        for setting in settings {
            match setting.label.as_str() {
                MAX_LENGTH_LABEL => {
                    rules.max_length = parse_count(&setting.label, &setting.default)?
                }
                REPEAT_WORDS_LABEL => rules.repeat_words = parse_words(&setting.default),
                REPETITIONS_LABEL => {
                    if let Some(n) = parse_count(&setting.label, &setting.default)? {
                        if n > MAX_REPETITIONS {
                            return Err(FormatError::OutOfRange {
                                label: setting.label.clone(),
                                value: n,
                                max: MAX_REPETITIONS,
                            });
                        }
                        rules.repetitions = n;
                    }
                }
                _ => {}
            }
        }

        Ok(rules)
    }

    /// Repeats every listed word `repetitions` times and cuts the result to
    /// `max_length` characters, stopping as soon as the limit is reached.
    pub fn apply(&self, message: &str) -> String {
        let budget = self.max_length.unwrap_or(usize::MAX);
        if self.repeat_words.is_empty() {
            return message.chars().take(budget).collect();
        }

        let mut formatted = String::new();
        let mut written = 0;
        'words: for word in message.split_whitespace() {
            let count = if self.repeat_words.contains(&normalize(word)) {
                self.repetitions.max(1)
            } else {
                1
            };

            for _ in 0..count {
                if written >= budget {
                    break 'words;
                }
                if written > 0 {
                    formatted.push(' ');
                    written += 1;
                }
                for c in word.chars() {
                    if written >= budget {
                        break 'words;
                    }
                    formatted.push(c);
                    written += 1;
                }
            }
        }

        formatted
    }
}
