//! Search request parsing and record matching.

use serde::Deserialize;
use serde_json::Value;

/// `type` value that selects lightcone mode.
const LIGHTCONE_TYPE: &str = "lightcone";

/// Folder-name fragments that mark lightcone categories.
const LIGHTCONE_FOLDER_HINTS: &[&str] = &["lightcone", "cono"];

/// How a search decides whether a record matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Case-insensitive substring match over the serialized record.
    General,
    /// Heuristic lightcone classification; the query is ignored.
    Lightcone,
}

impl SearchMode {
    /// Pick a mode from the request's optional `type` field.
    #[must_use]
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some(LIGHTCONE_TYPE) => Self::Lightcone,
            _ => Self::General,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Lightcone => "lightcone",
        }
    }
}

/// Body of a search request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Any JSON value; only the string `"lightcone"` changes the mode.
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
}

impl SearchRequest {
    /// General-mode search for `query`.
    pub fn general(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: None,
        }
    }

    /// Lightcone-mode search.
    #[must_use]
    pub fn lightcone() -> Self {
        Self {
            query: String::new(),
            kind: Some(Value::from(LIGHTCONE_TYPE)),
        }
    }

    #[must_use]
    pub fn mode(&self) -> SearchMode {
        SearchMode::from_type(self.kind.as_ref().and_then(Value::as_str))
    }
}

/// Compiled predicate for one search request.
#[derive(Debug, Clone)]
pub struct Matcher {
    mode: SearchMode,
    needle: String,
}

impl Matcher {
    #[must_use]
    pub fn new(request: &SearchRequest) -> Self {
        Self {
            mode: request.mode(),
            needle: request.query.to_lowercase(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Check whether `record`, found in `folder`, matches.
    #[must_use]
    pub fn matches(&self, record: &Value, folder: &str) -> bool {
        match self.mode {
            SearchMode::General => contains_text(record, &self.needle),
            SearchMode::Lightcone => is_lightcone(record, folder),
        }
    }
}

/// Largest integer an `f64` holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn contains_text(record: &Value, needle: &str) -> bool {
    let mut text = String::new();
    write_compact(record, &mut text);
    text.to_lowercase().contains(needle)
}

/// Compact JSON where whole-valued floats print without a fraction or
/// exponent (`1.0` and `1e0` both become `1`).
fn write_compact(value: &Value, out: &mut String) {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = f as i64;
                out.push_str(&whole.to_string());
            }
            _ => out.push_str(&n.to_string()),
        },
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_compact(item, out);
            }
            out.push('}');
        }
        other => out.push_str(&other.to_string()),
    }
}

fn is_lightcone(record: &Value, folder: &str) -> bool {
    if record.get("Refinements").is_some_and(is_truthy) {
        return true;
    }

    // Null records and non-string Rarity values still fall through to the folder rule
    let rarity_hint = match record.get("Rarity") {
        Some(Value::String(rarity)) => rarity.contains("Lightcone"),
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some("Lightcone")),
        _ => false,
    };
    if rarity_hint {
        return true;
    }

    let folder = folder.to_lowercase();
    LIGHTCONE_FOLDER_HINTS
        .iter()
        .any(|hint| folder.contains(hint))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
