//! Layer name validation
//!
//! Table identifiers cannot be bound as query parameters, so the layer name
//! is spliced into the SQL text. This module is the only gate in front of
//! that splice: a name is accepted iff it is one or more ASCII letters,
//! digits or underscores. No schema qualification, no quoted identifiers.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::errors::{CatalogError, CatalogResult};

const LAYER_NAME_PATTERN: &str = r"^[A-Za-z0-9_]+$";

fn layer_name_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LAYER_NAME_PATTERN).expect("layer name pattern compiles"))
}

/// Returns true if `candidate` may be interpolated into SQL as an identifier.
pub fn is_safe_identifier(candidate: &str) -> bool {
    layer_name_regex().is_match(candidate)
}

/// A table name that has passed [`is_safe_identifier`].
///
/// The fetch operation only accepts this type, so a raw request string can
/// never reach the SQL template without going through validation first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerName(String);

impl LayerName {
    /// Validate a candidate layer name
    pub fn parse(candidate: impl Into<String>) -> CatalogResult<Self> {
        let candidate = candidate.into();
        if is_safe_identifier(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(CatalogError::InvalidIdentifier(candidate))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
