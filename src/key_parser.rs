// Composite process definition identifiers: "<name> (<version>)".
//
// Grammar (whole string):
//   identifier := name " (" version ")"
//   name       := non-empty text, not itself ending in " (...)"
//   version    := [A-Za-z]+ [0-9]+

use std::sync::LazyLock;

use thiserror::Error;

/// Reason code attached to diagnostics for identifiers that fail to parse.
pub const MALFORMED_IDENTIFIER: &str = "MALFORMED_IDENTIFIER";

static KEY_VERSION: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(.+) \(([A-Za-z]+[0-9]+)\)$").expect("Invalid key/version regex")
});

static TRAILING_SUFFIX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r" \(.*\)$").expect("Invalid suffix regex"));

/// Logical process key and version token extracted from a composite identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessKey<'a> {
    pub key: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed process definition identifier {identifier:?}")]
pub struct Malformed {
    pub identifier: String,
}

impl Malformed {
    pub fn reason(&self) -> &'static str {
        MALFORMED_IDENTIFIER
    }
}

pub struct KeyParser;

impl KeyParser {
    /// Splits `"orderProcess (v2)"` into key `orderProcess` and version `v2`.
    pub fn parse(identifier: &str) -> Result<ProcessKey<'_>, Malformed> {
        let malformed = || Malformed {
            identifier: identifier.to_string(),
        };
        let caps = KEY_VERSION.captures(identifier).ok_or_else(malformed)?;
        let (Some(key), Some(version)) = (caps.get(1), caps.get(2)) else {
            return Err(malformed());
        };
        if TRAILING_SUFFIX.is_match(key.as_str()) {
            return Err(malformed());
        }
        Ok(ProcessKey {
            key: key.as_str(),
            version: version.as_str(),
        })
    }
}
