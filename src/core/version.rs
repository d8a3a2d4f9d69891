use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::errors::CodecError;

/// Schema revision a dataset row was written under.
///
/// Rows carry a version tag next to their fields. `Unknown` is a valid tag in
/// its own right: it asks the resolver to probe every grammar of a field kind,
/// newest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Original export: names inline, brand pages, bare reminds-of ids.
    V1,
    /// Identifier-based references (accord ids, brand ids, perfumer pairs).
    V2,
    /// Weighted note pyramids, reminds-of votes, pros/cons.
    V3,
    #[default]
    Unknown,
}

impl SchemaVersion {
    /// Numeric revision, or `None` for `Unknown`.
    pub fn number(&self) -> Option<u8> {
        match self {
            SchemaVersion::V1 => Some(1),
            SchemaVersion::V2 => Some(2),
            SchemaVersion::V3 => Some(3),
            SchemaVersion::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
            SchemaVersion::V3 => "v3",
            SchemaVersion::Unknown => "unknown",
        }
    }

    /// Lenient parse used for row tags coming from the table loader.
    ///
    /// Anything unrecognized becomes `Unknown`, which triggers full probing
    /// instead of an error.
    pub fn from_tag(tag: &str) -> Self {
        match tag.parse() {
            Ok(version) => version,
            Err(_) => {
                tracing::debug!(tag, "unrecognized schema tag, probing all grammars");
                SchemaVersion::Unknown
            }
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let tag = tag.strip_prefix('v').unwrap_or(&tag);
        match tag {
            "1" => Ok(SchemaVersion::V1),
            "2" => Ok(SchemaVersion::V2),
            "3" => Ok(SchemaVersion::V3),
            "" | "?" | "unknown" => Ok(SchemaVersion::Unknown),
            _ => Err(CodecError::UnknownVersion(s.to_string())),
        }
    }
}
