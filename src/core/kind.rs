use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::errors::{UnknownFieldKindError, find_closest_kind};

/// Logical sub-field types embedded in a dataset row.
///
/// Each kind owns a fixed set of grammars in the registry. Kinds are the
/// one place where a caller can make a mistake the codec refuses to paper
/// over: asking for a kind by a name that is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Accords,
    NotesPyramid,
    Rating,
    Brand,
    Perfumers,
    Voting,
    RemindsOf,
    ProsCons,
    Percentage,
    IdList,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Accords,
        FieldKind::NotesPyramid,
        FieldKind::Rating,
        FieldKind::Brand,
        FieldKind::Perfumers,
        FieldKind::Voting,
        FieldKind::RemindsOf,
        FieldKind::ProsCons,
        FieldKind::Percentage,
        FieldKind::IdList,
    ];

    /// Registered name, as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Accords => "accords",
            FieldKind::NotesPyramid => "notes_pyramid",
            FieldKind::Rating => "rating",
            FieldKind::Brand => "brand",
            FieldKind::Perfumers => "perfumers",
            FieldKind::Voting => "voting",
            FieldKind::RemindsOf => "reminds_of",
            FieldKind::ProsCons => "pros_cons",
            FieldKind::Percentage => "percentage",
            FieldKind::IdList => "id_list",
        }
    }

    /// All registered names, sorted.
    pub fn names() -> Vec<String> {
        let mut names: Vec<String> = Self::ALL.iter().map(|k| k.as_str().to_string()).collect();
        names.sort();
        names
    }

    /// Looks a kind up by name, suggesting the closest registered name on a miss.
    pub fn lookup(name: &str) -> Result<Self, UnknownFieldKindError> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let found = match normalized.as_str() {
            "notes" | "pyramid" => Some(FieldKind::NotesPyramid),
            "percentages" => Some(FieldKind::Percentage),
            "ids" => Some(FieldKind::IdList),
            other => Self::ALL.iter().copied().find(|k| k.as_str() == other),
        };

        found.ok_or_else(|| {
            let suggestion = find_closest_kind(&normalized, &Self::names());
            UnknownFieldKindError::new(name, suggestion)
        })
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownFieldKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}
