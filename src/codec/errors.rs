use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::kind::FieldKind;

/// Errors raised by the codec.
///
/// Dirty field data never produces one of these in lenient mode: malformed
/// tokens are substituted and counted instead. What remains are caller
/// mistakes, strict-mode rejections, and configuration or I/O failures.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownFieldKindError),

    #[error("unrecognized schema version '{0}' (expected v1, v2, v3 or unknown)")]
    UnknownVersion(String),

    #[error("{kind} field decoded with {malformed} malformed token(s)")]
    Malformed { kind: FieldKind, malformed: usize },

    #[error("invalid reference config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON value: {0}")]
    Json(#[from] serde_json::Error),
}

static COLOR_DISABLED: AtomicBool = AtomicBool::new(false);

/// Turns off ANSI colors in error rendering regardless of terminal detection.
pub fn disable_color() {
    COLOR_DISABLED.store(true, Ordering::Relaxed);
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    if COLOR_DISABLED.load(Ordering::Relaxed) {
        return false;
    }

    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Error when a field kind is requested by a name with no registered grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldKindError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl UnknownFieldKindError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for UnknownFieldKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        if use_color {
            writeln!(
                f,
                "\x1b[1;31merror:\x1b[0m field kind '{}' has no registered grammar",
                self.name
            )?;
        } else {
            writeln!(f, "error: field kind '{}' has no registered grammar", self.name)?;
        }

        writeln!(f)?;

        if let Some(suggestion) = &self.suggestion {
            if use_color {
                writeln!(f, "\x1b[1;36mhint:\x1b[0m did you mean '{}'?", suggestion)?;
            } else {
                writeln!(f, "hint: did you mean '{}'?", suggestion)?;
            }
        }

        if use_color {
            write!(
                f,
                "      run \x1b[1m`fragdb-codec config list kinds`\x1b[0m to see all kinds"
            )?;
        } else {
            write!(f, "      run `fragdb-codec config list kinds` to see all kinds")?;
        }

        Ok(())
    }
}

impl std::error::Error for UnknownFieldKindError {}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest registered kind name
pub fn find_closest_kind(name: &str, available: &[String]) -> Option<String> {
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for kind_name in available {
        let distance = levenshtein_distance(name, kind_name);

        // 1-2 character typos for short names, up to 3 for longer ones
        let threshold = if name.len() < 5 { 2 } else { 3 };

        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(kind_name.clone());
        }
    }

    best_match
}
