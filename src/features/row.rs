use serde::Serialize;

use crate::codec::errors::UnknownFieldKindError;
use crate::codec::resolver::decode_field;
use crate::codec::types::{Decoded, FieldValue};
use crate::core::config::ReferenceRegistry;
use crate::core::kind::FieldKind;
use crate::core::version::SchemaVersion;

/// One column of a decoded row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// A column mapped to a field kind
    Field {
        kind: FieldKind,
        decoded: Decoded<FieldValue>,
    },
    /// A plain column, passed through untouched
    Raw(String),
}

impl ColumnValue {
    pub fn malformed(&self) -> usize {
        match self {
            ColumnValue::Field { decoded, .. } => decoded.malformed(),
            ColumnValue::Raw(_) => 0,
        }
    }
}

/// JSON shape of a decoded column.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ColumnJson<'a> {
    Field {
        kind: FieldKind,
        value: &'a FieldValue,
        malformed: usize,
    },
    Raw(&'a str),
}

impl<'a> From<&'a ColumnValue> for ColumnJson<'a> {
    fn from(column: &'a ColumnValue) -> Self {
        match column {
            ColumnValue::Field { kind, decoded } => ColumnJson::Field {
                kind: *kind,
                value: decoded.value(),
                malformed: decoded.malformed(),
            },
            ColumnValue::Raw(raw) => ColumnJson::Raw(raw),
        }
    }
}

/// Decodes the structured columns of one already-split row.
///
/// Columns are matched against the registry's `[columns]` mapping; unmapped
/// columns come back as [`ColumnValue::Raw`]. A mapping that names an
/// unregistered kind is a configuration mistake and fails the row.
pub fn decode_row(
    columns: &[(&str, &str)],
    version: SchemaVersion,
    registry: &ReferenceRegistry,
) -> Result<Vec<(String, ColumnValue)>, UnknownFieldKindError> {
    let mut decoded = Vec::with_capacity(columns.len());

    for (name, raw) in columns {
        let value = match registry.column_kind(name)? {
            Some(kind) => ColumnValue::Field {
                kind,
                decoded: decode_field(kind, raw, version, Some(registry)),
            },
            None => ColumnValue::Raw(raw.to_string()),
        };
        decoded.push((name.to_string(), value));
    }

    let malformed: usize = decoded.iter().map(|(_, v)| v.malformed()).sum();
    if malformed > 0 {
        tracing::debug!(columns = columns.len(), malformed, "row decoded with substituted defaults");
    }

    Ok(decoded)
}

/// Pairs a header line with a value line, both split on `|`.
///
/// Missing trailing values become empty strings; extra values are dropped.
pub fn zip_header<'a>(header: &'a str, values: &'a str) -> Vec<(&'a str, &'a str)> {
    let names = header.split('|').map(str::trim);
    let mut values = values.split('|');
    names
        .map(|name| (name, values.next().unwrap_or_default()))
        .collect()
}
