use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

use crate::codec::errors::{CodecError, UnknownFieldKindError};
use crate::core::kind::FieldKind;
use crate::core::reference::{AccordInfo, BrandInfo, NoteInfo, PerfumerInfo, ReferenceLookup};
use crate::core::version::SchemaVersion;

/// Global settings for fragdb-codec.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Version assumed when a caller does not declare one
    #[serde(default)]
    pub default_version: SchemaVersion,
    /// Reject fields that decoded with substituted defaults
    #[serde(default)]
    pub strict: bool,
}

/// Reference tables and column mappings loaded from TOML.
///
/// Doubles as the crate's stock [`ReferenceLookup`] implementation.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReferenceRegistry {
    #[serde(default)]
    pub settings: Settings,
    /// Accord id → display attributes
    #[serde(default)]
    pub accords: HashMap<String, AccordInfo>,
    /// Note id → botanical attributes
    #[serde(default)]
    pub notes: HashMap<String, NoteInfo>,
    #[serde(default)]
    pub brands: HashMap<String, BrandInfo>,
    #[serde(default)]
    pub perfumers: HashMap<String, PerfumerInfo>,
    /// Dataset column name → field kind name
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl ReferenceRegistry {
    /// Parses reference tables from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, CodecError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the built-in reference tables.
    pub fn load_default() -> Result<Self, CodecError> {
        let content = include_str!("../../references.toml");
        Self::from_toml(content)
    }

    /// Loads reference tables from a custom file path.
    ///
    /// Column mappings are checked here, so a bad `[columns]` entry is
    /// reported when the file loads rather than on the first row.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, CodecError> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_toml(&content)?;
        registry.validate_columns()?;
        Ok(registry)
    }

    /// Loads the built-in tables with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in tables (from library)
    /// 2. `~/.config/fragdb-codec/references.toml` (user overrides)
    /// 3. `./references.toml` (project-local overrides)
    ///
    /// Later files override earlier ones for matching keys. A file that fails
    /// to parse is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, CodecError> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("fragdb-codec").join("references.toml");
            if user_config_path.exists() {
                match Self::load_from_file(&user_config_path) {
                    Ok(user_config) => config.merge(user_config),
                    Err(e) => {
                        tracing::warn!(path = ?user_config_path, error = %e, "failed to load user references");
                    }
                }
            }
        }

        let local_config_path = std::path::Path::new("references.toml");
        if local_config_path.exists() {
            match Self::load_from_file(local_config_path) {
                Ok(local_config) => config.merge(local_config),
                Err(e) => {
                    tracing::warn!(path = ?local_config_path, error = %e, "failed to load local references");
                }
            }
        }

        Ok(config)
    }

    /// Merges another registry into this one.
    ///
    /// Entries from `other` replace entries with the same key; settings are
    /// taken from `other` wholesale.
    pub fn merge(&mut self, other: ReferenceRegistry) {
        self.settings = other.settings;
        self.accords.extend(other.accords);
        self.notes.extend(other.notes);
        self.brands.extend(other.brands);
        self.perfumers.extend(other.perfumers);
        self.columns.extend(other.columns);
    }

    /// Field kind mapped to a dataset column, if any.
    pub fn column_kind(&self, column: &str) -> Result<Option<FieldKind>, UnknownFieldKindError> {
        self.columns
            .get(column)
            .map(|name| FieldKind::lookup(name))
            .transpose()
    }

    /// Checks that every column mapping names a registered kind.
    pub fn validate_columns(&self) -> Result<(), UnknownFieldKindError> {
        for name in self.columns.values() {
            FieldKind::lookup(name)?;
        }
        Ok(())
    }
}

impl ReferenceLookup for ReferenceRegistry {
    fn accord(&self, id: &str) -> Option<&AccordInfo> {
        self.accords.get(id)
    }

    fn accord_id_for_name(&self, name: &str) -> Option<&str> {
        self.accords
            .iter()
            .find(|(_, info)| info.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id.as_str())
    }

    fn note(&self, id: &str) -> Option<&NoteInfo> {
        self.notes.get(id)
    }

    fn brand(&self, id: &str) -> Option<&BrandInfo> {
        self.brands.get(id)
    }

    fn perfumer(&self, id: &str) -> Option<&PerfumerInfo> {
        self.perfumers.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = ReferenceRegistry::load_default().unwrap();
        assert!(config.accords.contains_key("a24"));
        assert_eq!(config.settings.default_version, SchemaVersion::Unknown);
        assert!(!config.settings.strict);
    }

    #[test]
    fn test_default_columns_are_valid() {
        let config = ReferenceRegistry::load_default().unwrap();
        config.validate_columns().unwrap();
        assert_eq!(
            config.column_kind("longevity").unwrap(),
            Some(FieldKind::Voting)
        );
        assert_eq!(config.column_kind("name").unwrap(), None);
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let config = ReferenceRegistry::load_default().unwrap();
        assert_eq!(config.accord("a24").unwrap().name, "woody");
        assert_eq!(config.accord_id_for_name("Woody"), Some("a24"));
        assert_eq!(
            config.note("n1").unwrap().latin_name.as_deref(),
            Some("Citrus bergamia")
        );
        assert_eq!(config.brand("b3").unwrap().name, "Dior");
        assert!(config.perfumer("p0").is_none());
    }

    #[test]
    fn test_load_from_toml_string() {
        let toml_content = r#"
[settings]
default_version = "v2"
strict = true

[accords.x1]
name = "smoky"

[columns]
mood = "percentage"
"#;
        let config = ReferenceRegistry::from_toml(toml_content).unwrap();
        assert_eq!(config.settings.default_version, SchemaVersion::V2);
        assert!(config.settings.strict);
        assert_eq!(config.accord("x1").unwrap().bg_color, None);
        assert_eq!(
            config.column_kind("mood").unwrap(),
            Some(FieldKind::Percentage)
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ReferenceRegistry::from_toml("[accords.x1\nname=").unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_unknown_column_kind_is_reported() {
        let config = ReferenceRegistry::from_toml("[columns]\nmood = \"votng\"").unwrap();
        let err = config.validate_columns().unwrap_err();
        assert_eq!(err.suggestion.as_deref(), Some("voting"));
        assert!(config.column_kind("mood").is_err());
    }

    #[test]
    fn test_file_with_unknown_column_kind_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[columns]\nmood = \"votng\"").unwrap();

        let err = ReferenceRegistry::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownKind(_)));
    }

    #[test]
    fn test_merge_configs() {
        let mut base = ReferenceRegistry::load_default().unwrap();
        let other = ReferenceRegistry::from_toml(
            r#"
[accords.a24]
name = "woody (dark)"

[accords.a99]
name = "oud"
"#,
        )
        .unwrap();

        let before = base.accords.len();
        base.merge(other);

        assert_eq!(base.accords.len(), before + 1);
        assert_eq!(base.accord("a24").unwrap().name, "woody (dark)");
        assert_eq!(base.accord("a99").unwrap().name, "oud");
        assert!(base.accord("a34").is_some());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[notes.n9]\nname = \"Vetiver\"\ngroup = \"woods\"").unwrap();

        let config = ReferenceRegistry::load_from_file(file.path()).unwrap();
        assert_eq!(config.note("n9").unwrap().group.as_deref(), Some("woods"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ReferenceRegistry::load_from_file(std::path::Path::new(
            "/nonexistent/references.toml",
        ))
        .unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
