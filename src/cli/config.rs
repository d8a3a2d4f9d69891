use fragdb_codec::{CodecError, FieldKind, ReferenceRegistry, SchemaVersion};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::global::GlobalArgs;

/// Loads reference tables with user overrides, plus the `--references` file if given.
pub fn load_registry(references: Option<&str>) -> Result<ReferenceRegistry, CodecError> {
    let mut registry = ReferenceRegistry::load_with_overrides()?;

    if let Some(path) = references {
        let expanded = shellexpand::tilde(path);
        let extra = ReferenceRegistry::load_from_file(Path::new(expanded.as_ref()))?;
        registry.merge(extra);
    }

    Ok(registry)
}

/// Resolves a kind name, with a "did you mean" hint on a miss.
pub fn parse_kind(name: &str) -> Result<FieldKind, CodecError> {
    Ok(FieldKind::lookup(name)?)
}

/// `--schema` if given, otherwise the configured default version.
pub fn parse_version(
    schema: Option<&str>,
    registry: &ReferenceRegistry,
) -> Result<SchemaVersion, CodecError> {
    match schema {
        Some(tag) => tag.parse(),
        None => Ok(registry.settings.default_version),
    }
}

/// Reads command input.
///
/// `input` is a file path when one exists, literal text otherwise. With no
/// input, or `-`, reads stdin. Sizes are checked against `--max-size`.
pub fn read_input(
    input: Option<&str>,
    global: &GlobalArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(text) if text != "-" => {
            let expanded = shellexpand::tilde(text);
            let path = Path::new(expanded.as_ref());
            if path.is_file() {
                check_file_size(path, global)?;
                Ok(fs::read_to_string(path)?)
            } else {
                Ok(text.to_string())
            }
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;

            // Check stdin size after reading
            if global.max_size > 0 && buffer.len() > global.max_size && !global.force {
                return Err(format!(
                    "Input size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
                    buffer.len(),
                    global.max_size
                )
                .into());
            }

            Ok(buffer)
        }
    }
}

fn check_file_size(path: &Path, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    if global.max_size == 0 {
        return Ok(());
    }

    let file_size = fs::metadata(path)?.len() as usize;
    if file_size <= global.max_size {
        return Ok(());
    }

    if global.force {
        if !global.quiet {
            eprintln!(
                "Warning: Processing large file ({} bytes, limit: {} bytes)",
                file_size, global.max_size
            );
        }
        Ok(())
    } else {
        Err(format!(
            "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
            file_size, global.max_size
        )
        .into())
    }
}
