use crate::cli::{
    args::{ConfigAction, ConfigCategory},
    config::parse_kind,
    global::GlobalArgs,
};
use fragdb_codec::{FieldKind, ReferenceRegistry, registry};

pub fn handle(
    action: ConfigAction,
    _global: &GlobalArgs,
    config: &ReferenceRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::List { category, json } => handle_list(category, json, config),
        ConfigAction::Show { kind } => handle_show(&kind, config),
    }
}

fn sorted_keys<V>(map: &std::collections::HashMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

fn handle_list(
    category: Option<ConfigCategory>,
    json: bool,
    config: &ReferenceRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    // Collect all data
    let kind_list = FieldKind::names();
    let column_list: Vec<String> = config
        .columns
        .iter()
        .map(|(column, kind)| format!("{}={}", column, kind))
        .collect();
    let accord_list = sorted_keys(&config.accords);
    let note_list = sorted_keys(&config.notes);

    // JSON output
    if json {
        let output = match category {
            Some(ConfigCategory::Kinds) => serde_json::json!({ "kinds": kind_list }),
            Some(ConfigCategory::Columns) => serde_json::json!({ "columns": config.columns }),
            Some(ConfigCategory::Accords) => serde_json::json!({ "accords": accord_list }),
            Some(ConfigCategory::Notes) => serde_json::json!({ "notes": note_list }),
            None => serde_json::json!({
                "kinds": kind_list,
                "columns": config.columns,
                "accords": accord_list,
                "notes": note_list,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    // Comma-separated output for specific categories
    match category {
        Some(ConfigCategory::Kinds) => {
            println!("{}", kind_list.join(","));
        }
        Some(ConfigCategory::Columns) => {
            println!("{}", column_list.join(","));
        }
        Some(ConfigCategory::Accords) => {
            println!("{}", accord_list.join(","));
        }
        Some(ConfigCategory::Notes) => {
            println!("{}", note_list.join(","));
        }
        None => {
            // Human-readable format for all
            println!("Field kinds: {}", kind_list.join(", "));
            println!("Mapped columns: {}", config.columns.len());
            println!("Reference accords: {} available", accord_list.len());
            println!("Reference notes: {} available", note_list.len());
            println!("Default schema version: {}", config.settings.default_version);
            println!("\nUse 'config list kinds|columns|accords|notes' for machine-readable output");
            println!("Use --json for structured output");
        }
    }

    Ok(())
}

fn handle_show(name: &str, config: &ReferenceRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let kind = parse_kind(name)?;

    println!("Field kind: {}", kind);

    for grammar in registry::grammars_for(kind) {
        println!("  {}{}", grammar.id(), if grammar.is_current() { " (current)" } else { "" });
        println!("    Syntax: {}", grammar.syntax);
        println!("    Shape: {}", grammar.shape);
        if let Some(item) = grammar.item_delimiter {
            println!("    Items: '{}'  Tokens: '{}'", item, grammar.token_delimiter);
        } else {
            println!("    Tokens: '{}'", grammar.token_delimiter);
        }
    }

    let columns: Vec<&str> = config
        .columns
        .iter()
        .filter(|(_, mapped)| FieldKind::lookup(mapped).is_ok_and(|k| k == kind))
        .map(|(column, _)| column.as_str())
        .collect();
    if !columns.is_empty() {
        println!("  Columns: {}", columns.join(", "));
    }

    Ok(())
}
