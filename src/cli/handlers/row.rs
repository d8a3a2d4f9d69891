use crate::cli::{
    args::RowArgs,
    config::{parse_version, read_input},
    global::GlobalArgs,
};
use fragdb_codec::{ColumnJson, ReferenceRegistry, decode_row, zip_header};

pub fn handle(
    args: RowArgs,
    global: &GlobalArgs,
    registry: &ReferenceRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let version = parse_version(args.schema.as_deref(), registry)?;
    let input = read_input(args.input.as_deref(), global)?;

    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or("Missing header line")?;
    let values = lines.next().ok_or("Missing value line")?;

    let columns = zip_header(header, values);
    let row = decode_row(&columns, version, registry)?;

    let malformed: usize = row.iter().map(|(_, value)| value.malformed()).sum();
    if malformed > 0 && !global.quiet {
        eprintln!("Warning: {} token(s) in row replaced with defaults", malformed);
    }

    let output: Vec<serde_json::Value> = row
        .iter()
        .map(|(name, value)| {
            serde_json::json!({
                "column": name,
                "decoded": ColumnJson::from(value),
            })
        })
        .collect();

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}
