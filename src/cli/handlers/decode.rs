use crate::cli::{
    args::DecodeArgs,
    config::{parse_kind, parse_version, read_input},
    global::GlobalArgs,
};
use fragdb_codec::{CodecError, DecodeMode, ReferenceRegistry, resolve};

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    registry: &ReferenceRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = parse_kind(&args.kind)?;
    let version = parse_version(args.schema.as_deref(), registry)?;
    let input = read_input(args.input.as_deref(), global)?;

    let resolution = resolve(kind, &input, version, Some(registry));
    let malformed = resolution.decoded.malformed();
    let mode = DecodeMode::from_strict(args.strict || registry.settings.strict);

    if malformed > 0 {
        if mode == DecodeMode::Strict {
            return Err(CodecError::Malformed { kind, malformed }.into());
        }
        if !global.quiet {
            eprintln!(
                "Warning: {} token(s) in {} field replaced with defaults",
                malformed, kind
            );
        }
    }

    let output = serde_json::json!({
        "kind": kind,
        "grammar": resolution.grammar.map(|g| g.id()),
        "malformed": malformed,
        "value": resolution.decoded.value().to_json_value()?,
    });

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}
