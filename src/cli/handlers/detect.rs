use crate::cli::{
    args::DetectArgs,
    config::{parse_kind, read_input},
    global::GlobalArgs,
};
use fragdb_codec::{Form, GrammarDetector, ReferenceRegistry};

pub fn handle(
    args: DetectArgs,
    global: &GlobalArgs,
    registry: &ReferenceRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = parse_kind(&args.kind)?;
    let input = read_input(args.input.as_deref(), global)?;

    let detector = GrammarDetector::new(Some(registry));
    let matches = detector.detect(kind, &input);

    if args.json {
        let output: Vec<serde_json::Value> = matches
            .iter()
            .map(|m| {
                serde_json::json!({
                    "grammar": m.grammar.id(),
                    "current": m.grammar.form == Form::Current,
                    "confidence": m.confidence,
                    "malformed": m.malformed,
                    "syntax": m.grammar.syntax,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if matches.is_empty() {
        return Err(format!("No {} grammar fits the input", kind).into());
    }

    for m in &matches {
        let form = match m.grammar.form {
            Form::Current => "current",
            Form::Legacy => "legacy",
        };
        println!(
            "{:<22} {:<8} {:>5.1}%  malformed={:<3} {}",
            m.grammar.id(),
            form,
            m.confidence * 100.0,
            m.malformed,
            m.grammar.syntax
        );
    }

    Ok(())
}
