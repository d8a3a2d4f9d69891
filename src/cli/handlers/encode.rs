use crate::cli::{
    args::EncodeArgs,
    config::{parse_kind, read_input},
    global::GlobalArgs,
};
use fragdb_codec::{FieldValue, encode_field};

pub fn handle(args: EncodeArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind = parse_kind(&args.kind)?;
    let input = read_input(args.input.as_deref(), global)?;

    let value = FieldValue::from_json(kind, input.trim())?;
    println!("{}", encode_field(&value));

    Ok(())
}
