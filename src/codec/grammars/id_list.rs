//! Bare id lists: `id;id;id`.

use crate::codec::resolver;
use crate::codec::scalar::{Tally, is_digits_only};
use crate::codec::tokenizer::{ITEM_SEP, split_items};
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str) -> Vec<i64> {
    resolver::decode_as::<Vec<i64>>(raw, SchemaVersion::Unknown, None).into_value()
}

pub fn encode(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

/// Keeps all-digit tokens; anything else is dropped and counted.
pub(crate) fn decode_tokens(raw: &str, tally: &mut Tally) -> Vec<i64> {
    let mut ids = Vec::new();
    for token in split_items(raw, ITEM_SEP) {
        let token = token.trim();
        match token.parse::<i64>() {
            Ok(id) if is_digits_only(token) => ids.push(id),
            _ => tally.flag_malformed(),
        }
    }
    ids
}
