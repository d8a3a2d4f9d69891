//! Voting maps such as longevity, sillage or gender votes.
//!
//! Current items are `category:votes:percent`. Legacy items are
//! `category:value`, the single value standing in for both.

use crate::codec::resolver;
use crate::codec::scalar::{Tally, to_float};
use crate::codec::tokenizer::{ITEM_SEP, TOKEN_SEP, split, split_items};
use crate::codec::types::{VotingEntry, VotingField};
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str) -> VotingField {
    resolver::decode_as::<VotingField>(raw, SchemaVersion::Unknown, None).into_value()
}

pub fn encode(field: &VotingField) -> String {
    field
        .entries
        .iter()
        .map(|e| format!("{}{sep}{}{sep}{}", e.category, e.votes, e.percent, sep = TOKEN_SEP))
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

pub(crate) fn decode_items(raw: &str, tally: &mut Tally) -> VotingField {
    let mut field = VotingField::default();

    for item in split_items(raw, ITEM_SEP) {
        let tokens = split(item.trim(), TOKEN_SEP);
        let category = tokens.first().map(|t| t.trim()).unwrap_or_default();
        if category.is_empty() || tokens.len() < 2 {
            tally.flag_malformed();
            continue;
        }

        let (votes, percent) = if tokens.len() == 2 {
            (tally.int(tokens[1], 0), to_float(tokens[1], 0.0))
        } else {
            (tally.int(tokens[1], 0), tally.float(tokens[2], 0.0))
        };

        field.insert(VotingEntry {
            category: category.to_string(),
            votes,
            percent,
        });
    }

    field
}
