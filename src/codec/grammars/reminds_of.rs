//! "Reminds me of" cross-references: `pid:likes:dislikes` or a bare `pid`.

use crate::codec::resolver;
use crate::codec::scalar::{Tally, is_digits_only};
use crate::codec::tokenizer::{ITEM_SEP, TOKEN_SEP, split, split_items};
use crate::codec::types::RemindsOfEntry;
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str) -> Vec<RemindsOfEntry> {
    resolver::decode_as::<Vec<RemindsOfEntry>>(raw, SchemaVersion::Unknown, None).into_value()
}

pub fn encode(entries: &[RemindsOfEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}{sep}{}{sep}{}", e.pid, e.likes, e.dislikes, sep = TOKEN_SEP))
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

pub(crate) fn decode_items(raw: &str, tally: &mut Tally) -> Vec<RemindsOfEntry> {
    let mut entries = Vec::new();

    for item in split_items(raw, ITEM_SEP) {
        let tokens = split(item.trim(), TOKEN_SEP);
        let pid = tokens
            .first()
            .map(|t| t.trim())
            .filter(|t| is_digits_only(t))
            .and_then(|t| t.parse::<i64>().ok());
        let Some(pid) = pid else {
            tally.flag_malformed();
            continue;
        };

        let entry = match tokens.len() {
            1 => RemindsOfEntry {
                pid,
                ..Default::default()
            },
            2 => {
                tally.flag_malformed();
                RemindsOfEntry {
                    pid,
                    ..Default::default()
                }
            }
            _ => RemindsOfEntry {
                pid,
                likes: tally.int(tokens[1], 0),
                dislikes: tally.int(tokens[2], 0),
            },
        };
        entries.push(entry);
    }

    entries
}
