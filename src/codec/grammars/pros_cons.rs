//! Pros and cons: `pros(text,likes,dislikes;...)cons(...)`.
//!
//! Either segment may be missing and they can appear in any order. Vote
//! counts are read from the right so a comma inside the text survives.

use regex::Regex;
use std::sync::LazyLock;

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ENTRY_SEP, ITEM_SEP, split_items};
use crate::codec::types::{Opinion, ProsCons};
use crate::core::version::SchemaVersion;

static SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(pros|cons)\(([^)]*)\)").unwrap_or_else(|_| unreachable!())
});

pub fn decode(raw: &str) -> ProsCons {
    resolver::decode_as::<ProsCons>(raw, SchemaVersion::Unknown, None).into_value()
}

/// Writes only the non-empty segments, pros first.
pub fn encode(value: &ProsCons) -> String {
    let mut out = String::new();
    for (keyword, opinions) in [("pros", &value.pros), ("cons", &value.cons)] {
        if opinions.is_empty() {
            continue;
        }
        let entries: Vec<String> = opinions
            .iter()
            .map(|o| format!("{}{sep}{}{sep}{}", o.text, o.likes, o.dislikes, sep = ENTRY_SEP))
            .collect();
        out.push_str(keyword);
        out.push('(');
        out.push_str(&entries.join(&ITEM_SEP.to_string()));
        out.push(')');
    }
    out
}

pub(crate) fn has_segment(raw: &str) -> bool {
    SEGMENT_PATTERN.is_match(raw)
}

/// A repeated segment replaces the earlier one.
pub(crate) fn decode_segments(raw: &str, tally: &mut Tally) -> ProsCons {
    let mut value = ProsCons::default();

    for caps in SEGMENT_PATTERN.captures_iter(raw) {
        let (Some(keyword), Some(content)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let opinions = split_items(content.as_str(), ITEM_SEP)
            .filter_map(|entry| decode_opinion(entry, tally))
            .collect();

        if keyword.as_str() == "pros" {
            value.pros = opinions;
        } else {
            value.cons = opinions;
        }
    }

    value
}

fn decode_opinion(entry: &str, tally: &mut Tally) -> Option<Opinion> {
    let mut parts: Vec<&str> = entry.rsplitn(3, ENTRY_SEP).collect();
    if parts.len() < 3 {
        tally.flag_malformed();
        return None;
    }
    parts.reverse();

    Some(Opinion {
        text: parts[0].trim().to_string(),
        likes: tally.int(parts[1], 0),
        dislikes: tally.int(parts[2], 0),
    })
}
