//! Accord lists.
//!
//! Current rows: `id:pct;id:pct`, with names and colors coming from the
//! accord reference table. Legacy rows: `name:pct:bgColor:fontColor;...`.

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ITEM_SEP, TOKEN_SEP, non_blank, split, split_items};
use crate::codec::types::AccordEntry;
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

/// Decodes an accord list of any known version.
pub fn decode(raw: &str, lookup: Option<&dyn ReferenceLookup>) -> Vec<AccordEntry> {
    resolver::decode_as::<Vec<AccordEntry>>(raw, SchemaVersion::Unknown, lookup).into_value()
}

/// Canonical `id:pct;id:pct` form.
///
/// An entry without an id writes its name in the id slot. Colors are never
/// written; they belong to the reference table.
pub fn encode(entries: &[AccordEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let id = entry
                .id
                .as_deref()
                .or(entry.name.as_deref())
                .unwrap_or_default();
            format!("{}{}{}", id, TOKEN_SEP, entry.percentage)
        })
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

pub(crate) fn decode_current(
    raw: &str,
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Vec<AccordEntry> {
    split_items(raw, ITEM_SEP)
        .filter_map(|item| {
            let tokens = split(item.trim(), TOKEN_SEP);
            // A legacy item can survive inside a current row.
            if tokens.len() >= 4 {
                legacy_entry(&tokens, lookup, tally)
            } else {
                current_entry(&tokens, lookup, tally)
            }
        })
        .collect()
}

pub(crate) fn decode_legacy(
    raw: &str,
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Vec<AccordEntry> {
    split_items(raw, ITEM_SEP)
        .filter_map(|item| legacy_entry(&split(item.trim(), TOKEN_SEP), lookup, tally))
        .collect()
}

fn current_entry(
    tokens: &[&str],
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Option<AccordEntry> {
    let Some(id) = tokens.first().and_then(|t| non_blank(t)) else {
        tally.flag_malformed();
        return None;
    };
    if tokens.len() < 2 {
        tally.flag_malformed();
        return None;
    }
    if tokens.len() > 2 {
        tally.flag_malformed();
    }

    let percentage = tally.percentage(tokens[1]);
    let info = lookup.and_then(|l| l.accord(&id));

    Some(AccordEntry {
        name: info.map(|i| i.name.clone()),
        bg_color: info.and_then(|i| i.bg_color.clone()),
        font_color: info.and_then(|i| i.font_color.clone()),
        id: Some(id),
        percentage,
    })
}

fn legacy_entry(
    tokens: &[&str],
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Option<AccordEntry> {
    let Some(name) = tokens.first().and_then(|t| non_blank(t)) else {
        tally.flag_malformed();
        return None;
    };
    if tokens.len() < 2 {
        tally.flag_malformed();
        return None;
    }

    let percentage = tally.percentage(tokens[1]);
    let id = lookup
        .and_then(|l| l.accord_id_for_name(&name))
        .map(str::to_string);

    Some(AccordEntry {
        id,
        percentage,
        bg_color: tokens.get(2).and_then(|t| non_blank(t)),
        font_color: tokens.get(3).and_then(|t| non_blank(t)),
        name: Some(name),
    })
}
