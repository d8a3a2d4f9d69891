//! Perfumer lists: `name;id;name;id;...`.

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ITEM_SEP, split};
use crate::codec::types::PerfumerRef;
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str, lookup: Option<&dyn ReferenceLookup>) -> Vec<PerfumerRef> {
    resolver::decode_as::<Vec<PerfumerRef>>(raw, SchemaVersion::Unknown, lookup).into_value()
}

pub fn encode(perfumers: &[PerfumerRef]) -> String {
    perfumers
        .iter()
        .map(|p| format!("{}{}{}", p.name, ITEM_SEP, p.id))
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

/// Pairs tokens left to right. A trailing unpaired token is dropped.
pub(crate) fn decode_pairs(
    raw: &str,
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Vec<PerfumerRef> {
    let tokens = split(raw, ITEM_SEP);
    let pairs = tokens.chunks_exact(2);

    if pairs.remainder().iter().any(|t| !t.trim().is_empty()) {
        tally.flag_malformed();
    }

    let mut perfumers = Vec::new();
    for pair in pairs {
        let (name, id) = (pair[0].trim(), pair[1].trim());
        if name.is_empty() && id.is_empty() {
            continue;
        }

        let name = match lookup.and_then(|l| l.perfumer(id)) {
            Some(info) if name.is_empty() => info.name.clone(),
            _ => name.to_string(),
        };

        perfumers.push(PerfumerRef {
            name,
            id: id.to_string(),
        });
    }

    perfumers
}
