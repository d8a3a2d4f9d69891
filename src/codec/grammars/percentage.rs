//! Generic percentage maps (season, time of day): `category:value;...`.

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ITEM_SEP, TOKEN_SEP, split, split_items};
use crate::codec::types::PercentageMap;
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str) -> PercentageMap {
    resolver::decode_as::<PercentageMap>(raw, SchemaVersion::Unknown, None).into_value()
}

pub fn encode(map: &PercentageMap) -> String {
    map.entries
        .iter()
        .map(|e| format!("{}{}{}", e.category, TOKEN_SEP, e.value))
        .collect::<Vec<_>>()
        .join(&ITEM_SEP.to_string())
}

pub(crate) fn decode_items(raw: &str, tally: &mut Tally) -> PercentageMap {
    let mut map = PercentageMap::default();

    for item in split_items(raw, ITEM_SEP) {
        let tokens = split(item.trim(), TOKEN_SEP);
        let category = tokens.first().map(|t| t.trim()).unwrap_or_default();
        if category.is_empty() || tokens.len() < 2 {
            tally.flag_malformed();
            continue;
        }
        let value = tally.float(tokens[1], 0.0);
        map.insert(category, value);
    }

    map
}
