//! Rating summaries: `average;votes`.

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ITEM_SEP, split};
use crate::codec::types::RatingSummary;
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str) -> RatingSummary {
    resolver::decode_as::<RatingSummary>(raw, SchemaVersion::Unknown, None).into_value()
}

pub fn encode(rating: &RatingSummary) -> String {
    format!("{}{}{}", rating.average, ITEM_SEP, rating.votes)
}

/// Missing parts take their zero default; tokens past the second are ignored.
pub(crate) fn decode_tokens(raw: &str, tally: &mut Tally) -> RatingSummary {
    let tokens = split(raw, ITEM_SEP);
    RatingSummary {
        average: tokens.first().map_or(0.0, |t| tally.float(t, 0.0)),
        votes: tokens.get(1).map_or(0, |t| tally.int(t, 0)),
    }
}
