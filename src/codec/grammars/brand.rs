//! Brand references.
//!
//! Told apart by token count alone: `name;id` is current, `name;url;logo`
//! and a bare `name` are legacy.

use crate::codec::resolver;
use crate::codec::tokenizer::{ITEM_SEP, non_blank, split};
use crate::codec::types::{BrandLink, BrandRef};
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

pub fn decode(raw: &str, lookup: Option<&dyn ReferenceLookup>) -> BrandRef {
    resolver::decode_as::<BrandRef>(raw, SchemaVersion::Unknown, lookup).into_value()
}

/// Canonical `name;id`. A legacy page link is not representable and is
/// written with an empty id.
pub fn encode(brand: &BrandRef) -> String {
    let id = brand.id().unwrap_or_default();
    if brand.name.is_empty() && id.is_empty() {
        return String::new();
    }
    format!("{}{}{}", brand.name, ITEM_SEP, id)
}

pub(crate) fn decode_current(raw: &str, lookup: Option<&dyn ReferenceLookup>) -> BrandRef {
    let tokens = split(raw, ITEM_SEP);
    let id = tokens.get(1).and_then(|t| non_blank(t));
    let mut name = tokens.first().map(|t| t.trim().to_string()).unwrap_or_default();

    if name.is_empty() {
        if let Some(info) = id.as_deref().and_then(|id| lookup.and_then(|l| l.brand(id))) {
            name = info.name.clone();
        }
    }

    BrandRef {
        name,
        link: id.map_or(BrandLink::None, BrandLink::Id),
    }
}

pub(crate) fn decode_legacy(raw: &str) -> BrandRef {
    let tokens = split(raw, ITEM_SEP);
    let part = |i: usize| tokens.get(i).map(|t| t.trim().to_string()).unwrap_or_default();
    let (name, url, logo) = (part(0), part(1), part(2));

    let link = if url.is_empty() && logo.is_empty() {
        BrandLink::None
    } else {
        BrandLink::Page { url, logo }
    };

    BrandRef { name, link }
}
