//! Layered note pyramids.
//!
//! A field is a run of `layer(content)` groups, layer being one of `top`,
//! `mid`, `base` or `notes`. Text outside a recognised group is ignored.
//! Content is a `;`-separated list of comma entries:
//!
//! - v3: `name,id,image,opacity,weight`
//! - v1: `name,url,image`
//!
//! Both versions decode through the same entry reader, so a v3 field with a
//! few 3- or 4-token stragglers still reads them in the v1 shape.

use regex::Regex;
use std::sync::LazyLock;

use crate::codec::resolver;
use crate::codec::scalar::Tally;
use crate::codec::tokenizer::{ENTRY_SEP, ITEM_SEP, non_blank, split, split_items};
use crate::codec::types::{Layer, NoteEntry, NotesPyramid};
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

static LAYER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(top|mid|base|notes)\(([^)]*)\)").unwrap_or_else(|_| unreachable!())
});

/// Decodes a notes pyramid of any known version.
pub fn decode(raw: &str, lookup: Option<&dyn ReferenceLookup>) -> NotesPyramid {
    resolver::decode_as::<NotesPyramid>(raw, SchemaVersion::Unknown, lookup).into_value()
}

/// Canonical v3 form: `top(name,id,image,opacity,weight;...)mid(...)`.
///
/// Latin names and groups are never written.
pub fn encode(pyramid: &NotesPyramid) -> String {
    let mut out = String::new();
    for layer in &pyramid.layers {
        let entries: Vec<String> = layer
            .notes
            .iter()
            .map(|note| {
                [
                    note.name.clone(),
                    note.id.clone().unwrap_or_default(),
                    note.image.clone().unwrap_or_default(),
                    note.opacity.to_string(),
                    note.weight.to_string(),
                ]
                .join(&ENTRY_SEP.to_string())
            })
            .collect();
        out.push_str(layer.layer.as_str());
        out.push('(');
        out.push_str(&entries.join(&ITEM_SEP.to_string()));
        out.push(')');
    }
    out
}

/// Recognised `layer(content)` groups in source order.
pub(crate) fn layer_groups(raw: &str) -> Vec<(Layer, &str)> {
    LAYER_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| {
            let layer = Layer::from_keyword(caps.get(1)?.as_str())?;
            Some((layer, caps.get(2)?.as_str()))
        })
        .collect()
}

pub(crate) fn decode_layers(
    raw: &str,
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> NotesPyramid {
    let mut pyramid = NotesPyramid::default();

    for (layer, content) in layer_groups(raw) {
        let notes = split_items(content, ITEM_SEP)
            .filter_map(|entry| decode_entry(entry, lookup, tally))
            .collect();
        pyramid.insert(layer, notes);
    }

    pyramid
}

fn decode_entry(
    entry: &str,
    lookup: Option<&dyn ReferenceLookup>,
    tally: &mut Tally,
) -> Option<NoteEntry> {
    let tokens = split(entry.trim(), ENTRY_SEP);
    if tokens.len() < 3 {
        tally.flag_malformed();
        return None;
    }

    let Some(name) = non_blank(tokens[0]) else {
        tally.flag_malformed();
        return None;
    };

    let mut note = NoteEntry {
        name,
        id: non_blank(tokens[1]),
        image: non_blank(tokens[2]),
        ..Default::default()
    };

    if tokens.len() >= 5 {
        note.opacity = tally.float_or_blank(tokens[3], 1.0);
        note.weight = tally.float_or_blank(tokens[4], 1.0);
    }

    if let Some(info) = note
        .id
        .as_deref()
        .and_then(|id| lookup.and_then(|l| l.note(id)))
    {
        note.latin_name = info.latin_name.clone();
        note.group = info.group.clone();
    }

    Some(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::NoteInfo;

    struct Bergamot(NoteInfo);

    impl ReferenceLookup for Bergamot {
        fn note(&self, id: &str) -> Option<&NoteInfo> {
            (id == "n1").then_some(&self.0)
        }
    }

    #[test]
    fn test_unknown_layers_are_ignored() {
        let pyramid = decode("top(a,n1,i,1,1)unknown(x,y,z)mid(b,n2,i,.5,.5)", None);
        assert_eq!(pyramid.layer_names(), vec![Layer::Top, Layer::Mid]);
        let mid = pyramid.get(Layer::Mid).unwrap();
        assert_eq!(mid[0].name, "b");
        assert_eq!(mid[0].opacity, 0.5);
        assert_eq!(mid[0].weight, 0.5);
    }

    #[test]
    fn test_layer_keyword_needs_no_word_boundary() {
        let pyramid = decode("_top(a,n1,i,1,1)1mid(b,n2,i,1,1)", None);
        assert_eq!(pyramid.layer_names(), vec![Layer::Top, Layer::Mid]);
    }

    #[test]
    fn test_legacy_entries_default_to_one() {
        let pyramid = decode("top(Bergamot,https://x/n1,img.jpg;Lemon,,)", None);
        let top = pyramid.get(Layer::Top).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].opacity, 1.0);
        assert_eq!(top[0].weight, 1.0);
        assert_eq!(top[1].id, None);
        assert_eq!(top[1].image, None);
    }

    #[test]
    fn test_blank_opacity_and_weight_are_one() {
        let mut tally = Tally::new();
        let pyramid = decode_layers("base(Musk,n9,i,,)", None, &mut tally);
        let base = pyramid.get(Layer::Base).unwrap();
        assert_eq!(base[0].opacity, 1.0);
        assert_eq!(base[0].weight, 1.0);
        assert_eq!(tally.malformed(), 0);
    }

    #[test]
    fn test_short_entries_in_current_field_fall_back() {
        let mut tally = Tally::new();
        let pyramid = decode_layers("top(a,n1,i,.8,.2;b,n2,i;c,n3,i,x;d)", None, &mut tally);
        let top = pyramid.get(Layer::Top).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].opacity, 0.8);
        assert_eq!(top[1].weight, 1.0);
        assert_eq!(top[2].opacity, 1.0);
        assert_eq!(tally.malformed(), 1);
    }

    #[test]
    fn test_repeated_layer_keeps_first_position() {
        let pyramid = decode("top(a,n1,i,1,1)mid(b,n2,i,1,1)top(c,n3,i,1,1)", None);
        assert_eq!(pyramid.layer_names(), vec![Layer::Top, Layer::Mid]);
        assert_eq!(pyramid.get(Layer::Top).unwrap()[0].name, "c");
    }

    #[test]
    fn test_flat_notes_layer() {
        let pyramid = decode("notes(Rose,n4,img,1,1;Oud,n5,img,1,0.5)", None);
        assert_eq!(pyramid.layer_names(), vec![Layer::Notes]);
        assert_eq!(pyramid.get(Layer::Notes).unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_fills_latin_name_and_group() {
        let table = Bergamot(NoteInfo {
            latin_name: Some("Citrus bergamia".into()),
            group: Some("citrus".into()),
            ..Default::default()
        });
        let pyramid = decode("top(Bergamot,n1,img,1,1)", Some(&table));
        let note = &pyramid.get(Layer::Top).unwrap()[0];
        assert_eq!(note.latin_name.as_deref(), Some("Citrus bergamia"));
        assert_eq!(note.group.as_deref(), Some("citrus"));
    }

    #[test]
    fn test_encode_canonical() {
        let raw = "top(Bergamot,n1,img,1,0.5)base(Musk,n9,,0.25,1)";
        assert_eq!(encode(&decode(raw, None)), raw);
    }

    #[test]
    fn test_encode_upgrades_legacy() {
        let pyramid = decode("top(Bergamot,u,img)", None);
        assert_eq!(encode(&pyramid), "top(Bergamot,u,img,1,1)");
    }
}
