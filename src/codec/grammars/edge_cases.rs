use crate::codec::resolver::decode_field;
use crate::codec::types::{FieldValue, Layer};
use crate::core::kind::FieldKind;
use crate::core::version::SchemaVersion;

use super::*;

#[test]
fn test_whitespace_around_field_is_ignored() {
    assert_eq!(rating::decode("  4.5;10\n").votes, 10);
    assert_eq!(id_list::decode(" 1;2 "), vec![1, 2]);
}

#[test]
fn test_trailing_item_separators() {
    assert_eq!(accords::decode("a24:100;", None).len(), 1);
    assert_eq!(voting::decode(";;love:1:2;").len(), 1);
    assert_eq!(id_list::decode(";;5;"), vec![5]);
}

#[test]
fn test_separator_only_fields_decode_empty() {
    assert!(accords::decode(";;", None).is_empty());
    assert!(percentage::decode(";").is_empty());
}

#[test]
fn test_unicode_text_survives() {
    let pyramid = notes::decode("top(Fleur d'oranger,n7,img,1,1)", None);
    assert_eq!(pyramid.get(Layer::Top).unwrap()[0].name, "Fleur d'oranger");

    let brand = brand::decode("Maison Francis Kurkdjian;b77", None);
    assert_eq!(brand.name, "Maison Francis Kurkdjian");

    let value = pros_cons::decode("pros(Très élégant,5,0)");
    assert_eq!(value.pros[0].text, "Très élégant");
}

#[test]
fn test_unclosed_layer_is_ignored() {
    let pyramid = notes::decode("top(a,n1,i,1,1)mid(b,n2,i,1,1", None);
    assert_eq!(pyramid.layer_names(), vec![Layer::Top]);
}

#[test]
fn test_text_without_layers_is_default() {
    let decoded = decode_field(
        FieldKind::NotesPyramid,
        "Bergamot, Lemon, Musk",
        SchemaVersion::Unknown,
        None,
    );
    assert_eq!(decoded.malformed(), 1);
    assert_eq!(
        decoded.into_value(),
        FieldValue::empty(FieldKind::NotesPyramid)
    );
}

#[test]
fn test_delimiter_inside_free_text_splits_it() {
    // Separators are never escaped.
    let value = pros_cons::decode("pros(Lasts; all day,3,1)");
    assert_eq!(value.pros.len(), 1);
    assert_eq!(value.pros[0].text, "all day");
}

#[test]
fn test_mixed_accord_forms_decode_per_item() {
    let entries = accords::decode("a24:100;amber:64:#a:#b", None);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id.as_deref(), Some("a24"));
    assert_eq!(entries[1].id, None);
    assert_eq!(entries[1].name.as_deref(), Some("amber"));
    assert_eq!(entries[1].percentage, 64);
    assert_eq!(entries[1].bg_color.as_deref(), Some("#a"));
}

#[test]
fn test_bad_leading_item_keeps_later_items() {
    let decoded = decode_field(
        FieldKind::Accords,
        "x;a24:100;a34:64",
        SchemaVersion::Unknown,
        None,
    );
    assert_eq!(decoded.malformed(), 1);
    let FieldValue::Accords(entries) = decoded.into_value() else {
        panic!("expected accords");
    };
    assert_eq!(entries.len(), 2);

    let pyramid = notes::decode("top(Bergamot,n1;Lemon,n2,img,1,1;Lime,n3,img,1,1)", None);
    let top = pyramid.get(Layer::Top).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "Lemon");

    let field = voting::decode("love;like:30:60;dislike:2:5");
    assert_eq!(field.len(), 2);
    assert_eq!(field.get("like").unwrap().percent, 60.0);

    let entries = reminds_of::decode("1001:35;2002:12:0;3003:4:1");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].pid, 1001);
    assert_eq!(entries[2].dislikes, 1);
}

#[test]
fn test_rating_with_only_votes() {
    let rating = rating::decode(";250");
    assert_eq!(rating.average, 0.0);
    assert_eq!(rating.votes, 250);
}

#[test]
fn test_huge_numbers_fall_back() {
    assert!(id_list::decode("99999999999999999999999;3").contains(&3));
    assert_eq!(reminds_of::decode("99999999999999999999999:1:1;4").len(), 1);
}

#[test]
fn test_brand_with_blank_id_has_no_link() {
    let brand = brand::decode("Dior;", None);
    assert_eq!(brand.id(), None);
    assert!(!brand.is_legacy());
}

#[test]
fn test_legacy_brand_with_only_url() {
    let brand = brand::decode("Dior;https://x/dior;", None);
    assert_eq!(brand.url(), Some("https://x/dior"));
    assert_eq!(brand.logo(), Some(""));
}

#[test]
fn test_voting_repeated_category_replaces() {
    let field = voting::decode("love:1:10;like:2:20;love:3:30");
    assert_eq!(field.len(), 2);
    assert_eq!(field.get("love").unwrap().votes, 3);
    assert_eq!(field.entries[0].category, "love");
}

#[test]
fn test_declared_version_tags() {
    let decoded = decode_field(
        FieldKind::RemindsOf,
        "1001;1002",
        "v3".parse().unwrap(),
        None,
    );
    assert!(decoded.is_clean());
    assert_eq!(
        decoded.into_value(),
        FieldValue::RemindsOf(reminds_of::decode("1001;1002"))
    );
}
