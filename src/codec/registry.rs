//! Static grammar table.
//!
//! Every field kind owns one or more grammar descriptors, listed newest
//! first. A descriptor names the delimiter hierarchy, the token shape that
//! identifies it, and the function that decodes a matching field. The
//! resolver walks this table; nothing else dispatches on version.

use std::fmt;

use crate::codec::grammars::{
    accords, brand, id_list, notes, percentage, perfumers, pros_cons, rating, reminds_of, voting,
};
use crate::codec::scalar::{Tally, is_digits_only};
use crate::codec::tokenizer::{ENTRY_SEP, ITEM_SEP, TOKEN_SEP, split, split_items, token_count};
use crate::codec::types::FieldValue;
use crate::core::kind::FieldKind;
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

/// Decodes a field already known to match the grammar's shape.
pub type DecodeFn = fn(&str, Option<&dyn ReferenceLookup>, &mut Tally) -> FieldValue;

/// Whether a grammar is the one encoders write, or an older shape kept for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Current,
    Legacy,
}

/// Accepted token counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
            Arity::OneOf(options) => options.contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{}+", n),
            Arity::OneOf(options) => {
                let parts: Vec<String> = options.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", parts.join("|"))
            }
        }
    }
}

/// Token-shape predicate of a grammar.
///
/// Field-level shapes look at the whole field. Item-level shapes accept a
/// field when any of its items fits and let the decoder cope with stragglers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Items split on the item delimiter; one fitting item is enough.
    Items(Arity),
    /// The whole field split on the token delimiter.
    Whole(Arity),
    /// Alternating name/id tokens, at least one pair.
    Pairs,
    /// `layer(...)` groups; one fitting entry is enough.
    Layers(Arity),
    /// `pros(...)` / `cons(...)` segments.
    Segments,
    /// Token list with at least one all-digit token.
    Numeric,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Items(arity) => write!(f, "items of {} tokens", arity),
            Shape::Whole(arity) => write!(f, "{} tokens", arity),
            Shape::Pairs => write!(f, "name/id pairs"),
            Shape::Layers(arity) => write!(f, "layer groups of {}-token entries", arity),
            Shape::Segments => write!(f, "pros/cons segments"),
            Shape::Numeric => write!(f, "integer list"),
        }
    }
}

/// One versioned grammar of a field kind.
#[derive(Clone, Copy)]
pub struct Grammar {
    pub kind: FieldKind,
    /// Schema version that introduced this grammar
    pub version: SchemaVersion,
    pub form: Form,
    pub item_delimiter: Option<char>,
    pub token_delimiter: char,
    pub shape: Shape,
    /// Human-readable pattern, e.g. `id:pct;id:pct`
    pub syntax: &'static str,
    pub decode: DecodeFn,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("kind", &self.kind)
            .field("version", &self.version)
            .field("form", &self.form)
            .field("shape", &self.shape)
            .field("syntax", &self.syntax)
            .finish()
    }
}

impl Grammar {
    /// Short identifier such as `accords/v2`.
    pub fn id(&self) -> String {
        format!("{}/{}", self.kind, self.version)
    }

    /// Structural check; says nothing about whether the tokens parse.
    pub fn matches(&self, raw: &str) -> bool {
        match self.shape {
            Shape::Items(arity) => {
                let item_delimiter = self.item_delimiter.unwrap_or(ITEM_SEP);
                let counts = split_items(raw, item_delimiter)
                    .map(|item| token_count(item.trim(), self.token_delimiter));
                fits_any(counts, arity)
            }
            Shape::Whole(arity) => arity.accepts(split(raw, self.token_delimiter).len()),
            Shape::Pairs => split(raw, self.token_delimiter).len() >= 2,
            Shape::Layers(arity) => {
                let groups = notes::layer_groups(raw);
                if groups.is_empty() {
                    return false;
                }
                let item_delimiter = self.item_delimiter.unwrap_or(ITEM_SEP);
                let counts = groups
                    .iter()
                    .flat_map(|(_, content)| split_items(content, item_delimiter))
                    .map(|entry| token_count(entry.trim(), self.token_delimiter));
                fits_any(counts, arity)
            }
            Shape::Segments => pros_cons::has_segment(raw),
            Shape::Numeric => {
                split_items(raw, self.token_delimiter).any(|token| is_digits_only(token.trim()))
            }
        }
    }

    pub fn is_current(&self) -> bool {
        self.form == Form::Current
    }
}

/// True when some item fits `arity`, or when there are no items at all.
fn fits_any(mut counts: impl Iterator<Item = usize>, arity: Arity) -> bool {
    let mut seen = false;
    let fits = counts.any(|count| {
        seen = true;
        arity.accepts(count)
    });
    fits || !seen
}

static GRAMMARS: [Grammar; 15] = [
    Grammar {
        kind: FieldKind::Accords,
        version: SchemaVersion::V2,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::Exactly(2)),
        syntax: "id:pct;id:pct",
        decode: |raw, lookup, tally| FieldValue::Accords(accords::decode_current(raw, lookup, tally)),
    },
    Grammar {
        kind: FieldKind::Accords,
        version: SchemaVersion::V1,
        form: Form::Legacy,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::AtLeast(4)),
        syntax: "name:pct:bg:font;...",
        decode: |raw, lookup, tally| FieldValue::Accords(accords::decode_legacy(raw, lookup, tally)),
    },
    Grammar {
        kind: FieldKind::NotesPyramid,
        version: SchemaVersion::V3,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: ENTRY_SEP,
        shape: Shape::Layers(Arity::Exactly(5)),
        syntax: "top(name,id,image,opacity,weight;...)mid(...)base(...)",
        decode: |raw, lookup, tally| FieldValue::NotesPyramid(notes::decode_layers(raw, lookup, tally)),
    },
    Grammar {
        kind: FieldKind::NotesPyramid,
        version: SchemaVersion::V1,
        form: Form::Legacy,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: ENTRY_SEP,
        shape: Shape::Layers(Arity::AtLeast(3)),
        syntax: "top(name,url,image;...)mid(...)base(...)",
        decode: |raw, lookup, tally| FieldValue::NotesPyramid(notes::decode_layers(raw, lookup, tally)),
    },
    Grammar {
        kind: FieldKind::Rating,
        version: SchemaVersion::V1,
        form: Form::Current,
        item_delimiter: None,
        token_delimiter: ITEM_SEP,
        shape: Shape::Whole(Arity::AtLeast(1)),
        syntax: "average;votes",
        decode: |raw, _, tally| FieldValue::Rating(rating::decode_tokens(raw, tally)),
    },
    Grammar {
        kind: FieldKind::Brand,
        version: SchemaVersion::V2,
        form: Form::Current,
        item_delimiter: None,
        token_delimiter: ITEM_SEP,
        shape: Shape::Whole(Arity::Exactly(2)),
        syntax: "name;id",
        decode: |raw, lookup, _| FieldValue::Brand(brand::decode_current(raw, lookup)),
    },
    Grammar {
        kind: FieldKind::Brand,
        version: SchemaVersion::V1,
        form: Form::Legacy,
        item_delimiter: None,
        token_delimiter: ITEM_SEP,
        shape: Shape::Whole(Arity::OneOf(&[1, 3])),
        syntax: "name;url;logo",
        decode: |raw, _, _| FieldValue::Brand(brand::decode_legacy(raw)),
    },
    Grammar {
        kind: FieldKind::Perfumers,
        version: SchemaVersion::V2,
        form: Form::Current,
        item_delimiter: None,
        token_delimiter: ITEM_SEP,
        shape: Shape::Pairs,
        syntax: "name;id;name;id",
        decode: |raw, lookup, tally| FieldValue::Perfumers(perfumers::decode_pairs(raw, lookup, tally)),
    },
    Grammar {
        kind: FieldKind::Voting,
        version: SchemaVersion::V2,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::Exactly(3)),
        syntax: "category:votes:percent;...",
        decode: |raw, _, tally| FieldValue::Voting(voting::decode_items(raw, tally)),
    },
    Grammar {
        kind: FieldKind::Voting,
        version: SchemaVersion::V1,
        form: Form::Legacy,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::Exactly(2)),
        syntax: "category:value;...",
        decode: |raw, _, tally| FieldValue::Voting(voting::decode_items(raw, tally)),
    },
    Grammar {
        kind: FieldKind::RemindsOf,
        version: SchemaVersion::V3,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::Exactly(3)),
        syntax: "pid:likes:dislikes;...",
        decode: |raw, _, tally| FieldValue::RemindsOf(reminds_of::decode_items(raw, tally)),
    },
    Grammar {
        kind: FieldKind::RemindsOf,
        version: SchemaVersion::V1,
        form: Form::Legacy,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::Exactly(1)),
        syntax: "pid;pid;...",
        decode: |raw, _, tally| FieldValue::RemindsOf(reminds_of::decode_items(raw, tally)),
    },
    Grammar {
        kind: FieldKind::ProsCons,
        version: SchemaVersion::V3,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: ENTRY_SEP,
        shape: Shape::Segments,
        syntax: "pros(text,likes,dislikes;...)cons(...)",
        decode: |raw, _, tally| FieldValue::ProsCons(pros_cons::decode_segments(raw, tally)),
    },
    Grammar {
        kind: FieldKind::Percentage,
        version: SchemaVersion::V1,
        form: Form::Current,
        item_delimiter: Some(ITEM_SEP),
        token_delimiter: TOKEN_SEP,
        shape: Shape::Items(Arity::AtLeast(2)),
        syntax: "category:value;...",
        decode: |raw, _, tally| FieldValue::Percentage(percentage::decode_items(raw, tally)),
    },
    Grammar {
        kind: FieldKind::IdList,
        version: SchemaVersion::V1,
        form: Form::Current,
        item_delimiter: None,
        token_delimiter: ITEM_SEP,
        shape: Shape::Numeric,
        syntax: "id;id;id",
        decode: |raw, _, tally| FieldValue::IdList(id_list::decode_tokens(raw, tally)),
    },
];

/// Grammars of `kind`, newest first.
pub fn grammars_for(kind: FieldKind) -> Vec<&'static Grammar> {
    let mut grammars: Vec<&'static Grammar> =
        GRAMMARS.iter().filter(|g| g.kind == kind).collect();
    grammars.sort_by(|a, b| b.version.number().cmp(&a.version.number()));
    grammars
}

/// The kind's oldest grammar, tried last.
pub fn legacy_fallback(kind: FieldKind) -> Option<&'static Grammar> {
    grammars_for(kind).last().copied()
}

/// The grammar encoders write for `kind`.
pub fn current(kind: FieldKind) -> Option<&'static Grammar> {
    GRAMMARS
        .iter()
        .find(|g| g.kind == kind && g.form == Form::Current)
}
