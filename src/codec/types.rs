use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::errors::CodecError;
use crate::codec::scalar::Tally;
use crate::core::kind::FieldKind;

/// One accord of a fragrance.
///
/// Current rows carry only `id` and `percentage`; a reference lookup fills
/// `name` and the colors. Legacy rows carry the name and colors inline and
/// have no id unless a lookup can map the name back to one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccordEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Share of the accord, 0–100
    pub percentage: u8,
    pub bg_color: Option<String>,
    pub font_color: Option<String>,
}

/// One note inside a pyramid layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub name: String,
    pub id: Option<String>,
    pub image: Option<String>,
    /// Display opacity; 1.0 when absent
    pub opacity: f64,
    /// Relative weight; 1.0 when absent
    pub weight: f64,
    /// From the notes reference table
    pub latin_name: Option<String>,
    /// From the notes reference table
    pub group: Option<String>,
}

impl Default for NoteEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: None,
            image: None,
            opacity: 1.0,
            weight: 1.0,
            latin_name: None,
            group: None,
        }
    }
}

/// Pyramid layer keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Top,
    Mid,
    Base,
    /// Flat note list for fragrances without a pyramid
    Notes,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Top, Layer::Mid, Layer::Base, Layer::Notes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Top => "top",
            Layer::Mid => "mid",
            Layer::Base => "base",
            Layer::Notes => "notes",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.as_str() == keyword)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteLayer {
    pub layer: Layer,
    pub notes: Vec<NoteEntry>,
}

/// Layers in order of first appearance in the source text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotesPyramid {
    pub layers: Vec<NoteLayer>,
}

impl NotesPyramid {
    pub fn get(&self, layer: Layer) -> Option<&[NoteEntry]> {
        self.layers
            .iter()
            .find(|l| l.layer == layer)
            .map(|l| l.notes.as_slice())
    }

    /// Sets a layer's notes. A layer seen before keeps its position.
    pub fn insert(&mut self, layer: Layer, notes: Vec<NoteEntry>) {
        match self.layers.iter_mut().find(|l| l.layer == layer) {
            Some(existing) => existing.notes = notes,
            None => self.layers.push(NoteLayer { layer, notes }),
        }
    }

    pub fn layer_names(&self) -> Vec<Layer> {
        self.layers.iter().map(|l| l.layer).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub votes: i64,
}

/// What a brand reference points at besides its name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandLink {
    #[default]
    None,
    /// Current rows: brand table id
    Id(String),
    /// Legacy rows: brand page and logo
    Page { url: String, logo: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrandRef {
    pub name: String,
    pub link: BrandLink,
}

impl BrandRef {
    pub fn id(&self) -> Option<&str> {
        match &self.link {
            BrandLink::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.link {
            BrandLink::Page { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn logo(&self) -> Option<&str> {
        match &self.link {
            BrandLink::Page { logo, .. } => Some(logo),
            _ => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self.link, BrandLink::Page { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerfumerRef {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VotingEntry {
    pub category: String,
    pub votes: i64,
    pub percent: f64,
}

/// Category → votes/percent, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VotingField {
    pub entries: Vec<VotingEntry>,
}

impl VotingField {
    pub fn get(&self, category: &str) -> Option<&VotingEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Adds a category; a repeated category replaces the earlier value in place.
    pub fn insert(&mut self, entry: VotingEntry) {
        match self.entries.iter_mut().find(|e| e.category == entry.category) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemindsOfEntry {
    pub pid: i64,
    pub likes: i64,
    pub dislikes: i64,
}

/// A single pro or con with its vote counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Opinion {
    pub text: String,
    pub likes: i64,
    pub dislikes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProsCons {
    pub pros: Vec<Opinion>,
    pub cons: Vec<Opinion>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentageEntry {
    pub category: String,
    pub value: f64,
}

/// Category → float, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentageMap {
    pub entries: Vec<PercentageEntry>,
}

impl PercentageMap {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.value)
    }

    /// Adds a category; a repeated category replaces the earlier value in place.
    pub fn insert(&mut self, category: impl Into<String>, value: f64) {
        let category = category.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(existing) => existing.value = value,
            None => self.entries.push(PercentageEntry { category, value }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A decoded value of any field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Accords(Vec<AccordEntry>),
    NotesPyramid(NotesPyramid),
    Rating(RatingSummary),
    Brand(BrandRef),
    Perfumers(Vec<PerfumerRef>),
    Voting(VotingField),
    RemindsOf(Vec<RemindsOfEntry>),
    ProsCons(ProsCons),
    Percentage(PercentageMap),
    IdList(Vec<i64>),
}

impl FieldValue {
    /// The zero value of a kind: what empty or unmatched input decodes to.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Accords => FieldValue::Accords(Vec::new()),
            FieldKind::NotesPyramid => FieldValue::NotesPyramid(NotesPyramid::default()),
            FieldKind::Rating => FieldValue::Rating(RatingSummary::default()),
            FieldKind::Brand => FieldValue::Brand(BrandRef::default()),
            FieldKind::Perfumers => FieldValue::Perfumers(Vec::new()),
            FieldKind::Voting => FieldValue::Voting(VotingField::default()),
            FieldKind::RemindsOf => FieldValue::RemindsOf(Vec::new()),
            FieldKind::ProsCons => FieldValue::ProsCons(ProsCons::default()),
            FieldKind::Percentage => FieldValue::Percentage(PercentageMap::default()),
            FieldKind::IdList => FieldValue::IdList(Vec::new()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Accords(_) => FieldKind::Accords,
            FieldValue::NotesPyramid(_) => FieldKind::NotesPyramid,
            FieldValue::Rating(_) => FieldKind::Rating,
            FieldValue::Brand(_) => FieldKind::Brand,
            FieldValue::Perfumers(_) => FieldKind::Perfumers,
            FieldValue::Voting(_) => FieldKind::Voting,
            FieldValue::RemindsOf(_) => FieldKind::RemindsOf,
            FieldValue::ProsCons(_) => FieldKind::ProsCons,
            FieldValue::Percentage(_) => FieldKind::Percentage,
            FieldValue::IdList(_) => FieldKind::IdList,
        }
    }

    /// Parses the bare JSON of a value of `kind` (no `kind`/`value` wrapper).
    pub fn from_json(kind: FieldKind, json: &str) -> Result<Self, CodecError> {
        Ok(match kind {
            FieldKind::Accords => FieldValue::Accords(serde_json::from_str(json)?),
            FieldKind::NotesPyramid => FieldValue::NotesPyramid(serde_json::from_str(json)?),
            FieldKind::Rating => FieldValue::Rating(serde_json::from_str(json)?),
            FieldKind::Brand => FieldValue::Brand(serde_json::from_str(json)?),
            FieldKind::Perfumers => FieldValue::Perfumers(serde_json::from_str(json)?),
            FieldKind::Voting => FieldValue::Voting(serde_json::from_str(json)?),
            FieldKind::RemindsOf => FieldValue::RemindsOf(serde_json::from_str(json)?),
            FieldKind::ProsCons => FieldValue::ProsCons(serde_json::from_str(json)?),
            FieldKind::Percentage => FieldValue::Percentage(serde_json::from_str(json)?),
            FieldKind::IdList => FieldValue::IdList(serde_json::from_str(json)?),
        })
    }

    /// The bare JSON of the inner value.
    pub fn to_json_value(&self) -> Result<serde_json::Value, CodecError> {
        let value = match self {
            FieldValue::Accords(v) => serde_json::to_value(v)?,
            FieldValue::NotesPyramid(v) => serde_json::to_value(v)?,
            FieldValue::Rating(v) => serde_json::to_value(v)?,
            FieldValue::Brand(v) => serde_json::to_value(v)?,
            FieldValue::Perfumers(v) => serde_json::to_value(v)?,
            FieldValue::Voting(v) => serde_json::to_value(v)?,
            FieldValue::RemindsOf(v) => serde_json::to_value(v)?,
            FieldValue::ProsCons(v) => serde_json::to_value(v)?,
            FieldValue::Percentage(v) => serde_json::to_value(v)?,
            FieldValue::IdList(v) => serde_json::to_value(v)?,
        };
        Ok(value)
    }
}

/// Typed view of one field kind's value.
///
/// Lets callers ask the resolver for `Vec<AccordEntry>` directly instead of
/// matching on [`FieldValue`].
pub trait SubField: Sized {
    const KIND: FieldKind;

    fn from_field(value: FieldValue) -> Option<Self>;

    fn into_field(self) -> FieldValue;
}

macro_rules! sub_field {
    ($ty:ty, $variant:ident) => {
        impl SubField for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn from_field(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_field(self) -> FieldValue {
                FieldValue::$variant(self)
            }
        }
    };
}

sub_field!(Vec<AccordEntry>, Accords);
sub_field!(NotesPyramid, NotesPyramid);
sub_field!(RatingSummary, Rating);
sub_field!(BrandRef, Brand);
sub_field!(Vec<PerfumerRef>, Perfumers);
sub_field!(VotingField, Voting);
sub_field!(Vec<RemindsOfEntry>, RemindsOf);
sub_field!(ProsCons, ProsCons);
sub_field!(PercentageMap, Percentage);
sub_field!(Vec<i64>, IdList);

/// Outcome of decoding one field.
///
/// Both variants carry a fully usable value. `WithDefaults` says how many
/// tokens or entries were substituted or dropped along the way.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Clean(T),
    WithDefaults { value: T, malformed: usize },
}

impl<T> Decoded<T> {
    pub fn from_tally(value: T, tally: &Tally) -> Self {
        match tally.malformed() {
            0 => Decoded::Clean(value),
            malformed => Decoded::WithDefaults { value, malformed },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Decoded::Clean(value) | Decoded::WithDefaults { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Decoded::Clean(value) | Decoded::WithDefaults { value, .. } => value,
        }
    }

    pub fn malformed(&self) -> usize {
        match self {
            Decoded::Clean(_) => 0,
            Decoded::WithDefaults { malformed, .. } => *malformed,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Decoded::Clean(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Decoded::Clean(value) => Decoded::Clean(f(value)),
            Decoded::WithDefaults { value, malformed } => Decoded::WithDefaults {
                value: f(value),
                malformed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults_are_one() {
        let note = NoteEntry::default();
        assert_eq!(note.opacity, 1.0);
        assert_eq!(note.weight, 1.0);
    }

    #[test]
    fn test_pyramid_insert_keeps_first_position() {
        let mut pyramid = NotesPyramid::default();
        pyramid.insert(Layer::Mid, vec![]);
        pyramid.insert(Layer::Top, vec![]);
        pyramid.insert(
            Layer::Mid,
            vec![NoteEntry {
                name: "rose".into(),
                ..Default::default()
            }],
        );

        assert_eq!(pyramid.layer_names(), vec![Layer::Mid, Layer::Top]);
        assert_eq!(pyramid.get(Layer::Mid).unwrap()[0].name, "rose");
        assert!(pyramid.get(Layer::Base).is_none());
    }

    #[test]
    fn test_brand_link_accessors() {
        let current = BrandRef {
            name: "Dior".into(),
            link: BrandLink::Id("b3".into()),
        };
        assert_eq!(current.id(), Some("b3"));
        assert_eq!(current.url(), None);
        assert!(!current.is_legacy());

        let legacy = BrandRef {
            name: "Dior".into(),
            link: BrandLink::Page {
                url: "u".into(),
                logo: "l".into(),
            },
        };
        assert_eq!(legacy.id(), None);
        assert_eq!(legacy.logo(), Some("l"));
        assert!(legacy.is_legacy());
    }

    #[test]
    fn test_maps_replace_repeated_categories() {
        let mut map = PercentageMap::default();
        map.insert("spring", 10.0);
        map.insert("winter", 20.0);
        map.insert("spring", 30.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("spring"), Some(30.0));
        assert_eq!(map.entries[0].category, "spring");
    }

    #[test]
    fn test_empty_matches_kind() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldValue::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn test_from_json_per_kind() {
        let value = FieldValue::from_json(FieldKind::Rating, r#"{"average":4.5,"votes":10}"#)
            .unwrap();
        assert_eq!(
            value,
            FieldValue::Rating(RatingSummary {
                average: 4.5,
                votes: 10
            })
        );

        assert!(FieldValue::from_json(FieldKind::IdList, r#"{"not":"a list"}"#).is_err());
    }

    #[test]
    fn test_sub_field_conversion() {
        let value = vec![1_i64, 2].into_field();
        assert_eq!(value.kind(), FieldKind::IdList);
        assert_eq!(Vec::<i64>::from_field(value), Some(vec![1, 2]));
        assert_eq!(
            RatingSummary::from_field(FieldValue::empty(FieldKind::Brand)),
            None
        );
    }

    #[test]
    fn test_decoded_from_tally() {
        let mut tally = Tally::new();
        assert!(Decoded::from_tally(1, &tally).is_clean());

        tally.flag_malformed();
        let decoded = Decoded::from_tally(1, &tally);
        assert_eq!(decoded.malformed(), 1);
        assert_eq!(decoded.map(|v| v + 1).into_value(), 2);
    }
}
