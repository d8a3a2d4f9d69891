use serde::{Deserialize, Serialize};

/// Display attributes of an accord, keyed by accord id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccordInfo {
    pub name: String,
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub font_color: Option<String>,
}

/// Botanical attributes of a note, keyed by note id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Brand attributes, keyed by brand id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrandInfo {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Perfumer attributes, keyed by perfumer id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerfumerInfo {
    pub name: String,
}

/// Read-only reference tables consulted while decoding.
///
/// Decoders only ever read through this trait, so one lookup can be shared by
/// any number of concurrent decode calls. Every method has a "not found"
/// default so an implementation can cover only the tables it has.
///
/// # Example
///
/// ```
/// use fragdb_codec::{AccordInfo, ReferenceLookup, accords};
///
/// struct OneAccord(AccordInfo);
///
/// impl ReferenceLookup for OneAccord {
///     fn accord(&self, id: &str) -> Option<&AccordInfo> {
///         (id == "a24").then_some(&self.0)
///     }
/// }
///
/// let table = OneAccord(AccordInfo { name: "woody".into(), ..Default::default() });
/// let decoded = accords::decode("a24:100", Some(&table));
/// assert_eq!(decoded[0].name.as_deref(), Some("woody"));
/// ```
pub trait ReferenceLookup: Sync {
    fn accord(&self, _id: &str) -> Option<&AccordInfo> {
        None
    }

    /// Reverse lookup used to fill the id of a legacy, name-only accord.
    fn accord_id_for_name(&self, _name: &str) -> Option<&str> {
        None
    }

    fn note(&self, _id: &str) -> Option<&NoteInfo> {
        None
    }

    fn brand(&self, _id: &str) -> Option<&BrandInfo> {
        None
    }

    fn perfumer(&self, _id: &str) -> Option<&PerfumerInfo> {
        None
    }
}
