//! Version resolution.
//!
//! Given a field kind, a raw field and the row's declared schema version,
//! pick the grammar to decode with. The declared version's grammar is tried
//! first, then older ones, then the kind's legacy fallback. An undeclared
//! version probes every grammar newest first.

use crate::codec::errors::CodecError;
use crate::codec::grammars::{
    accords, brand, id_list, notes, percentage, perfumers, pros_cons, rating, reminds_of, voting,
};
use crate::codec::registry::{self, Grammar};
use crate::codec::scalar::Tally;
use crate::codec::types::{Decoded, FieldValue, SubField};
use crate::core::kind::FieldKind;
use crate::core::reference::ReferenceLookup;
use crate::core::version::SchemaVersion;

/// How decode results with substituted defaults are handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Always return a value, tagged with its malformed count
    #[default]
    Lenient,
    /// Reject any field that needed a substitution
    Strict,
}

impl DecodeMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }
}

/// Decoded value plus the grammar that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// `None` for empty input and for input no grammar matched
    pub grammar: Option<&'static Grammar>,
    pub decoded: Decoded<FieldValue>,
}

/// Grammars to try for `kind` under `declared`, in probe order.
pub fn candidates(kind: FieldKind, declared: SchemaVersion) -> Vec<&'static Grammar> {
    let all = registry::grammars_for(kind);

    let mut ordered: Vec<&'static Grammar> = match declared.number() {
        None => all,
        Some(declared) => all
            .into_iter()
            .filter(|g| g.version.number().is_some_and(|v| v <= declared))
            .collect(),
    };

    // A row declaring a version older than every grammar still gets the
    // kind's oldest grammar.
    if let Some(fallback) = registry::legacy_fallback(kind)
        && !ordered.iter().any(|g| std::ptr::eq(*g, fallback))
    {
        ordered.push(fallback);
    }

    ordered
}

/// Decodes one field, reporting which grammar matched.
pub fn resolve(
    kind: FieldKind,
    raw: &str,
    declared: SchemaVersion,
    lookup: Option<&dyn ReferenceLookup>,
) -> Resolution {
    let raw = raw.trim();
    if raw.is_empty() {
        return Resolution {
            grammar: None,
            decoded: Decoded::Clean(FieldValue::empty(kind)),
        };
    }

    for grammar in candidates(kind, declared) {
        if !grammar.matches(raw) {
            tracing::trace!(grammar = %grammar.id(), "shape mismatch");
            continue;
        }

        tracing::trace!(grammar = %grammar.id(), "shape matched");
        let mut tally = Tally::new();
        let value = (grammar.decode)(raw, lookup, &mut tally);
        let decoded = Decoded::from_tally(value, &tally);

        if !decoded.is_clean() {
            tracing::debug!(
                grammar = %grammar.id(),
                malformed = decoded.malformed(),
                "decoded with substituted defaults"
            );
        }

        return Resolution {
            grammar: Some(grammar),
            decoded,
        };
    }

    tracing::debug!(kind = %kind, version = %declared, "no grammar matched");
    Resolution {
        grammar: None,
        decoded: Decoded::WithDefaults {
            value: FieldValue::empty(kind),
            malformed: 1,
        },
    }
}

/// Decodes one field of `kind`. Never fails on data.
pub fn decode_field(
    kind: FieldKind,
    raw: &str,
    declared: SchemaVersion,
    lookup: Option<&dyn ReferenceLookup>,
) -> Decoded<FieldValue> {
    resolve(kind, raw, declared, lookup).decoded
}

/// Typed form of [`decode_field`].
pub fn decode_as<T: SubField + Default>(
    raw: &str,
    declared: SchemaVersion,
    lookup: Option<&dyn ReferenceLookup>,
) -> Decoded<T> {
    decode_field(T::KIND, raw, declared, lookup).map(|value| T::from_field(value).unwrap_or_default())
}

/// Like [`decode_field`], but a strict mode turns dirty input into an error.
pub fn decode_with_mode(
    kind: FieldKind,
    raw: &str,
    declared: SchemaVersion,
    lookup: Option<&dyn ReferenceLookup>,
    mode: DecodeMode,
) -> Result<Decoded<FieldValue>, CodecError> {
    let decoded = decode_field(kind, raw, declared, lookup);
    match (mode, decoded.malformed()) {
        (DecodeMode::Strict, malformed) if malformed > 0 => {
            Err(CodecError::Malformed { kind, malformed })
        }
        _ => Ok(decoded),
    }
}

/// Decodes a field whose kind is given by name.
///
/// The only decode entry point that can fail in lenient mode: the kind name
/// must be registered.
pub fn decode_named(
    name: &str,
    raw: &str,
    declared: SchemaVersion,
    lookup: Option<&dyn ReferenceLookup>,
    mode: DecodeMode,
) -> Result<Decoded<FieldValue>, CodecError> {
    let kind = FieldKind::lookup(name)?;
    decode_with_mode(kind, raw, declared, lookup, mode)
}

/// Canonical current-version string for any field value.
pub fn encode_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Accords(v) => accords::encode(v),
        FieldValue::NotesPyramid(v) => notes::encode(v),
        FieldValue::Rating(v) => rating::encode(v),
        FieldValue::Brand(v) => brand::encode(v),
        FieldValue::Perfumers(v) => perfumers::encode(v),
        FieldValue::Voting(v) => voting::encode(v),
        FieldValue::RemindsOf(v) => reminds_of::encode(v),
        FieldValue::ProsCons(v) => pros_cons::encode(v),
        FieldValue::Percentage(v) => percentage::encode(v),
        FieldValue::IdList(v) => id_list::encode(v),
    }
}
