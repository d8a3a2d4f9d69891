//! Codec for the structured sub-fields of FragDB rows.
//!
//! A FragDB row is a flat, pipe-delimited record, but several of its columns
//! are small documents in their own right: accord lists, note pyramids,
//! voting maps and so on, each with a private grammar that has changed
//! across schema revisions. This crate decodes those columns into typed
//! values and encodes them back to the current canonical form.
//!
//! Decoding never fails on data. Malformed tokens are replaced with
//! documented defaults and counted, so every call hands back a usable value
//! tagged [`Decoded::Clean`] or [`Decoded::WithDefaults`].
//!
//! # Example
//!
//! ```
//! use fragdb_codec::{FieldKind, FieldValue, SchemaVersion, decode_field, encode_field};
//!
//! let decoded = decode_field(FieldKind::Voting, "love:12", SchemaVersion::Unknown, None);
//! assert!(decoded.is_clean());
//!
//! let FieldValue::Voting(voting) = decoded.value() else { unreachable!() };
//! assert_eq!(voting.get("love").unwrap().percent, 12.0);
//!
//! // Legacy input re-encodes in the current shape
//! assert_eq!(encode_field(decoded.value()), "love:12:12");
//! ```

mod codec;
mod core;
pub mod features;
pub mod prelude;

pub use codec::errors::{CodecError, UnknownFieldKindError, disable_color};
pub use codec::grammars::{
    accords, brand, id_list, notes, percentage, perfumers, pros_cons, rating, reminds_of, voting,
};
pub use codec::registry::{self, Arity, DecodeFn, Form, Grammar, Shape};
pub use codec::resolver::{
    DecodeMode, Resolution, candidates, decode_as, decode_field, decode_named, decode_with_mode,
    encode_field, resolve,
};
pub use codec::scalar::{self, Tally};
pub use codec::tokenizer;
pub use codec::types::{
    AccordEntry, BrandLink, BrandRef, Decoded, FieldValue, Layer, NoteEntry, NoteLayer,
    NotesPyramid, Opinion, PercentageEntry, PercentageMap, PerfumerRef, ProsCons, RatingSummary,
    RemindsOfEntry, SubField, VotingEntry, VotingField,
};
pub use crate::core::config::{ReferenceRegistry, Settings};
pub use crate::core::kind::FieldKind;
pub use crate::core::reference::{AccordInfo, BrandInfo, NoteInfo, PerfumerInfo, ReferenceLookup};
pub use crate::core::version::SchemaVersion;
pub use features::{
    ColumnJson, ColumnValue, GrammarDetector, GrammarMatch, decode_row, detect_grammar, zip_header,
};
