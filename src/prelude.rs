//! Convenient re-exports for common usage.
//!
//! This module provides a single import for the most commonly used types
//! and functions in fragdb-codec.
//!
//! # Example
//!
//! ```
//! use fragdb_codec::prelude::*;
//!
//! let registry = ReferenceRegistry::load_default().unwrap();
//! let decoded = decode_field(FieldKind::Accords, "a24:100", SchemaVersion::V3, Some(&registry));
//! let FieldValue::Accords(accords) = decoded.into_value() else { unreachable!() };
//! println!("{:?}", accords[0].name);
//! ```

pub use crate::{
    // Results
    CodecError,
    DecodeMode,
    Decoded,
    // Kinds and versions
    FieldKind,
    FieldValue,
    // Detection
    GrammarDetector,
    GrammarMatch,
    // References
    ReferenceLookup,
    ReferenceRegistry,
    SchemaVersion,
    SubField,

    decode_as,
    decode_field,
    decode_named,
    decode_row,
    detect_grammar,
    encode_field,
};
