//! Tools built on top of the codec.
//!
//! Grammar detection and whole-row decoding. Neither adds decoding logic of
//! its own; both drive the grammar registry and the resolver.

pub mod detection;
pub mod row;

pub use detection::{GrammarDetector, GrammarMatch, detect_grammar};
pub use row::{ColumnJson, ColumnValue, decode_row, zip_header};
