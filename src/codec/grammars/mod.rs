//! One module per field kind.
//!
//! Each module exposes `decode` (any known version, no declared version)
//! and `encode` (canonical current form). The crate-private per-version
//! decoders are what the grammar registry points at.

pub mod accords;
pub mod brand;
pub mod id_list;
pub mod notes;
pub mod percentage;
pub mod perfumers;
pub mod pros_cons;
pub mod rating;
pub mod reminds_of;
pub mod voting;

#[cfg(test)]
mod edge_cases;
