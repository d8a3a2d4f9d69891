pub mod config;
pub mod kind;
pub mod reference;
pub mod version;
