pub mod errors;
pub mod grammars;
pub mod registry;
pub mod resolver;
pub mod scalar;
pub mod tokenizer;
pub mod types;
