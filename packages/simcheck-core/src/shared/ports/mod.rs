//! Ports to collaborators outside the detection core

pub mod tokenizer;

pub use tokenizer::Tokenizer;
