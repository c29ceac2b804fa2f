//! Text processing and scoring

pub mod analyzer;
pub mod combiner;
pub mod document;
pub mod embeddings;
pub mod keyword_matcher;
pub mod lemmatizer;
pub mod semantic;
pub mod text_processor;
pub mod tfidf;
