//! Explanation path: text-generation client, prompts, and response handling

pub mod analyzer;
pub mod client;
pub mod prompts;
