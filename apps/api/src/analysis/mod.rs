//! Candidate analysis: data contracts, prompt templates, response decoding,
//! and the five-phase pipeline.

pub mod decode;
pub mod models;
pub mod pipeline;
pub mod prompts;
