// Interview coaching: question generation from a resume and scored answer analysis.
// All model calls go through llm_client::JsonModel.

pub mod analysis;
pub mod handlers;
pub mod prompts;
pub mod questions;

#[cfg(test)]
pub(crate) mod testing;
