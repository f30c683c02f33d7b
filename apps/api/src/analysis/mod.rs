// Résumé analysis: prompt construction, the retrying AI client, JSON repair,
// the fallback result, and the HTTP handlers that tie them to PDF extraction.
// All provider calls go through llm_client.

pub mod analyzer;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod repair;
