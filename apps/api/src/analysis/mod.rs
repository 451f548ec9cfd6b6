// Resume analysis pipeline:
// extract text → keyword gate → prompt → LLM → normalize.
// All LLM calls go through llm_client, never direct Gemini calls here.

pub mod extractor;
pub mod handlers;
pub mod heuristic;
pub mod normalizer;
pub mod prompts;
