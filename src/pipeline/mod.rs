//! Conversation-to-notification pipeline.
//!
//! Every conversation snapshot flows through:
//! 1. `Extractor` — regex phrase matching (no LLM, best-effort)
//! 2. `Renderer` — template substitution
//! 3. `Notifier` — one POST to the notify endpoint
//!
//! The pipeline is stateless between turns: draft/approval progress is
//! carried by the caller as a `ReviewState`.

pub mod extractor;
pub mod processor;
pub mod types;
