//! geoquery-llm - Natural-language query translation port
//!
//! Defines the `QueryTranslator` port and the OpenAI-compatible
//! chat-completions implementation. The model is an opaque oracle: it gets
//! free text plus conversation context and returns `{operation, query}`;
//! everything downstream of that payload happens in the engine crate.

pub mod openai;
pub mod ports;

pub use openai::{parse_translation, OpenAiTranslator, TranslationPayload, TranslatorConfig};
pub use ports::{ChatTurn, QueryTranslator, SelectedPoint, Translation, TranslationRequest};
