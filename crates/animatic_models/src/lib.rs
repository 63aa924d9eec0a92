//! Text-generation backends for the Animatic outline-composition engine.
//!
//! Currently one driver: [`OpenAiClient`], speaking the OpenAI
//! chat-completions protocol. Any endpoint implementing that protocol
//! works through `with_base_url`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::OpenAiClient;
