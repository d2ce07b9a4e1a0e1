//! # Gateway Providers
//!
//! Generative-text provider clients for the assistant gateway.
//!
//! Currently provided:
//! - Google AI Studio (Gemini) via the `generateContent` REST API
//!
//! Every client attaches the fixed [`SafetyPolicy`] to each call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod safety;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use safety::{HarmBlockThreshold, HarmCategory, SafetyPolicy, SafetySetting};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};
