//! Google Gemini API client.
//!
//! Implements [`ModelProvider`](crate::ModelProvider) over the Generative
//! Language API `generateContent` method.

mod api;
mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::GeminiClient;
pub use config::GeminiConfig;
