//! Remote chat-completion clients for parley
//!
//! This crate defines the message value types, the `ChatCompletion` trait
//! that the session manager talks to, and the Azure OpenAI-compatible
//! HTTP implementation.

pub mod azure;
pub mod base;

pub use azure::{AzureClient, AzureFactory, AzureSettings};
pub use base::{ChatCompletion, CompletionFactory, Message, ProviderError, ProviderResult, Role};
