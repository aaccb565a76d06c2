//! LLM provider implementations

mod factory;
mod gemini;
mod http_client;
mod openai;

pub use factory::{LlmProviderFactory, LlmProviderKind};
pub use gemini::GeminiProvider;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
