//! # Enrolliq LLM SDK
//!
//! A small provider-agnostic LLM client used by the query synthesizer.
//! Ships with an OpenAI-compatible provider; any service exposing the Chat
//! Completions wire format works via [`openai::OpenAIClient::with_base_url`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use enrolliq_llm_sdk::openai::OpenAIClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAIClient::new("your-api-key")?;
//!     let response = client
//!         .message_builder()
//!         .model("gpt-4o")
//!         .max_tokens(512)
//!         .temperature(0.0)
//!         .system_message("You answer in SQL only.")
//!         .user_message("113學年各系所學生人數統計")
//!         .send()
//!         .await?;
//!
//!     println!("SQL: {}", response.content());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod openai;
pub mod providers;
pub mod types;
