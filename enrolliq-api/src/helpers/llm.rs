use crate::config::ApiConfig;
use anyhow::anyhow;
use std::env;
use std::sync::Arc;

/// Build the generation client from configuration.
///
/// The key comes from `[api_keys].openai_api_key` or, failing that, the
/// `OPENAI_API_KEY` environment variable. A `[llm].base_url` points the
/// client at any Chat-Completions-compatible endpoint.
pub fn create_llm_client(
    config: &ApiConfig,
) -> anyhow::Result<Arc<dyn enrolliq_llm_sdk::client::LlmClient>> {
    let api_key = config
        .api_keys
        .as_ref()
        .and_then(|keys| keys.openai_api_key.clone())
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| {
            anyhow!("No API key found. Set [api_keys].openai_api_key in the config file or the OPENAI_API_KEY environment variable.")
        })?;

    let mut client = enrolliq_llm_sdk::openai::OpenAIClient::new(api_key)?;
    if let Some(base_url) = config.llm.as_ref().and_then(|llm| llm.base_url.clone()) {
        client = client.with_base_url(base_url);
    }

    Ok(Arc::new(client))
}

/// Model used for synthesis when the config does not name one.
pub fn synthesis_model(config: &ApiConfig) -> String {
    config
        .llm
        .as_ref()
        .and_then(|llm| llm.model.clone())
        .unwrap_or_else(|| enrolliq_llm_sdk::models::openai::GPT_4O_ID.to_string())
}
