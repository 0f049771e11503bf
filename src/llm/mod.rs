pub mod sentiment;

use crate::error::{Error, Result};

/// Model families available for sentiment analysis. Anything that is not
/// recognizably Haiku runs on Sonnet.
enum Model {
    Haiku,
    Sonnet,
}

impl Model {
    fn from_name(name: &str) -> Self {
        match name {
            "claude-haiku-4-5" | "haiku" => Model::Haiku,
            _ => Model::Sonnet,
        }
    }
}

/// Create a mixtape Agent for the given provider and model name.
///
/// `anthropic` reads `ANTHROPIC_API_KEY` from the environment; `bedrock`
/// uses the ambient AWS credential chain.
pub async fn create_agent(provider: &str, model_name: &str) -> Result<mixtape_core::Agent> {
    // The model types differ, so each combination is its own builder call.
    match (provider, Model::from_name(model_name)) {
        ("bedrock", Model::Haiku) => mixtape_core::Agent::builder()
            .bedrock(mixtape_core::ClaudeHaiku4_5)
            .build()
            .await
            .map_err(|e| Error::Llm(e.to_string())),
        ("bedrock", Model::Sonnet) => mixtape_core::Agent::builder()
            .bedrock(mixtape_core::ClaudeSonnet4_5)
            .build()
            .await
            .map_err(|e| Error::Llm(e.to_string())),
        ("anthropic", Model::Haiku) => mixtape_core::Agent::builder()
            .anthropic_from_env(mixtape_core::ClaudeHaiku4_5)
            .build()
            .await
            .map_err(|e| Error::Llm(e.to_string())),
        ("anthropic", Model::Sonnet) => mixtape_core::Agent::builder()
            .anthropic_from_env(mixtape_core::ClaudeSonnet4_5)
            .build()
            .await
            .map_err(|e| Error::Llm(e.to_string())),
        (other, _) => Err(Error::Config(format!("unknown llm provider: {other}"))),
    }
}
