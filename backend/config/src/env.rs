//! Load a `ProviderConfig` from environment variables.
//!
//! Keeps API keys out of argv and shell history; CLI flags may still
//! override individual fields afterwards.

use tracing::debug;

use reelscope_core::ProviderKind;

use crate::schema::ProviderConfig;

pub const ENV_PROVIDER: &str = "REELSCOPE_PROVIDER";
pub const ENV_API_KEY: &str = "REELSCOPE_API_KEY";
pub const ENV_FALLBACK_API_KEY: &str = "REELSCOPE_FALLBACK_API_KEY";
pub const ENV_BASE_URL: &str = "REELSCOPE_BASE_URL";
pub const ENV_MODEL: &str = "REELSCOPE_MODEL";

fn env_or_default(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Build a config from `REELSCOPE_*` environment variables.
///
/// Unknown provider names fall back to Gemini; a missing key is not an
/// error here — credential presence is checked right before a call.
pub fn provider_config_from_env() -> ProviderConfig {
    let provider = match env_or_default(ENV_PROVIDER).trim().to_lowercase().as_str() {
        "openai" | "openai_compatible" | "openai-compatible" => ProviderKind::OpenAiCompatible,
        _ => ProviderKind::Gemini,
    };

    let config = ProviderConfig {
        provider,
        user_api_key: env_or_default(ENV_API_KEY),
        fallback_api_key: env_or_default(ENV_FALLBACK_API_KEY),
        base_url: env_or_default(ENV_BASE_URL),
        model_name: env_or_default(ENV_MODEL),
    };

    debug!(
        provider = config.provider.as_str(),
        model = config.effective_model(),
        has_user_key = !config.user_api_key.is_empty(),
        has_fallback_key = !config.fallback_api_key.is_empty(),
        "loaded provider config from environment"
    );
    config
}
