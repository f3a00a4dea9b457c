//! Provider configuration schema and resolution rules.

use serde::{Deserialize, Serialize};

use reelscope_core::{ProviderKind, ReelError};

/// Official Gemini endpoint, used when no base URL is configured.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Public OpenAI endpoint, used when no base URL is configured.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Everything a provider call needs: kind, credentials, endpoint, model.
///
/// Empty strings mean "unset"; resolution methods apply the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    /// The user's own key; takes precedence when present.
    #[serde(default)]
    pub user_api_key: String,
    /// Operator-supplied fallback, used only when the user key is absent.
    #[serde(default)]
    pub fallback_api_key: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub model_name: String,
}

impl ProviderConfig {
    /// Resolve the credential to send, or fail before any network call.
    pub fn resolve_api_key(&self) -> Result<&str, ReelError> {
        if !self.user_api_key.trim().is_empty() {
            return Ok(self.user_api_key.trim());
        }
        if !self.fallback_api_key.trim().is_empty() {
            return Ok(self.fallback_api_key.trim());
        }
        Err(ReelError::MissingApiKey)
    }

    /// Model name to request, falling back to the provider's default.
    pub fn effective_model(&self) -> &str {
        let trimmed = self.model_name.trim();
        if !trimmed.is_empty() {
            return trimmed;
        }
        match self.provider {
            ProviderKind::Gemini => DEFAULT_GEMINI_MODEL,
            ProviderKind::OpenAiCompatible => DEFAULT_OPENAI_MODEL,
        }
    }

    /// Base URL with trailing slashes trimmed, defaulted per provider.
    pub fn effective_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
        match self.provider {
            ProviderKind::Gemini => DEFAULT_GEMINI_BASE_URL.to_string(),
            ProviderKind::OpenAiCompatible => DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    /// Full chat-completions URL for the OpenAI-compatible path.
    pub fn openai_chat_url(&self) -> String {
        format!("{}/chat/completions", self.effective_base_url())
    }

    /// Full generateContent URL for the Gemini path.
    pub fn gemini_generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.effective_base_url(),
            self.effective_model(),
            api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_key_takes_precedence() {
        let config = ProviderConfig {
            user_api_key: "user-key".to_string(),
            fallback_api_key: "fallback-key".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "user-key");
    }

    #[test]
    fn fallback_key_used_when_user_key_absent() {
        let config = ProviderConfig {
            fallback_api_key: "fallback-key".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "fallback-key");
    }

    #[test]
    fn both_keys_empty_is_a_precondition_error() {
        let config = ProviderConfig::default();
        assert!(matches!(
            config.resolve_api_key(),
            Err(ReelError::MissingApiKey)
        ));

        // Whitespace-only keys count as absent.
        let config = ProviderConfig {
            user_api_key: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_err());
    }

    #[test]
    fn openai_endpoint_defaults_to_public_api() {
        let config = ProviderConfig {
            provider: ProviderKind::OpenAiCompatible,
            model_name: "gpt-4o".to_string(),
            base_url: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.openai_chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let config = ProviderConfig {
            provider: ProviderKind::OpenAiCompatible,
            base_url: "https://proxy.example.com/v1///".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.openai_chat_url(),
            "https://proxy.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn default_models_per_provider() {
        let gemini = ProviderConfig::default();
        assert_eq!(gemini.effective_model(), DEFAULT_GEMINI_MODEL);

        let openai = ProviderConfig {
            provider: ProviderKind::OpenAiCompatible,
            ..Default::default()
        };
        assert_eq!(openai.effective_model(), DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn gemini_url_includes_model_and_key() {
        let config = ProviderConfig {
            user_api_key: "k123".to_string(),
            model_name: "gemini-2.0-flash".to_string(),
            ..Default::default()
        };
        let url = config.gemini_generate_url("k123");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=k123"
        );
    }
}
