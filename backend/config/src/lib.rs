pub mod env;
pub mod schema;

pub use env::provider_config_from_env;
pub use schema::{
    ProviderConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL,
    DEFAULT_OPENAI_MODEL,
};
