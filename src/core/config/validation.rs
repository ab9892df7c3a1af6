use super::types::{AppConfig, HostedBackendConfig, LocalBackendConfig};
use crate::core::errors::ConfigError;

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.host.trim().is_empty() {
        return Err(ConfigError::invalid("server.host", "must not be empty"));
    }

    for (index, origin) in config.server.cors_allowed_origins.iter().enumerate() {
        if origin.trim().is_empty() {
            return Err(ConfigError::invalid(
                format!("server.cors_allowed_origins[{index}]"),
                "must not be empty",
            ));
        }
    }

    if config.llm.request_timeout_secs == 0 || config.llm.request_timeout_secs > 3_600 {
        return Err(ConfigError::invalid(
            "llm.request_timeout_secs",
            "must be between 1 and 3600",
        ));
    }

    validate_hosted(&config.llm.groq, "llm.groq")?;
    validate_hosted(&config.llm.huggingface, "llm.huggingface")?;
    validate_local(&config.llm.ollama, "llm.ollama")?;

    Ok(())
}

fn validate_hosted(backend: &HostedBackendConfig, prefix: &str) -> Result<(), ConfigError> {
    validate_base_url(&backend.base_url, &format!("{prefix}.base_url"))?;
    validate_model(&backend.model, &format!("{prefix}.model"))
}

fn validate_local(backend: &LocalBackendConfig, prefix: &str) -> Result<(), ConfigError> {
    validate_base_url(&backend.base_url, &format!("{prefix}.base_url"))?;
    validate_model(&backend.model, &format!("{prefix}.model"))
}

fn validate_base_url(url: &str, path: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::invalid(path, "must be an http(s) URL"));
    }
    Ok(())
}

fn validate_model(model: &str, path: &str) -> Result<(), ConfigError> {
    if model.trim().is_empty() {
        return Err(ConfigError::invalid(path, "must not be empty"));
    }
    Ok(())
}
