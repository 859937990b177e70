//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
///
/// Presence of the provider endpoint and credential is deliberately NOT
/// checked here; those are required at session-creation time, not at load
/// time, so a server can start and report the problem per request.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.provider.max_tokens == 0 {
        errors.push("provider.max_tokens must be > 0".to_string());
    }
    if !(0.0..=2.0).contains(&config.provider.temperature) {
        errors.push("provider.temperature must be in [0.0, 2.0]".to_string());
    }
    if config.provider.request_timeout_secs == 0 {
        errors.push("provider.request_timeout_secs must be > 0".to_string());
    }
    if config.provider.deployment.trim().is_empty() {
        errors.push("provider.deployment must not be empty".to_string());
    }

    if config.chat.persona.trim().is_empty() {
        errors.push("chat.persona must not be empty".to_string());
    }
    if config.chat.max_sessions == Some(0) {
        errors.push("chat.max_sessions must be > 0 when set".to_string());
    }

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }
    if config.server.port == 0 {
        errors.push("server.port must be > 0".to_string());
    }

    match config.logging.format.as_str() {
        "text" | "json" => {}
        other => errors.push(format!("logging.format must be text or json, got '{other}'")),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Config(errors.join("; ")))
    }
}
