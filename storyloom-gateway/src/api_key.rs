//! API-key resolution (§4.4: "resolved in order: constructor argument →
//! environment variable → `.env` file; absence is a configuration
//! error"). Mirrors the environment-variable secret resolver's
//! lookup-then-NotFound shape, extended with a `.env` fallback.

use storyloom_core::error::GatewayError;

/// Resolve the API key for `env_var`, trying `explicit` first, then the
/// process environment, then a `.env` file in the current directory
/// (loaded via `dotenvy`, which does not override already-set
/// variables).
pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Result<String, GatewayError> {
    if let Some(key) = explicit {
        return Ok(key.to_string());
    }
    if let Ok(key) = std::env::var(env_var) {
        return Ok(key);
    }
    let _ = dotenvy::dotenv();
    std::env::var(env_var).map_err(|_| GatewayError::MissingApiKey {
        env_var: env_var.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // std::env is process-global; serialize these tests.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_key_wins_over_everything() {
        let _guard = ENV_LOCK.lock().unwrap();
        let key = resolve_api_key(Some("explicit-key"), "STORYLOOM_TEST_KEY_1");
        assert_eq!(key.unwrap(), "explicit-key");
    }

    #[test]
    fn falls_back_to_env_var() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("STORYLOOM_TEST_KEY_2", "env-key");
        let key = resolve_api_key(None, "STORYLOOM_TEST_KEY_2");
        std::env::remove_var("STORYLOOM_TEST_KEY_2");
        assert_eq!(key.unwrap(), "env-key");
    }

    #[test]
    fn missing_everywhere_is_configuration_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("STORYLOOM_TEST_KEY_ABSENT");
        let err = resolve_api_key(None, "STORYLOOM_TEST_KEY_ABSENT").unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey { .. }));
    }
}
