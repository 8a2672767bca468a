//! API-key resolution.
//!
//! The Gemini key is read from the environment only; it is never stored
//! in the document or in `config.toml`.

use secrecy::SecretString;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Read the Gemini API key from the environment.
///
/// Returns `None` when the variable is unset or not valid Unicode;
/// assistant features are simply unavailable in that case.
pub fn gemini_api_key() -> Option<SecretString> {
    match std::env::var(GEMINI_API_KEY_VAR) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn key_is_read_from_the_environment() {
        // SAFETY: tests in this module run serially on this variable and
        // clean up after themselves.
        unsafe { std::env::set_var("GEMINI_API_KEY", "not-a-real-key") };
        let key = gemini_api_key().unwrap();
        assert_eq!(key.expose_secret(), "not-a-real-key");
        unsafe { std::env::remove_var("GEMINI_API_KEY") };
    }
}
