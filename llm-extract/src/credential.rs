//! API key lookup.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::Error;
use crate::provider::Provider;

/// Locates the API key for `provider`.
///
/// Resolution order:
/// 1. `explicit` if provided and non-blank.
/// 2. The provider's environment variable, read now and not cached.
///
/// Surrounding whitespace is trimmed from either source.
///
/// # Errors
///
/// Returns [`Error::MissingCredential`] when neither source yields a
/// non-blank key.
pub fn resolve_api_key(
    provider: Provider,
    explicit: Option<&SecretString>,
) -> Result<SecretString, Error> {
    if let Some(key) = explicit
        .map(|k| k.expose_secret().trim())
        .filter(|k| !k.is_empty())
    {
        return Ok(SecretString::from(key));
    }

    let env_var = provider.env_var();
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim())),
        _ => Err(Error::MissingCredential { provider, env_var }),
    }
}
