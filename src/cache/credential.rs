//! Secure cache bootstrap
//!
//! Reads the cache backend password from an environment variable before any
//! cache client is constructed, and fails closed when the secret is absent
//! or still set to a placeholder. The two terminal outcomes are a valid
//! [`CacheCredential`] or a fatal [`CredentialError`]; there are no
//! intermediate states and no retries.
//!
//! The raw secret never appears in logs or errors: `Debug` output redacts
//! it and both error variants carry only the variable name.

use crate::errors::CredentialError;

/// Values that must never be accepted as a real secret.
///
/// Any literal that has appeared in version-controlled start scripts or
/// documentation belongs here: once a value has been checked in, it is
/// burned for production use even if it looks strong.
const KNOWN_EXPOSED_VALUES: &[&str] = &[
    "YOUR_TEST_PASSWORD_HERE",
    "YOUR_REDIS_PASSWORD_HERE",
    "pantheon123",
    "changeme",
];

/// Opaque credential for the cache backend.
///
/// Constructed once at process start from environment state, immutable
/// thereafter, and never persisted. A credential whose value matches the
/// placeholder set is never handed to the cache client; `bootstrap` rejects
/// it before construction completes.
#[derive(Clone)]
pub struct CacheCredential {
    source: String,
    value: String,
    is_placeholder: bool,
}

impl CacheCredential {
    fn new(source: &str, value: String) -> Self {
        let is_placeholder = is_placeholder_value(&value);
        Self {
            source: source.to_string(),
            value,
            is_placeholder,
        }
    }

    /// Environment variable this credential was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The raw secret. Callers must pass this straight to the cache client
    /// constructor and never format it into logs or errors.
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }
}

// Redacted: the secret must not leak through Debug formatting.
impl std::fmt::Debug for CacheCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCredential")
            .field("source", &self.source)
            .field("value", &"<redacted>")
            .field("is_placeholder", &self.is_placeholder)
            .finish()
    }
}

/// Read and validate the cache password from the environment.
///
/// - unset or empty variable: `CredentialError::Missing`
/// - placeholder or previously-exposed value: `CredentialError::InsecurePlaceholder`
/// - anything else: a usable credential whose value equals the environment string
pub fn bootstrap_credential(variable: &str) -> Result<CacheCredential, CredentialError> {
    let value = std::env::var(variable).ok();
    validate_credential(variable, value.as_deref())
}

/// Environment-free validation core, so tests and callers with an explicit
/// configuration source do not have to mutate process state.
pub fn validate_credential(
    variable: &str,
    value: Option<&str>,
) -> Result<CacheCredential, CredentialError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            return Err(CredentialError::Missing {
                variable: variable.to_string(),
            })
        }
    };

    let credential = CacheCredential::new(variable, value.to_string());
    if credential.is_placeholder() {
        return Err(CredentialError::InsecurePlaceholder {
            variable: variable.to_string(),
        });
    }

    Ok(credential)
}

/// Check a candidate secret against the placeholder patterns
pub fn is_placeholder_value(value: &str) -> bool {
    if value.contains("YOUR_") || value.contains("_HERE") {
        return true;
    }

    KNOWN_EXPOSED_VALUES.contains(&value)
}
