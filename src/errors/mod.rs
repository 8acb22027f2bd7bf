/// Structured error handling for the Pantheon server
///
/// Every fallible path in the crate funnels into `PantheonError` so that
/// route handlers and the startup sequence can report failures uniformly.

pub type PantheonResult<T> = Result<T, PantheonError>;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum PantheonError {
    // Cache credential bootstrap failures (fatal at startup)
    Credential(CredentialError),

    // Network connectivity errors (Coinbase REST)
    Network(NetworkError),

    // Redis cache backend issues
    Cache(CacheError),

    // Data parsing & validation errors
    Data(DataError),
}

impl std::fmt::Display for PantheonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PantheonError::Credential(e) => write!(f, "Credential Error: {}", e),
            PantheonError::Network(e) => write!(f, "Network Error: {}", e),
            PantheonError::Cache(e) => write!(f, "Cache Error: {}", e),
            PantheonError::Data(e) => write!(f, "Data Error: {}", e),
        }
    }
}

impl std::error::Error for PantheonError {}

// =============================================================================
// CREDENTIAL ERROR TYPES
// =============================================================================

/// Failures from the secure cache bootstrap.
///
/// Both variants carry only the environment variable NAME. The secret value
/// itself must never flow into an error, so there is no field for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The variable is unset or empty.
    Missing { variable: String },
    /// The variable holds a known placeholder or previously-exposed value.
    InsecurePlaceholder { variable: String },
}

impl CredentialError {
    /// Name of the offending environment variable.
    pub fn variable(&self) -> &str {
        match self {
            CredentialError::Missing { variable } => variable,
            CredentialError::InsecurePlaceholder { variable } => variable,
        }
    }
}

impl std::fmt::Display for CredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialError::Missing { variable } => {
                write!(
                    f,
                    "environment variable '{}' is unset or empty; set it to the cache backend password before starting",
                    variable
                )
            }
            CredentialError::InsecurePlaceholder { variable } => {
                write!(
                    f,
                    "environment variable '{}' holds a placeholder or previously-exposed value; set a real secret before starting",
                    variable
                )
            }
        }
    }
}

impl std::error::Error for CredentialError {}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum NetworkError {
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::HttpStatusError {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "HTTP {} from {}: {}",
                    status,
                    endpoint,
                    body.as_deref().unwrap_or("No body")
                )
            }
            NetworkError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CACHE ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum CacheError {
    Connection { message: String },
    Backend { message: String },
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Connection { message } => {
                write!(f, "Failed to connect to cache backend: {}", message)
            }
            CacheError::Backend { message } => write!(f, "Cache backend error: {}", message),
        }
    }
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum DataError {
    ParseError {
        data_type: String,
        error: String,
    },
    UnknownTimeframe {
        value: String,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::ParseError { data_type, error } => {
                write!(f, "Failed to parse {}: {}", data_type, error)
            }
            DataError::UnknownTimeframe { value } => {
                write!(
                    f,
                    "Unknown timeframe '{}' (expected 1m/5m/15m/1h/6h/1d or a granularity in seconds)",
                    value
                )
            }
        }
    }
}

// =============================================================================
// ERROR CONVERSIONS
// =============================================================================

impl From<CredentialError> for PantheonError {
    fn from(err: CredentialError) -> Self {
        PantheonError::Credential(err)
    }
}

impl From<reqwest::Error> for PantheonError {
    fn from(err: reqwest::Error) -> Self {
        PantheonError::Network(NetworkError::Generic {
            message: format!("HTTP request failed: {}", err),
        })
    }
}

impl From<serde_json::Error> for PantheonError {
    fn from(err: serde_json::Error) -> Self {
        PantheonError::Data(DataError::ParseError {
            data_type: "JSON".to_string(),
            error: err.to_string(),
        })
    }
}

impl From<redis::RedisError> for PantheonError {
    fn from(err: redis::RedisError) -> Self {
        PantheonError::Cache(CacheError::Backend {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl PantheonError {
    /// Create a network error
    pub fn network_error(message: impl Into<String>) -> Self {
        PantheonError::Network(NetworkError::Generic {
            message: message.into(),
        })
    }

    /// Create a cache connection error
    pub fn cache_connection(message: impl Into<String>) -> Self {
        PantheonError::Cache(CacheError::Connection {
            message: message.into(),
        })
    }
}
