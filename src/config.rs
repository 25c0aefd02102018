//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first as a fallback;
//! variables already present in the process environment win.

use std::env;
use std::path::PathBuf;

const DEFAULT_ISSUER: &str = "DevAtlasAPI";
const DEFAULT_AUDIENCE: &str = "DevAtlasFrontend";
const DEFAULT_EXPIRY_MINUTES: i64 = 60;
const DEFAULT_FRONTEND_URL: &str = "https://devatlas-frontend.up.railway.app";
const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_UPLOADS_DIR: &str = "Uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
const DEFAULT_PASSWORD_ITERATIONS: u32 = 600_000;

/// HS256 keys shorter than the hash output are accepted but weak.
const MIN_RECOMMENDED_KEY_LEN: usize = 32;

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Session tokens ---
    /// Symmetric JWT signing key (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// `iss` claim written and required on tokens
    pub jwt_issuer: String,
    /// `aud` claim written and required on tokens
    pub jwt_audience: String,
    /// Token lifetime in minutes
    pub jwt_expiry_minutes: i64,

    // --- Document store ---
    /// GCP project hosting the Firestore database
    pub gcp_project_id: String,
    /// Firestore database id
    pub firestore_database: String,

    // --- HTTP ---
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Uploads ---
    /// Root directory for uploaded outline assets
    pub uploads_dir: PathBuf,
    /// Request body limit for outline uploads
    pub max_upload_bytes: usize,

    /// PBKDF2 iteration count for newly hashed passwords
    pub password_iterations: u32,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;

        if config.jwt_signing_key.len() < MIN_RECOMMENDED_KEY_LEN {
            tracing::warn!(
                len = config.jwt_signing_key.len(),
                "JWT_KEY is shorter than 32 bytes"
            );
        }

        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            jwt_signing_key: required("JWT_KEY")?.into_bytes(),
            jwt_issuer: optional("JWT_ISSUER", DEFAULT_ISSUER),
            jwt_audience: optional("JWT_AUDIENCE", DEFAULT_AUDIENCE),
            jwt_expiry_minutes: lookup("JWT_EXPIRY_MINUTES")
                .and_then(|v| v.trim().parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(DEFAULT_EXPIRY_MINUTES),
            gcp_project_id: required("GCP_PROJECT_ID")?,
            firestore_database: optional("FIRESTORE_DATABASE", DEFAULT_DATABASE),
            frontend_url: optional("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(8080),
            uploads_dir: PathBuf::from(optional("UPLOADS_DIR", DEFAULT_UPLOADS_DIR)),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            password_iterations: lookup("PASSWORD_HASH_ITERATIONS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(DEFAULT_PASSWORD_ITERATIONS),
        })
    }

    /// Fixed configuration for tests.
    ///
    /// Uses a low hashing cost so auth round-trips stay fast.
    pub fn test_default() -> Self {
        Self {
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            jwt_issuer: DEFAULT_ISSUER.to_string(),
            jwt_audience: DEFAULT_AUDIENCE.to_string(),
            jwt_expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            gcp_project_id: "test-project".to_string(),
            firestore_database: DEFAULT_DATABASE.to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            password_iterations: 1_000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
