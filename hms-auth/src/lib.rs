//! HMS Auth - client-side identity store and session manager
//!
//! This crate provides the identity layer of the HMS demo application:
//!
//! - A persistence adapter over a pluggable key-value substrate
//! - A user collection with username and email uniqueness enforcement
//! - A single-session lifecycle with fixed demo tokens
//!
//! Every operation runs synchronously in the calling thread as a
//! whole-region read-modify-write against two well-known storage keys.
//! Malformed persisted data never surfaces as an error; reads degrade to
//! empty defaults and the next write repairs the region.
//!
//! ## Architecture
//!
//! - **Substrate** ([`storage::KeyValueStore`]): opaque strings by key,
//!   with in-memory and file-backed implementations
//! - **Adapter** ([`storage::StorageAdapter`]): typed JSON access on top
//! - **Manager** ([`identity::AuthService`]): users, credentials, sessions

pub mod config;
pub mod identity;
pub mod storage;

pub use config::AuthConfig;
pub use identity::{
    AuthService, Credentials, NewUser, ProfileUpdate, PublicUser, Session, User, UserId, UserRole,
    UserStats, DEMO_ADMIN_PASSWORD, DEMO_ADMIN_TOKEN, DEMO_ADMIN_USERNAME, SESSION_TOKEN_PREFIX,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageAdapter};

/// Identity-level error type
///
/// Display strings are the messages shown directly to the end user.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername { username: String },

    #[error("Email already registered")]
    DuplicateEmail { email: String },

    #[error("Missing required fields")]
    MissingFields,

    #[error("User not found")]
    UserNotFound { username: String },

    #[error("Invalid credentials")]
    InvalidCredentials { username: String },

    #[error("User is not active")]
    AccountInactive { username: String },

    #[error("User is blacklisted")]
    AccountBlacklisted { username: String },

    #[error("User not found")]
    UnknownUserId { id: UserId },

    #[error("Missing or invalid token")]
    NotAuthenticated,

    #[error("Unauthorized - {required} only")]
    RoleForbidden { required: UserRole },

    #[error("Core error: {0}")]
    Core(#[from] hms_core::HmsError),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateUsername { .. } => "duplicate_username",
            Self::DuplicateEmail { .. } => "duplicate_email",
            Self::MissingFields => "validation",
            Self::UserNotFound { .. } => "not_found",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::AccountInactive { .. } => "inactive",
            Self::AccountBlacklisted { .. } => "blacklisted",
            Self::UnknownUserId { .. } => "not_found",
            Self::NotAuthenticated => "unauthenticated",
            Self::RoleForbidden { .. } => "forbidden",
            Self::Core(_) => "internal",
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{
        AuthConfig, AuthError, AuthResult, AuthService, Credentials, NewUser, ProfileUpdate,
        Session, User, UserRole,
    };
}
