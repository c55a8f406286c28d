//! Identity and Session Management Module
//!
//! Provides the user collection and the single-session lifecycle of the
//! demo application:
//! - Registration with username and email uniqueness enforcement
//! - Credential verification, including the fixed demo admin bypass
//! - One active session at a time, stored next to the user collection

pub mod seed;
pub mod service;
pub mod types;

pub use service::{
    AuthService, DEMO_ADMIN_PASSWORD, DEMO_ADMIN_TOKEN, DEMO_ADMIN_USERNAME, SESSION_TOKEN_PREFIX,
};
pub use types::{
    Credentials, NewUser, ProfileUpdate, PublicUser, Session, User, UserId, UserRole, UserStats,
};
