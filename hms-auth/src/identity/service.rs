//! Identity and session manager
//!
//! Every operation is a synchronous read-modify-write against the
//! persistence adapter: load the relevant region, apply the change, write
//! the whole region back. Nothing is cached between calls, so each
//! operation sees whatever the substrate currently holds. Concurrent
//! writers race on whole regions; the last write wins.

use crate::config::AuthConfig;
use crate::identity::seed;
use crate::identity::types::{
    Credentials, NewUser, ProfileUpdate, Session, User, UserId, UserRole, UserStats,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageAdapter};
use crate::{AuthError, AuthResult};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Username accepted by the demo admin bypass
pub const DEMO_ADMIN_USERNAME: &str = "admin";
/// Password accepted by the demo admin bypass
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";
/// Token issued by the demo admin bypass
pub const DEMO_ADMIN_TOKEN: &str = "demo-admin-token";
/// Prefix of regular session tokens; the user id is appended
pub const SESSION_TOKEN_PREFIX: &str = "demo-token-";

/// Identity and session manager backed by a key-value substrate
#[derive(Clone)]
pub struct AuthService {
    storage: StorageAdapter,
    config: AuthConfig,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AuthService {
    /// Create a manager over the given substrate
    pub fn new(store: Arc<dyn KeyValueStore>, config: AuthConfig) -> Self {
        Self {
            storage: StorageAdapter::new(store),
            config,
        }
    }

    /// Create a manager over a fresh in-memory store (for development and
    /// testing)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), AuthConfig::default())
    }

    /// Create a manager over a file store rooted at `storage_dir`
    pub fn file_backed<P: AsRef<Path>>(storage_dir: P) -> AuthResult<Self> {
        let store = FileStore::new(storage_dir)?;
        Ok(Self::new(Arc::new(store), AuthConfig::default()))
    }

    /// Configuration in effect
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// All persisted users
    pub fn list_users(&self) -> Vec<User> {
        self.storage.load(&self.config.users_key)
    }

    /// Replace the persisted user collection
    pub fn save_users(&self, users: &[User]) -> AuthResult<()> {
        self.storage.save(&self.config.users_key, &users)?;
        Ok(())
    }

    /// Look up a user by username (exact, case-sensitive)
    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.list_users()
            .into_iter()
            .find(|u| u.username == username)
    }

    /// Look up a user by id
    pub fn find_user_by_id(&self, user_id: UserId) -> Option<User> {
        self.list_users().into_iter().find(|u| u.id == user_id)
    }

    /// Register a new user
    ///
    /// Ids are assigned as the highest existing id plus one, so removing the
    /// highest-id record would recycle its id. Accounts are deactivated
    /// rather than deleted to keep ids stable.
    pub fn create_user(&self, new_user: NewUser) -> AuthResult<User> {
        debug!("Starting user registration for: {}", new_user.username);

        // Validate input
        if new_user.username.is_empty() || new_user.email.is_empty() || new_user.password.is_empty()
        {
            debug!("Registration failed: missing required fields");
            return Err(AuthError::MissingFields);
        }

        let mut users = self.list_users();

        if users.iter().any(|u| u.username == new_user.username) {
            debug!(
                "Registration failed: username '{}' already exists",
                new_user.username
            );
            return Err(AuthError::DuplicateUsername {
                username: new_user.username,
            });
        }

        if users.iter().any(|u| u.email == new_user.email) {
            debug!(
                "Registration failed: email '{}' already registered",
                new_user.email
            );
            return Err(AuthError::DuplicateEmail {
                email: new_user.email,
            });
        }

        let id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);

        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
            full_name: new_user.full_name,
            phone: new_user.phone,
            is_active: true,
            blacklisted: false,
            created_at: Utc::now(),
        };

        users.push(user.clone());
        self.save_users(&users)?;

        info!(
            "Registered new user: {} (role: {})",
            user.username, user.role
        );
        Ok(user)
    }

    /// Authenticate and open a session, replacing any existing one
    pub fn login(&self, credentials: Credentials) -> AuthResult<Session> {
        if self.config.demo_admin_bypass
            && credentials.username == DEMO_ADMIN_USERNAME
            && credentials.password == DEMO_ADMIN_PASSWORD
        {
            return self.demo_admin_login();
        }

        let user = self
            .find_user_by_username(&credentials.username)
            .ok_or_else(|| AuthError::UserNotFound {
                username: credentials.username.clone(),
            })?;

        if user.password != credentials.password {
            warn!("Invalid password for user: {}", user.username);
            return Err(AuthError::InvalidCredentials {
                username: user.username,
            });
        }

        if !user.is_active {
            warn!("Login rejected for inactive user: {}", user.username);
            return Err(AuthError::AccountInactive {
                username: user.username,
            });
        }

        if user.blacklisted {
            warn!("Login rejected for blacklisted user: {}", user.username);
            return Err(AuthError::AccountBlacklisted {
                username: user.username,
            });
        }

        let session = Session {
            token: format!("{}{}", SESSION_TOKEN_PREFIX, user.id),
            user,
        };
        self.storage.save(&self.config.session_key, &session)?;

        debug!("User authenticated: {}", session.user.username);
        Ok(session)
    }

    /// Fixed-credential login path for the demo admin
    ///
    /// Creates the admin record if missing and issues the constant token.
    /// Never consults the stored password or the active and blacklist
    /// flags.
    fn demo_admin_login(&self) -> AuthResult<Session> {
        let user = match self.find_user_by_username(DEMO_ADMIN_USERNAME) {
            Some(user) => user,
            None => {
                info!("Creating default admin user: {}", DEMO_ADMIN_USERNAME);
                self.create_user(seed::demo_admin())?
            }
        };

        let session = Session {
            token: DEMO_ADMIN_TOKEN.to_string(),
            user,
        };
        self.storage.save(&self.config.session_key, &session)?;

        debug!("User authenticated: {}", session.user.username);
        Ok(session)
    }

    /// Close the active session, if any
    pub fn logout(&self) -> AuthResult<()> {
        self.storage.remove(&self.config.session_key)?;
        debug!("Session cleared");
        Ok(())
    }

    /// The active session, if one is stored and readable
    pub fn current_session(&self) -> Option<Session> {
        self.storage.load(&self.config.session_key)
    }

    /// Require an active session whose user holds `role`
    pub fn require_role(&self, role: UserRole) -> AuthResult<Session> {
        let session = self.current_session().ok_or(AuthError::NotAuthenticated)?;

        if !session.has_role(role) {
            debug!(
                "Access denied for {}: requires {} role",
                session.user.username, role
            );
            return Err(AuthError::RoleForbidden { required: role });
        }

        Ok(session)
    }

    /// Apply a partial profile update to `user_id`
    ///
    /// Only the contact fields can change this way; username, password and
    /// role are fixed at registration. A changed email must stay unique
    /// across the collection. If the updated user owns the active session,
    /// the stored snapshot is rewritten to match.
    pub fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> AuthResult<User> {
        let mut users = self.list_users();

        if let Some(email) = &update.email {
            if users.iter().any(|u| u.id != user_id && u.email == *email) {
                return Err(AuthError::DuplicateEmail {
                    email: email.clone(),
                });
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AuthError::UnknownUserId { id: user_id })?;

        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(email) = update.email {
            user.email = email;
        }

        let updated = user.clone();
        self.save_users(&users)?;
        self.refresh_session_snapshot(&updated)?;

        info!("Updated profile for user: {}", updated.username);
        Ok(updated)
    }

    /// Activate or deactivate an account
    ///
    /// Takes effect at the next login; an already-open session stays valid.
    pub fn set_user_active(&self, user_id: UserId, is_active: bool) -> AuthResult<User> {
        self.update_account_flags(user_id, |user| user.is_active = is_active)
    }

    /// Add a user to the blacklist, or remove it
    ///
    /// Takes effect at the next login; an already-open session stays valid.
    pub fn set_user_blacklisted(&self, user_id: UserId, blacklisted: bool) -> AuthResult<User> {
        self.update_account_flags(user_id, |user| user.blacklisted = blacklisted)
    }

    fn update_account_flags<F>(&self, user_id: UserId, apply: F) -> AuthResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.list_users();

        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AuthError::UnknownUserId { id: user_id })?;

        apply(user);
        let updated = user.clone();
        self.save_users(&users)?;

        info!(
            "Updated account flags for user: {} (active: {}, blacklisted: {})",
            updated.username, updated.is_active, updated.blacklisted
        );
        Ok(updated)
    }

    /// Aggregate user counts for the admin dashboard
    pub fn user_stats(&self) -> UserStats {
        let users = self.list_users();
        let active_users = users.iter().filter(|u| u.is_active).count();

        UserStats {
            total_users: users.len(),
            active_users,
            inactive_users: users.len() - active_users,
        }
    }

    /// Create the demo fixture users that do not exist yet
    ///
    /// Idempotent; returns only the users created by this call.
    pub fn seed_demo_users(&self) -> AuthResult<Vec<User>> {
        let mut created = Vec::new();

        for fixture in seed::demo_fixtures() {
            if self.find_user_by_username(&fixture.username).is_some() {
                debug!("Demo user already present: {}", fixture.username);
                continue;
            }

            created.push(self.create_user(fixture)?);
        }

        info!("Seeded {} demo users", created.len());
        Ok(created)
    }

    /// Remove both persisted regions, returning the store to a blank state
    pub fn reset(&self) -> AuthResult<()> {
        self.storage.remove(&self.config.users_key)?;
        self.storage.remove(&self.config.session_key)?;

        info!("Cleared all identity data");
        Ok(())
    }

    fn refresh_session_snapshot(&self, user: &User) -> AuthResult<()> {
        if let Some(session) = self.current_session() {
            if session.user.id == user.id {
                let refreshed = Session {
                    token: session.token,
                    user: user.clone(),
                };
                self.storage.save(&self.config.session_key, &refreshed)?;
            }
        }
        Ok(())
    }
}
