//! Demo fixture users
//!
//! One user per role, matching the accounts the demo UI advertises on its
//! login screen.

use super::service::{DEMO_ADMIN_PASSWORD, DEMO_ADMIN_USERNAME};
use super::types::{NewUser, UserRole};

/// The demo admin fixture, also created on demand by the admin bypass login
pub fn demo_admin() -> NewUser {
    NewUser::new(DEMO_ADMIN_USERNAME, "admin@example.com", DEMO_ADMIN_PASSWORD)
        .with_role(UserRole::Admin)
        .with_full_name("System Admin")
}

/// All demo fixtures, admin first
pub fn demo_fixtures() -> Vec<NewUser> {
    vec![
        demo_admin(),
        NewUser::new("drsmith", "drsmith@example.com", "doctor123")
            .with_role(UserRole::Doctor)
            .with_full_name("Dr. John Smith")
            .with_phone("1234567890"),
        NewUser::new("johndoe", "johndoe@example.com", "patient123")
            .with_role(UserRole::Patient)
            .with_full_name("John Doe")
            .with_phone("9876543210"),
    ]
}
