use std::sync::RwLock;

use super::UserIdentity;

/// Supplies the current user. `None` means signed out, which is not an error.
pub trait IdentityProviderTrait: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Identity provider holding a user set by the host application.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    user: RwLock<Option<UserIdentity>>,
}

impl StaticIdentityProvider {
    pub fn new(user: Option<UserIdentity>) -> Self {
        Self {
            user: RwLock::new(user),
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self::new(Some(UserIdentity::new(user_id)))
    }

    pub fn sign_in(&self, user: UserIdentity) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl IdentityProviderTrait for StaticIdentityProvider {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
