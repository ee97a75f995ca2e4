//! Identity collaborator - who is signed in.

mod identity_model;
mod identity_traits;

pub use identity_model::UserIdentity;
pub use identity_traits::{IdentityProviderTrait, StaticIdentityProvider};
