//! Accounts and the signed-in user carried by the session.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Marketplace role of an account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Supplier,
    Customer,
    Provider,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Supplier => write!(f, "supplier"),
            Role::Customer => write!(f, "customer"),
            Role::Provider => write!(f, "provider"),
        }
    }
}

/// Account as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Successful login exchange.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LoginSession {
    pub access_token: String,
    pub user: User,
}

/// Signed-in user stored in the identity cookie.
///
/// The bearer token is never rendered; templates only see the public fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Copy safe to hand to templates.
    pub fn public_view(&self) -> Self {
        Self {
            access_token: String::new(),
            ..self.clone()
        }
    }
}

impl From<LoginSession> for AuthenticatedUser {
    fn from(session: LoginSession) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email,
            name: session.user.name,
            role: session.user.role,
            access_token: session.access_token,
        }
    }
}
