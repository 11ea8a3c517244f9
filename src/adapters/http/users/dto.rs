//! Request bodies for user endpoints.

use serde::Deserialize;

use crate::domain::user::UserRole;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}
