//! HTTP adapter for admin user management.

mod dto;
mod handlers;
mod routes;

pub use dto::UpdateRoleRequest;
pub use handlers::{user_error_response, UserHandlers};
pub use routes::user_routes;
