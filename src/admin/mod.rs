pub mod admin_handlers;
pub mod admin_middleware;

pub use admin_middleware::admin_authorization;
