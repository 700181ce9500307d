/// Middleware module
///
/// Custom middleware for authentication and file-server metrics.

mod hit_counter;
mod jwt_middleware;

pub use hit_counter::{FileServerHits, HitCounter};
pub use jwt_middleware::{AuthenticatedUser, JwtMiddleware};
