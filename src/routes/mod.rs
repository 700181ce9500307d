mod admin;
mod auth;
mod chirps;
mod health_check;
mod users;

pub use admin::{metrics, reset};
pub use auth::{login, refresh, revoke, LoginRequest, LoginResponse, RefreshResponse};
pub use chirps::{create_chirp, get_chirp, list_chirps, CreateChirpRequest};
pub use health_check::health_check;
pub use users::{create_user, CreateUserRequest, UserResponse};
