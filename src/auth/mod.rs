mod middleware;
mod password;
mod token;

pub use middleware::{AUTH_COOKIE, AuthError, RequireAdmin};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenSigner};
