mod token;

pub use token::{AUTHENTICATION_PATH, AuthError, get_jwt_token};
