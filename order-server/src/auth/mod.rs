//! Authentication
//!
//! - [`JwtService`]: bearer token issue and validation
//! - [`CurrentUser`]: resolved caller, extracted by [`extractor`]
//! - role guards (`require_restaurant`, `require_customer`, `require_admin`)

pub mod extractor;
pub mod guard;
pub mod jwt;

pub use jwt::{
    Claims, CurrentUser, JwtConfig, JwtError, JwtService, MIN_SECRET_LEN, Role,
    generate_secure_jwt_secret,
};
