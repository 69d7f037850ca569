//! Authentication and authorization.
//!
//! Authentication is token-based: `/authentication/register` and
//! `/authentication/login` exchange credentials for a signed bearer token
//! (JWT, HS256 with the configured `secret_key`). Handlers obtain the
//! authenticated principal through the [`current_user::CurrentUser`]
//! extractor, which validates the token and re-reads the user row so role
//! changes take effect immediately.
//!
//! Authorization is role-based: `ADMIN` users manage the catalog and see
//! all bookings, `USER` accounts create and read their own bookings. See
//! [`permissions`].
//!
//! # Modules
//!
//! - [`current_user`]: extractor for the authenticated user in handlers
//! - [`password`]: password hashing and verification using Argon2
//! - [`permissions`]: role-based permission checks
//! - [`token`]: bearer token issuing and validation

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod token;
