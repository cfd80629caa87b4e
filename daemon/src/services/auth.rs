//! Admin sign-in: password hashing and signed session tokens.
//!
//! A token is `hex(claims json) "." hex(hmac-sha256(secret, claims json))`. It carries its own
//! expiry, there is no server-side session table.

use std::time::{SystemTime, UNIX_EPOCH};

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use hmac::{Hmac, Mac};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use surrealdb::{Connection, Surreal};
use thiserror::Error;
use tracing::instrument;

use folio_core::config::AuthSettings;
use folio_storage::{
    db::{
        crud::Document,
        schemas::{
            parse_id, record_key,
            user::{TABLE_NAME as USER_TABLE_NAME, User},
        },
    },
    errors::Error as StorageError,
};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    Expired,
    #[error("An admin account already exists")]
    AdminExists,
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What a session token vouches for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role: String,
    /// Expiry, in seconds since the unix epoch.
    pub exp: u64,
}

impl Claims {
    #[must_use]
    pub fn for_user(user: &User, ttl_hours: u64, now: u64) -> Self {
        Self {
            user_id: record_key(&user.id),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: now.saturating_add(ttl_hours.saturating_mul(3600)),
        }
    }
}

/// Seconds since the unix epoch.
#[must_use]
#[inline]
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Hash a password into a PHC string.
///
/// # Errors
///
/// Fails if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

fn mac(secret: &str) -> Result<Hmac<Sha256>, AuthError> {
    Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::InvalidToken)
}

/// Sign `claims` with `secret`.
///
/// # Errors
///
/// Fails if the claims can't be serialized.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    let payload = serde_json::to_vec(claims).map_err(|_| AuthError::InvalidToken)?;
    let mut mac = mac(secret)?;
    mac.update(&payload);
    Ok(format!(
        "{}.{}",
        hex::encode(&payload),
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Check the signature and expiry of a token, returning its claims.
///
/// # Errors
///
/// [`AuthError::InvalidToken`] for anything malformed or wrongly signed,
/// [`AuthError::Expired`] once `now` is past the expiry.
pub fn verify_token(token: &str, secret: &str, now: u64) -> Result<Claims, AuthError> {
    let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
    let payload = hex::decode(payload).map_err(|_| AuthError::InvalidToken)?;
    let signature = hex::decode(signature).map_err(|_| AuthError::InvalidToken)?;

    let mut mac = mac(secret)?;
    mac.update(&payload);
    mac.verify_slice(&signature)
        .map_err(|_| AuthError::InvalidToken)?;

    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;
    if claims.exp <= now {
        return Err(AuthError::Expired);
    }
    Ok(claims)
}

/// Check an email/password pair, returning the user and a fresh token.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
///
/// # Errors
///
/// [`AuthError::InvalidCredentials`], or the store error if the user couldn't be read.
#[instrument(skip(password, settings))]
pub async fn login<C: Connection>(
    db: &Surreal<C>,
    settings: &AuthSettings,
    email: &str,
    password: &str,
) -> Result<(User, String), AuthError> {
    let Some(user) = User::read_by_email(db, email).await? else {
        warn!("Login attempt for unknown user");
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash) {
        warn!("Login attempt with a wrong password for {}", user.email);
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_token(
        &Claims::for_user(&user, settings.token_ttl_hours, now()),
        &settings.token_secret,
    )?;
    info!("{} signed in", user.email);
    Ok((user, token))
}

/// Resolve a token to the user it was issued to.
///
/// # Errors
///
/// Token errors from [`verify_token`], [`AuthError::InvalidToken`] if the user no longer exists.
#[instrument(skip(token, settings))]
pub async fn authenticate<C: Connection>(
    db: &Surreal<C>,
    settings: &AuthSettings,
    token: &str,
) -> Result<User, AuthError> {
    let claims = verify_token(token, &settings.token_secret, now())?;
    let id = parse_id(USER_TABLE_NAME, &claims.user_id).ok_or(AuthError::InvalidToken)?;
    User::read(db, id).await?.ok_or(AuthError::InvalidToken)
}

/// Create the first admin account.
///
/// # Errors
///
/// [`AuthError::AdminExists`] if there already is an admin, otherwise hashing or store errors.
#[instrument(skip(password))]
pub async fn create_admin<C: Connection>(
    db: &Surreal<C>,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    if User::count_admins(db).await? > 0 {
        return Err(AuthError::AdminExists);
    }

    let user = User::new_admin(name, email, hash_password(password)?);
    let user = User::create(db, user).await?.ok_or(StorageError::NotFound)?;
    info!("Created admin account for {}", user.email);
    Ok(user)
}
