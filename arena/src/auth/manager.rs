//! Authentication manager implementation.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::warn;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    errors::{AuthError, AuthResult},
    models::{AccessTokenClaims, LoginRequest, RegisterRequest, Session, SessionTokens},
};
use crate::store::UserStore;
use crate::user::{StoredUser, User};

/// Authentication manager
///
/// Passwords are hashed with Argon2id plus a server-side pepper. Access
/// tokens are short-lived JWTs; refresh tokens are opaque UUIDs tracked
/// in an in-process session map and rotated on every refresh.
pub struct AuthManager {
    users: Arc<dyn UserStore>,
    sessions: RwLock<HashMap<String, Session>>,
    pepper: String,
    jwt_secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `users` - User account store
    /// * `pepper` - Server-side pepper for password hashing
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(users: Arc<dyn UserStore>, pepper: String, jwt_secret: String) -> Self {
        Self {
            users,
            sessions: RwLock::new(HashMap::new()),
            pepper,
            jwt_secret,
            access_token_duration: Duration::minutes(15),
            refresh_token_duration: Duration::days(7),
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailTaken` - Email already registered
    /// * `AuthError::InvalidEmail` - Email format invalid
    /// * `AuthError::WeakPassword` - Password too weak
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        self.validate_email(&request.email)?;
        self.validate_password(&request.password)?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: request.email,
            full_name: request.full_name,
            role: request.role,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };

        let profile = self
            .users
            .insert(StoredUser {
                user,
                password_hash,
            })
            .await?;

        Ok(profile)
    }

    /// Login a user
    ///
    /// # Arguments
    ///
    /// * `request` - Login request with email and password
    /// * `device_fingerprint` - Device fingerprint (User-Agent hash)
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - Email not registered
    /// * `AuthError::InvalidPassword` - Incorrect password
    /// * `AuthError::AccountInactive` - Account deactivated
    pub async fn login(
        &self,
        request: LoginRequest,
        device_fingerprint: String,
    ) -> AuthResult<(User, SessionTokens)> {
        let stored = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Err(err) = self.verify_password(&request.password, &stored.password_hash) {
            warn!("Failed login attempt for {}", request.email);
            return Err(err);
        }

        if !stored.user.is_active {
            return Err(AuthError::AccountInactive);
        }

        let now = Utc::now();
        self.users.touch_last_login(&stored.user.id, now).await?;

        let mut user = stored.user;
        user.last_login = Some(now);

        let tokens = self.create_session(&user, device_fingerprint).await?;

        Ok((user, tokens))
    }

    /// Fetch the profile behind an authenticated user id
    pub async fn profile(&self, user_id: &str) -> AuthResult<User> {
        self.users
            .get(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Create a new session with access and refresh tokens
    async fn create_session(
        &self,
        user: &User,
        device_fingerprint: String,
    ) -> AuthResult<SessionTokens> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = Uuid::new_v4().to_string();

        let now = Utc::now();
        let session = Session {
            token: refresh_token.clone(),
            user_id: user.id.clone(),
            device_fingerprint,
            created_at: now,
            expires_at: now + self.refresh_token_duration,
            last_used: now,
        };

        self.sessions
            .write()
            .await
            .insert(refresh_token.clone(), session);

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }

    /// Refresh access token using refresh token
    ///
    /// The old refresh token is always invalidated; a new pair is issued
    /// (token rotation).
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - Unknown token or fingerprint mismatch
    /// * `AuthError::SessionExpired` - Refresh token expired
    pub async fn refresh_token(
        &self,
        refresh_token: String,
        device_fingerprint: String,
    ) -> AuthResult<SessionTokens> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&refresh_token)
            .ok_or(AuthError::InvalidRefreshToken)?;

        if session.expires_at < Utc::now() {
            return Err(AuthError::SessionExpired);
        }

        if session.device_fingerprint != device_fingerprint {
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = self
            .users
            .get(&session.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.create_session(&user, device_fingerprint).await
    }

    /// Logout user by invalidating refresh token
    pub async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        self.sessions.write().await.remove(refresh_token);
        Ok(())
    }

    /// Verify an access token
    ///
    /// # Returns
    ///
    /// * `AuthResult<AccessTokenClaims>` - Decoded claims or error
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let token_data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password with Argon2id + pepper
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidPassword)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidPassword)
    }

    /// Generate JWT access token
    fn generate_access_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: (now + self.access_token_duration).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Validate email format
    fn validate_email(&self, email: &str) -> AuthResult<()> {
        let len = email.len();
        if len < 5 || len > 254 {
            return Err(AuthError::InvalidEmail(
                "Email must be 5-254 characters".to_string(),
            ));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(AuthError::InvalidEmail(
                "Email must contain '@'".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(AuthError::InvalidEmail(
                "Email must have a local part and a dotted domain".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate password strength
    fn validate_password(&self, password: &str) -> AuthResult<()> {
        if password.len() < 8 {
            return Err(AuthError::WeakPassword(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());

        if !has_digit || !has_uppercase || !has_lowercase {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one number, one uppercase and one lowercase letter"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
