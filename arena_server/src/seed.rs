//! Demo account registration.
//!
//! Tournament and news seed data ships inside the store backends; demo
//! accounts go through the real registration path so their password
//! hashes are produced with the configured pepper.

use arena::auth::{AuthError, AuthManager, RegisterRequest};
use arena::store::seed::demo_users;

/// Register the demo accounts, skipping any email that already exists.
/// Returns the number of accounts created.
pub async fn register_demo_users(auth: &AuthManager) -> Result<usize, AuthError> {
    let mut created = 0;
    for demo in demo_users() {
        let request = RegisterRequest {
            email: demo.email.to_string(),
            full_name: demo.full_name.to_string(),
            password: demo.password.to_string(),
            role: demo.role,
        };
        match auth.register(request).await {
            Ok(user) => {
                tracing::info!(email = %user.email, role = %user.role.as_str(), "Registered demo user");
                created += 1;
            }
            Err(AuthError::EmailTaken) => {
                tracing::debug!(email = demo.email, "Demo user already present");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena::store::{MemoryStore, UserStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn registers_all_demo_users_once() {
        let store = Arc::new(MemoryStore::empty());
        let auth = AuthManager::new(
            store.clone(),
            "test_pepper_for_testing_only".to_string(),
            "test_secret_key_for_testing_only".to_string(),
        );

        assert_eq!(register_demo_users(&auth).await.unwrap(), 3);
        assert_eq!(UserStore::list(store.as_ref()).await.unwrap().len(), 3);

        // Idempotent on re-run.
        assert_eq!(register_demo_users(&auth).await.unwrap(), 0);
    }
}
