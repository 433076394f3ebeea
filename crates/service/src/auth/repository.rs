use async_trait::async_trait;

use super::domain::{Account, AuthUser};
use super::errors::AuthError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;
    async fn create_account(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: Mutex<HashMap<String, Account>>, // key: normalized email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
            let accounts = self.accounts.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(accounts.get(email).cloned())
        }

        async fn create_account(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError> {
            let mut accounts = self.accounts.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            if accounts.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string() };
            accounts.insert(email.to_string(), Account { user: user.clone(), password_hash });
            Ok(user)
        }
    }
}
