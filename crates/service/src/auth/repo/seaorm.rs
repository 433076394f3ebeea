use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use models::user_account;

use crate::auth::domain::{Account, AuthUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

/// A concurrent registration that loses the race on the unique email index
/// reports the same conflict as the pre-insert lookup.
fn insert_error(e: DbErr) -> AuthError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Conflict,
        _ => AuthError::Repository(e.to_string()),
    }
}

fn to_user(m: &user_account::Model) -> AuthUser {
    AuthUser { id: m.id, email: m.email.clone(), name: m.name.clone() }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let res = user_account::Entity::find()
            .filter(user_account::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|m| Account { user: to_user(&m), password_hash: m.password_hash }))
    }

    async fn create_account(&self, email: &str, name: &str, password_hash: String) -> Result<AuthUser, AuthError> {
        let am = user_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().into()),
        };
        let created = am.insert(&self.db).await.map_err(insert_error)?;
        Ok(to_user(&created))
    }
}
