use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::{repo::seaorm::SeaOrmAuthRepository, repository::AuthRepository, AuthService, TokenIssuer};
use service::joke::{repo::seaorm::SeaOrmJokeRepository, JokeRepository, JokeService};

pub type SharedJokeService = Arc<JokeService<dyn JokeRepository>>;
pub type SharedAuthService = Arc<AuthService<dyn AuthRepository>>;

#[derive(Clone)]
pub struct ServerState {
    pub jokes: SharedJokeService,
    pub auth: SharedAuthService,
}

impl ServerState {
    pub fn new(jokes: Arc<dyn JokeRepository>, accounts: Arc<dyn AuthRepository>, tokens: TokenIssuer) -> Self {
        Self {
            jokes: Arc::new(JokeService::new(jokes)),
            auth: Arc::new(AuthService::new(accounts, tokens)),
        }
    }

    pub fn from_db(db: DatabaseConnection, tokens: TokenIssuer) -> Self {
        Self::new(
            Arc::new(SeaOrmJokeRepository { db: db.clone() }),
            Arc::new(SeaOrmAuthRepository { db }),
            tokens,
        )
    }
}

pub fn token_issuer(cfg: &configs::AuthConfig) -> TokenIssuer {
    TokenIssuer::new(
        cfg.jwt_secret.clone(),
        chrono::Duration::hours(cfg.session_ttl_hours),
        chrono::Duration::minutes(cfg.antiforgery_ttl_minutes),
    )
}
