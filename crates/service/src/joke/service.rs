use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::domain::{Joke, JokeInput};
use super::repository::JokeRepository;
use crate::errors::ServiceError;

/// Catalog operations over the joke collection.
///
/// Identity is not checked here; callers gate mutating operations before
/// delegating.
pub struct JokeService<R: JokeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: JokeRepository + ?Sized> JokeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Joke>, ServiceError> {
        self.repo.list().await
    }

    /// Jokes whose question or answer contains `phrase`.
    ///
    /// Matching is case-sensitive, following the PostgreSQL default collation
    /// for `LIKE`. A missing or empty phrase matches every joke, so
    /// `search(None)` returns the same rows as `list()`.
    ///
    /// # Examples
    /// ```
    /// use service::joke::{JokeInput, JokeService, repository::mock::MockJokeRepository};
    /// use std::sync::Arc;
    /// let svc = JokeService::new(Arc::new(MockJokeRepository::default()));
    /// tokio_test::block_on(svc.create(JokeInput::new("Why did the duck cross?", "Quack.", None))).unwrap();
    /// tokio_test::block_on(svc.create(JokeInput::new("Knock knock", "Who's there?", None))).unwrap();
    /// let hits = tokio_test::block_on(svc.search(Some("duck"))).unwrap();
    /// assert_eq!(hits.len(), 1);
    /// let all = tokio_test::block_on(svc.search(None)).unwrap();
    /// assert_eq!(all.len(), 2);
    /// ```
    #[instrument(skip(self))]
    pub async fn search(&self, phrase: Option<&str>) -> Result<Vec<Joke>, ServiceError> {
        let phrase = phrase.unwrap_or_default();
        if phrase.is_empty() {
            return self.repo.list().await;
        }
        let hits = self.repo.search(phrase).await?;
        info!(count = hits.len(), "joke_search");
        Ok(hits)
    }

    /// `None` when no joke has this id.
    pub async fn get(&self, id: i32) -> Result<Option<Joke>, ServiceError> {
        self.repo.find(id).await
    }

    /// Validate and store a new joke. The store assigns the id; an id in the
    /// input is ignored.
    ///
    /// # Examples
    /// ```
    /// use service::joke::{JokeInput, JokeService, repository::mock::MockJokeRepository};
    /// use std::sync::Arc;
    /// let svc = JokeService::new(Arc::new(MockJokeRepository::default()));
    /// let joke = tokio_test::block_on(svc.create(JokeInput::new("Why?", "Because.", Some("A")))).unwrap();
    /// let found = tokio_test::block_on(svc.get(joke.id)).unwrap();
    /// assert_eq!(found, Some(joke));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: JokeInput) -> Result<Joke, ServiceError> {
        let draft = input.validate().map_err(|rejected| {
            warn!(fields = ?rejected.fields(), "joke_create_rejected");
            ServiceError::Validation(rejected)
        })?;
        let joke = self.repo.insert(draft).await?;
        info!(id = joke.id, "joke_created");
        Ok(joke)
    }

    /// Overwrite question, answer and author of joke `id`.
    ///
    /// Checks run in order: an `input.id` differing from `id` is NotFound,
    /// a missing record is NotFound, then field validation. A write that hits
    /// no row re-checks existence: gone is NotFound, still present is a
    /// `Conflict` for the caller to surface.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: JokeInput) -> Result<Joke, ServiceError> {
        if input.id.is_some_and(|own| own != id) {
            warn!(input_id = ?input.id, "joke_update_id_mismatch");
            return Err(ServiceError::NotFound(id));
        }
        if !self.repo.exists(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        let draft = input.validate().map_err(|rejected| {
            warn!(fields = ?rejected.fields(), "joke_update_rejected");
            ServiceError::Validation(rejected)
        })?;
        match self.repo.update(id, draft).await {
            Ok(joke) => {
                info!("joke_updated");
                Ok(joke)
            }
            Err(ServiceError::Conflict(_)) => {
                if self.repo.exists(id).await? {
                    error!("joke_update_conflict");
                    Err(ServiceError::Conflict(id))
                } else {
                    warn!("joke_deleted_during_update");
                    Err(ServiceError::NotFound(id))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Remove joke `id`. Absent records are left alone and still succeed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let removed = self.repo.delete(id).await?;
        info!(removed, "joke_delete");
        Ok(())
    }
}
