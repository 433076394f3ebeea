use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use models::joke;

use crate::errors::ServiceError;
use crate::joke::domain::{Joke, JokeDraft};
use crate::joke::repository::JokeRepository;

/// PostgreSQL-backed joke repository.
pub struct SeaOrmJokeRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl JokeRepository for SeaOrmJokeRepository {
    async fn list(&self) -> Result<Vec<Joke>, ServiceError> {
        Ok(joke::Entity::find().order_by_asc(joke::Column::Id).all(&self.db).await?)
    }

    async fn search(&self, phrase: &str) -> Result<Vec<Joke>, ServiceError> {
        Ok(joke::Entity::find()
            .filter(joke::contains_phrase(phrase))
            .order_by_asc(joke::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find(&self, id: i32) -> Result<Option<Joke>, ServiceError> {
        Ok(joke::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        let n = joke::Entity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn insert(&self, draft: JokeDraft) -> Result<Joke, ServiceError> {
        let am = joke::ActiveModel {
            question: Set(draft.question),
            answer: Set(draft.answer),
            author: Set(draft.author),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: JokeDraft) -> Result<Joke, ServiceError> {
        let am = joke::ActiveModel {
            id: Unchanged(id),
            question: Set(draft.question),
            answer: Set(draft.answer),
            author: Set(draft.author),
        };
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::Conflict(id),
            other => ServiceError::from(other),
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = joke::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    fn draft(q: &str, a: &str) -> JokeDraft {
        JokeDraft { question: q.into(), answer: a.into(), author: None }
    }

    #[tokio::test]
    async fn seaorm_repository_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmJokeRepository { db };

        let marker = Uuid::new_v4().simple().to_string();
        let created = repo.insert(draft(&format!("Why {marker}?"), "Because.")).await?;
        assert!(repo.exists(created.id).await?);
        assert_eq!(repo.find(created.id).await?, Some(created.clone()));

        let hits = repo.search(&marker).await?;
        assert_eq!(hits.iter().map(|j| j.id).collect::<Vec<_>>(), vec![created.id]);

        let updated = repo.update(created.id, draft(&format!("Why now {marker}?"), "Because.")).await?;
        assert_eq!(updated.id, created.id);
        assert!(updated.question.starts_with("Why now"));

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        assert!(!repo.exists(created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_update_of_missing_row_is_conflict() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmJokeRepository { db };

        let created = repo.insert(draft("Q", "A")).await?;
        repo.delete(created.id).await?;
        let err = repo.update(created.id, draft("Q2", "A2")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(id) if id == created.id));
        Ok(())
    }
}
