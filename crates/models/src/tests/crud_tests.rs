use crate::db::connect;
use crate::joke;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use anyhow::Result;
use migration::MigratorTrait;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn test_joke_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let marker = Uuid::new_v4().to_string();
    let created = joke::ActiveModel {
        question: Set(format!("Why {}?", marker)),
        answer: Set("Because.".into()),
        author: Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(created.id > 0);
    assert_eq!(created.author, None);

    let found = joke::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let mut am: joke::ActiveModel = created.clone().into();
    am.author = Set(Some("A".into()));
    let updated = am.update(&db).await?;
    assert_eq!(updated.author.as_deref(), Some("A"));

    joke::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(joke::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_contains_phrase_is_literal_and_case_sensitive() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let marker = Uuid::new_v4().simple().to_string();
    let rows = [
        (format!("{marker} 100% sure"), "yes".to_string()),
        (format!("{marker} 1000 sure"), "no".to_string()),
        ("unrelated".to_string(), format!("{marker} in the answer")),
    ];
    let mut ids = vec![];
    for (q, a) in rows {
        let m = joke::ActiveModel { question: Set(q), answer: Set(a), author: Set(None), ..Default::default() }
            .insert(&db)
            .await?;
        ids.push(m.id);
    }

    let hits = joke::Entity::find().filter(joke::contains_phrase(&marker)).all(&db).await?;
    assert_eq!(hits.len(), 3);

    let pct = joke::Entity::find().filter(joke::contains_phrase(&format!("{marker} 100%"))).all(&db).await?;
    assert_eq!(pct.len(), 1, "percent sign must not act as a wildcard");

    let upper = joke::Entity::find().filter(joke::contains_phrase(&marker.to_uppercase())).all(&db).await?;
    assert!(upper.is_empty());

    for id in ids {
        joke::Entity::delete_by_id(id).exec(&db).await?;
    }
    Ok(())
}
