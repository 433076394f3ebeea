use async_trait::async_trait;

use super::domain::{Joke, JokeDraft};
use crate::errors::ServiceError;

/// Storage boundary for the joke collection.
#[async_trait]
pub trait JokeRepository: Send + Sync {
    /// Every joke in the store's natural (primary key) order.
    async fn list(&self) -> Result<Vec<Joke>, ServiceError>;
    /// Jokes whose question or answer contains `phrase` literally.
    async fn search(&self, phrase: &str) -> Result<Vec<Joke>, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<Joke>, ServiceError>;
    async fn exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn insert(&self, draft: JokeDraft) -> Result<Joke, ServiceError>;
    /// Overwrite the record. `ServiceError::Conflict` when the write touched no row.
    async fn update(&self, id: i32, draft: JokeDraft) -> Result<Joke, ServiceError>;
    /// Whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    /// What the next `update` call runs into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum UpdateFault {
        /// Another writer deleted the row before ours landed.
        RowDeleted,
        /// Another writer changed the row before ours landed.
        RowChanged,
    }

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Joke>,
        last_id: i32,
        fault: Option<UpdateFault>,
        writes: usize,
    }

    #[derive(Default)]
    pub struct MockJokeRepository {
        state: Mutex<State>,
    }

    impl MockJokeRepository {
        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        pub fn fail_next_update(&self, fault: UpdateFault) {
            self.state().fault = Some(fault);
        }

        /// Successful inserts, updates and deletes so far.
        pub fn writes(&self) -> usize {
            self.state().writes
        }
    }

    #[async_trait]
    impl JokeRepository for MockJokeRepository {
        async fn list(&self) -> Result<Vec<Joke>, ServiceError> {
            Ok(self.state().rows.values().cloned().collect())
        }

        async fn search(&self, phrase: &str) -> Result<Vec<Joke>, ServiceError> {
            Ok(self
                .state()
                .rows
                .values()
                .filter(|j| j.question.contains(phrase) || j.answer.contains(phrase))
                .cloned()
                .collect())
        }

        async fn find(&self, id: i32) -> Result<Option<Joke>, ServiceError> {
            Ok(self.state().rows.get(&id).cloned())
        }

        async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.state().rows.contains_key(&id))
        }

        async fn insert(&self, draft: JokeDraft) -> Result<Joke, ServiceError> {
            let mut st = self.state();
            st.last_id += 1;
            let joke = Joke { id: st.last_id, question: draft.question, answer: draft.answer, author: draft.author };
            st.rows.insert(joke.id, joke.clone());
            st.writes += 1;
            Ok(joke)
        }

        async fn update(&self, id: i32, draft: JokeDraft) -> Result<Joke, ServiceError> {
            let mut st = self.state();
            match st.fault.take() {
                Some(UpdateFault::RowDeleted) => {
                    st.rows.remove(&id);
                    return Err(ServiceError::Conflict(id));
                }
                Some(UpdateFault::RowChanged) => return Err(ServiceError::Conflict(id)),
                None => {}
            }
            let Some(row) = st.rows.get_mut(&id) else {
                return Err(ServiceError::Conflict(id));
            };
            row.question = draft.question;
            row.answer = draft.answer;
            row.author = draft.author;
            let joke = row.clone();
            st.writes += 1;
            Ok(joke)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state();
            let removed = st.rows.remove(&id).is_some();
            if removed {
                st.writes += 1;
            }
            Ok(removed)
        }
    }
}
