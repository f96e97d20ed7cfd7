use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{errors::AppResult, models::domain::LearningNote};

/// Read access to note content owned by the persistence layer.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<LearningNote>>;
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<i64, LearningNote>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, note: LearningNote) {
        let mut notes = self.notes.write().await;
        notes.insert(note.id, note);
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<LearningNote>> {
        let notes = self.notes.read().await;
        Ok(notes.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_repository_finds_inserted_notes() {
        let repository = InMemoryNoteRepository::new();
        repository
            .insert(LearningNote::new(7, "WebSocket", "<p>full duplex</p>"))
            .await;

        let note = repository.find_by_id(7).await.unwrap();
        assert_eq!(note.map(|n| n.title), Some("WebSocket".to_string()));
        assert_eq!(repository.find_by_id(8).await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_replaces_existing_note() {
        let repository = InMemoryNoteRepository::new();
        repository.insert(LearningNote::new(1, "old", "a")).await;
        repository.insert(LearningNote::new(1, "new", "b")).await;

        let note = repository.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(note.content, "b");
    }
}
