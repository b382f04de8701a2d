use crate::{
    domain::IdeaRepository,
    errors::RepoError,
    models::{NewSavedIdea, SavedIdea},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{self, info};
use uuid::Uuid;

/// Ephemeral saved-idea store: lives for the process lifetime only.
///
/// Demo-mode persistence is explicitly local and throwaway, so a lock around
/// a Vec is the whole implementation. Newest ideas sit at the front.
#[derive(Debug, Default)]
pub struct InMemoryIdeaRepository {
    ideas: RwLock<Vec<SavedIdea>>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        info!("Initializing InMemoryIdeaRepository");
        Self::default()
    }
}

#[async_trait]
impl IdeaRepository for InMemoryIdeaRepository {
    async fn save(&self, idea: NewSavedIdea) -> Result<SavedIdea, RepoError> {
        let saved = SavedIdea {
            id: Uuid::new_v4(),
            platform: idea.platform,
            category: idea.category,
            meme_text: idea.meme_text,
            caption: idea.caption,
            format: idea.format,
            hashtags: idea.hashtags,
            created_at: Utc::now(),
        };

        let mut ideas = self.ideas.write().await;
        ideas.insert(0, saved.clone());
        tracing::debug!(idea_id = %saved.id, total = ideas.len(), "Stored idea");
        Ok(saved)
    }

    async fn list_all(&self) -> Result<Vec<SavedIdea>, RepoError> {
        let ideas = self.ideas.read().await;
        tracing::debug!(total = ideas.len(), "Listing saved ideas");
        Ok(ideas.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut ideas = self.ideas.write().await;
        let before = ideas.len();
        ideas.retain(|idea| idea.id != id);
        if ideas.len() == before {
            return Err(RepoError::NotFound(id));
        }
        tracing::debug!(idea_id = %id, "Deleted idea");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, IdeaFormat, Platform};

    fn new_idea(meme_text: &str) -> NewSavedIdea {
        NewSavedIdea {
            platform: Platform::Instagram,
            category: Category::Cricket,
            meme_text: meme_text.to_string(),
            caption: "caption".to_string(),
            format: IdeaFormat::StaticImage,
            hashtags: vec!["#cricket".to_string()],
        }
    }

    #[tokio::test]
    async fn test_save_then_list_returns_newest_first() {
        let repo = InMemoryIdeaRepository::new();
        repo.save(new_idea("first")).await.unwrap();
        repo.save(new_idea("second")).await.unwrap();

        let ideas = repo.list_all().await.unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].meme_text, "second");
        assert_eq!(ideas[1].meme_text, "first");
    }

    #[tokio::test]
    async fn test_save_assigns_unique_ids() {
        let repo = InMemoryIdeaRepository::new();
        let a = repo.save(new_idea("a")).await.unwrap();
        let b = repo.save(new_idea("b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_target() {
        let repo = InMemoryIdeaRepository::new();
        let keep = repo.save(new_idea("keep")).await.unwrap();
        let gone = repo.save(new_idea("gone")).await.unwrap();

        repo.delete(gone.id).await.unwrap();

        let ideas = repo.list_all().await.unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let repo = InMemoryIdeaRepository::new();
        let missing = Uuid::new_v4();
        match repo.delete(missing).await {
            Err(RepoError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
