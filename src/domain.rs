use crate::errors::{BackendError, RepoError};
use crate::models::{Category, NewSavedIdea, Platform, SavedIdea};
use async_trait::async_trait;
use uuid::Uuid;

/// Trait defining the generative backend used in live mode.
///
/// Returns the model's raw text output; the validator turns it into ideas.
#[async_trait]
pub trait GenerativeBackend: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    async fn generate_raw(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<String, BackendError>;
}

/// Trait defining operations for storing and retrieving saved ideas.
#[async_trait]
pub trait IdeaRepository: Send + Sync + 'static {
    /// Stores a validated idea and returns the stored record.
    async fn save(&self, idea: NewSavedIdea) -> Result<SavedIdea, RepoError>;

    /// Lists all saved ideas, newest first.
    async fn list_all(&self) -> Result<Vec<SavedIdea>, RepoError>;

    /// Deletes a saved idea by its unique ID.
    /// Returns `RepoError::NotFound` if no such idea exists.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
