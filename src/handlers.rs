use crate::{
    AppState, demo,
    errors::AppError,
    models::{Category, Idea, IdeaFormat, NewSavedIdea, Platform, SavedIdea},
    validator,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing;
use uuid::Uuid;

#[derive(Deserialize, Debug)]
pub struct GenerateIdeasRequest {
    pub platform: String,
    pub category: String,
}

#[derive(Serialize, Debug)]
pub struct IdeasResponse {
    pub ideas: Vec<Idea>,
}

#[derive(Deserialize, Debug)]
pub struct SaveIdeaRequest {
    pub platform: String,
    pub category: String,
    pub meme_text: String,
    pub caption: String,
    pub format: String,
    pub hashtags: Vec<String>,
}

/// Handler for POST /api/generate_ideas.
///
/// Platform and category are closed enumerations; anything else is rejected
/// here, before any generation runs. With no backend configured the template
/// generator answers; otherwise the model's raw text goes through the
/// validator and exactly 5 ideas come back.
pub async fn generate_ideas(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateIdeasRequest>,
) -> Result<Json<IdeasResponse>, AppError> {
    let platform = req.platform.parse::<Platform>().map_err(|_| {
        AppError::InvalidInput("Invalid platform. Expected instagram, tiktok, or facebook.".to_string())
    })?;
    let category = req.category.parse::<Category>().map_err(|_| {
        AppError::InvalidInput(
            "Invalid category. Expected cricket, politics, tv_shows, campus_humor, or trending_audio."
                .to_string(),
        )
    })?;

    let ideas = match &state.backend {
        None => {
            tracing::debug!(%platform, %category, "Generating demo ideas");
            demo::generate_demo_ideas(platform, category)
        }
        Some(backend) => {
            let raw = backend.generate_raw(platform, category).await?;
            let ideas = validator::parse_ideas(&raw)?;
            tracing::debug!(%platform, %category, "Validated model output");
            ideas
        }
    };

    tracing::info!(%platform, %category, count = ideas.len(), "Ideas generated");
    Ok(Json(IdeasResponse { ideas }))
}

/// Trims tags, drops empties, and forces a leading `#`.
///
/// Only the save path normalizes the prefix; generated ideas keep whatever
/// prefix the model produced (see the validator).
pub fn normalize_hashtags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            if tag.starts_with('#') {
                tag.to_string()
            } else {
                format!("#{tag}")
            }
        })
        .collect()
}

/// Handler for POST /api/ideas. Validates and stores an idea; 201 on success.
pub async fn save_idea(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveIdeaRequest>,
) -> Result<(StatusCode, Json<SavedIdea>), AppError> {
    let platform = req
        .platform
        .parse::<Platform>()
        .map_err(|_| AppError::InvalidInput("Invalid platform.".to_string()))?;
    let category = req
        .category
        .parse::<Category>()
        .map_err(|_| AppError::InvalidInput("Invalid category.".to_string()))?;
    let format = req
        .format
        .parse::<IdeaFormat>()
        .map_err(|_| AppError::InvalidInput("Invalid format.".to_string()))?;

    let meme_text = req.meme_text.trim();
    let caption = req.caption.trim();
    if meme_text.is_empty() || caption.is_empty() {
        return Err(AppError::InvalidInput(
            "Meme text and caption are required.".to_string(),
        ));
    }

    let saved = state
        .idea_repo
        .save(NewSavedIdea {
            platform,
            category,
            meme_text: meme_text.to_string(),
            caption: caption.to_string(),
            format,
            hashtags: normalize_hashtags(&req.hashtags),
        })
        .await?;

    tracing::info!(idea_id = %saved.id, "Idea saved successfully via handler");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Handler for GET /api/ideas.
pub async fn list_ideas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SavedIdea>>, AppError> {
    tracing::debug!("Listing saved ideas via handler");
    let ideas = state.idea_repo.list_all().await?;
    Ok(Json(ideas))
}

/// Handler for DELETE /api/ideas/{id}. 204 on success, 404 for unknown ids.
pub async fn delete_idea(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let idea_id = Uuid::parse_str(&id_str)?;
    tracing::debug!(%idea_id, "Deleting idea via handler");
    state.idea_repo.delete(idea_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
