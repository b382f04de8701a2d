use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error for parsing one of the closed enumerations from request input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            "facebook" => Ok(Platform::Facebook),
            other => Err(UnknownVariant {
                kind: "platform",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cricket,
    Politics,
    TvShows,
    CampusHumor,
    TrendingAudio,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cricket => "cricket",
            Category::Politics => "politics",
            Category::TvShows => "tv_shows",
            Category::CampusHumor => "campus_humor",
            Category::TrendingAudio => "trending_audio",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cricket" => Ok(Category::Cricket),
            "politics" => Ok(Category::Politics),
            "tv_shows" => Ok(Category::TvShows),
            "campus_humor" => Ok(Category::CampusHumor),
            "trending_audio" => Ok(Category::TrendingAudio),
            other => Err(UnknownVariant {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdeaFormat {
    StaticImage,
    Video,
    TextOnly,
}

impl IdeaFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaFormat::StaticImage => "static_image",
            IdeaFormat::Video => "video",
            IdeaFormat::TextOnly => "text_only",
        }
    }
}

impl fmt::Display for IdeaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static_image" => Ok(IdeaFormat::StaticImage),
            "video" => Ok(IdeaFormat::Video),
            "text_only" => Ok(IdeaFormat::TextOnly),
            other => Err(UnknownVariant {
                kind: "format",
                value: other.to_string(),
            }),
        }
    }
}

/// One generated meme concept. Never mutated after creation; ownership moves to
/// the caller (rendered, optionally saved, optionally discarded).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub meme_text: String,
    pub caption: String,
    pub format: IdeaFormat,
    pub hashtags: Vec<String>,
}

/// A saved idea as stored by the repository. Held for the process lifetime only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedIdea {
    pub id: Uuid,
    pub platform: Platform,
    pub category: Category,
    pub meme_text: String,
    pub caption: String,
    pub format: IdeaFormat,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated save-path input; the repository assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedIdea {
    pub platform: Platform,
    pub category: Category,
    pub meme_text: String,
    pub caption: String,
    pub format: IdeaFormat,
    pub hashtags: Vec<String>,
}
