//! Template-based idea generation for demo mode.
//!
//! No external service: 5 ideas are derived deterministically from the
//! (platform, category) pair, so the same request always yields the same
//! result. Total for every valid enum input.

use crate::models::{Category, Idea, IdeaFormat, Platform};
use crate::validator::EXPECTED_IDEA_COUNT;

const FORMAT_ROTATION: [IdeaFormat; 3] = [
    IdeaFormat::StaticImage,
    IdeaFormat::Video,
    IdeaFormat::TextOnly,
];

fn template_pool(category: Category) -> &'static [&'static str; 3] {
    match category {
        Category::Cricket => &[
            "When your team needs 6 off 1 and everyone becomes a cricket professor.",
            "POV: You said easy win before the toss.",
            "That one friend celebrates every dot ball like a trophy moment.",
        ],
        Category::Politics => &[
            "Manifesto promises vs week-one reality.",
            "Debate night: long speeches, zero answers.",
            "When the spokesperson says let me clarify for the ninth time.",
        ],
        Category::TvShows => &[
            "Final episode twist nobody expected but everyone posted.",
            "Me explaining side characters like family members.",
            "New season dropped, productivity disappeared.",
        ],
        Category::CampusHumor => &[
            "Group project: one worker and four supervisors.",
            "Attendance at 74.9% and sudden life crisis.",
            "Library during exams: silent panic everywhere.",
        ],
        Category::TrendingAudio => &[
            "Using one trending sound for every life problem.",
            "When the beat drops exactly when confidence drops.",
            "Open app, same viral audio finds you again.",
        ],
    }
}

fn call_to_action(platform: Platform) -> &'static str {
    match platform {
        Platform::Tiktok => "Drop your version.",
        _ => "Tag your friends.",
    }
}

/// Produces the fixed 5 ideas for a (platform, category) pair.
///
/// Template selection is a cheap rotation seeded by the input lengths, not a
/// random draw; formats cycle through the three allowed values; hashtags are
/// always `#`-prefixed and non-empty.
pub fn generate_demo_ideas(platform: Platform, category: Category) -> Vec<Idea> {
    let pool = template_pool(category);
    let platform_str = platform.as_str();
    let category_str = category.as_str();

    (0..EXPECTED_IDEA_COUNT)
        .map(|index| {
            let seed = (index + platform_str.len() + category_str.len()) % pool.len();
            let text = pool[seed];
            Idea {
                meme_text: text.to_string(),
                caption: format!("{} {}", text, call_to_action(platform)),
                format: FORMAT_ROTATION[index % FORMAT_ROTATION.len()],
                hashtags: vec![
                    format!("#{platform_str}"),
                    format!("#{}", category_str.replace('_', "")),
                    "#memepk".to_string(),
                    "#trendgenerator".to_string(),
                ],
            }
        })
        .collect()
}
