//! Turns raw generative-model text into exactly 5 well-formed [`Idea`] records.
//!
//! Models rarely return clean JSON: the array may sit inside a fenced code
//! block, or between stretches of prose. Extraction tries, in order: the first
//! json-tagged fence, the whole string, and finally the slice between the
//! first `[` and the last `]`. Validation is fail-fast and reports the exact
//! field and element that broke, never a generic "invalid data".

use crate::errors::{IdeaField, ValidationError};
use crate::models::{Idea, IdeaFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const EXPECTED_IDEA_COUNT: usize = 5;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```json\s*(.*?)```").expect("fence pattern is valid"));

/// Full pipeline: extract a JSON value from the text, then validate it.
pub fn parse_ideas(text: &str) -> Result<Vec<Idea>, ValidationError> {
    let value = extract_json_value(text)?;
    validate_ideas(&value)
}

/// Pulls a JSON value out of free-form model text.
///
/// Attempts, in order: the contents of the first json-tagged fenced block,
/// the whole string, and the substring between the first `[` and the last
/// `]`. All three failing is `MalformedResponse`.
pub fn extract_json_value(text: &str) -> Result<Value, ValidationError> {
    if let Some(caps) = JSON_FENCE.captures(text) {
        if let Ok(value) = serde_json::from_str(caps[1].trim()) {
            return Ok(value);
        }
    }

    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }

    let start = text.find('[');
    let end = text.rfind(']');
    if let (Some(start), Some(end)) = (start, end) {
        if end > start {
            if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(ValidationError::MalformedResponse)
}

/// Checks the extracted value against the idea schema and normalizes it.
///
/// The value must be an array of exactly 5 objects. Elements are checked in
/// array order and the first violation wins. On success `meme_text` and
/// `caption` come back trimmed, and hashtags are trimmed with empties dropped.
/// No `#` prefix is enforced here; only the save path does that.
pub fn validate_ideas(value: &Value) -> Result<Vec<Idea>, ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(ValidationError::MalformedResponse);
    };

    if items.len() != EXPECTED_IDEA_COUNT {
        return Err(ValidationError::WrongCount(items.len()));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_idea(item, index))
        .collect()
}

fn validate_idea(item: &Value, index: usize) -> Result<Idea, ValidationError> {
    let invalid = |field| ValidationError::InvalidField { field, index };

    let meme_text = item
        .get("meme_text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(IdeaField::MemeText))?;

    let caption = item
        .get("caption")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(IdeaField::Caption))?;

    let format = item
        .get("format")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<IdeaFormat>().ok())
        .ok_or_else(|| invalid(IdeaField::Format))?;

    let hashtags = item
        .get("hashtags")
        .and_then(Value::as_array)
        .filter(|tags| tags.iter().all(Value::is_string))
        .ok_or_else(|| invalid(IdeaField::Hashtags))?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    Ok(Idea {
        meme_text: meme_text.to_string(),
        caption: caption.to_string(),
        format,
        hashtags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_item(n: usize) -> Value {
        let format = ["static_image", "video", "text_only"][n % 3];
        json!({
            "meme_text": format!("meme {n}"),
            "caption": format!("caption {n}"),
            "format": format,
            "hashtags": ["#one", "#two"],
        })
    }

    fn valid_array() -> Value {
        Value::Array((0..5).map(valid_item).collect())
    }

    #[test]
    fn test_well_formed_array_validates() {
        let ideas = validate_ideas(&valid_array()).unwrap();
        assert_eq!(ideas.len(), 5);
        assert_eq!(ideas[0].meme_text, "meme 0");
        assert_eq!(ideas[0].format, IdeaFormat::StaticImage);
        assert_eq!(ideas[1].format, IdeaFormat::Video);
        assert_eq!(ideas[4].hashtags, vec!["#one", "#two"]);
    }

    #[test]
    fn test_fenced_block_extraction() {
        let body = serde_json::to_string(&valid_array()).unwrap();
        let text = format!("Here are your ideas!\n```json\n{body}\n```\nEnjoy.");
        let ideas = parse_ideas(&text).unwrap();
        assert_eq!(ideas.len(), 5);
    }

    #[test]
    fn test_fence_tag_is_case_insensitive() {
        let body = serde_json::to_string(&valid_array()).unwrap();
        let text = format!("```JSON\n{body}\n```");
        assert_eq!(parse_ideas(&text).unwrap().len(), 5);
    }

    #[test]
    fn test_bracket_slice_fallback() {
        let body = serde_json::to_string(&valid_array()).unwrap();
        // Invalid as whole-string JSON because of the surrounding noise.
        let text = format!("noise {body} trailing");
        let ideas = parse_ideas(&text).unwrap();
        assert_eq!(ideas.len(), 5);
    }

    #[test]
    fn test_unparseable_text_is_malformed() {
        assert_eq!(
            parse_ideas("no json here at all").unwrap_err(),
            ValidationError::MalformedResponse
        );
        assert_eq!(
            parse_ideas("broken [ not json ] really").unwrap_err(),
            ValidationError::MalformedResponse
        );
    }

    #[test]
    fn test_non_array_json_is_malformed() {
        assert_eq!(
            validate_ideas(&json!({"ideas": []})).unwrap_err(),
            ValidationError::MalformedResponse
        );
    }

    #[test]
    fn test_wrong_count_never_truncates_or_pads() {
        let four = Value::Array((0..4).map(valid_item).collect());
        assert_eq!(
            validate_ideas(&four).unwrap_err(),
            ValidationError::WrongCount(4)
        );

        let six = Value::Array((0..6).map(valid_item).collect());
        assert_eq!(
            validate_ideas(&six).unwrap_err(),
            ValidationError::WrongCount(6)
        );
    }

    #[test]
    fn test_invalid_format_reports_field_and_index() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[2]["format"] = json!("gif");
        assert_eq!(
            validate_ideas(&Value::Array(items)).unwrap_err(),
            ValidationError::InvalidField {
                field: IdeaField::Format,
                index: 2
            }
        );
    }

    #[test]
    fn test_blank_caption_is_invalid() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[4]["caption"] = json!("   ");
        assert_eq!(
            validate_ideas(&Value::Array(items)).unwrap_err(),
            ValidationError::InvalidField {
                field: IdeaField::Caption,
                index: 4
            }
        );
    }

    #[test]
    fn test_non_object_element_fails_on_first_field() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[1] = json!("just a string");
        assert_eq!(
            validate_ideas(&Value::Array(items)).unwrap_err(),
            ValidationError::InvalidField {
                field: IdeaField::MemeText,
                index: 1
            }
        );
    }

    #[test]
    fn test_non_string_hashtag_is_invalid() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[0]["hashtags"] = json!(["#fine", 42]);
        assert_eq!(
            validate_ideas(&Value::Array(items)).unwrap_err(),
            ValidationError::InvalidField {
                field: IdeaField::Hashtags,
                index: 0
            }
        );
    }

    #[test]
    fn test_fail_fast_reports_earliest_violation() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[1]["meme_text"] = json!("");
        items[3]["format"] = json!("hologram");
        // Element 1 breaks first; element 3 is never reached.
        assert_eq!(
            validate_ideas(&Value::Array(items)).unwrap_err(),
            ValidationError::InvalidField {
                field: IdeaField::MemeText,
                index: 1
            }
        );
    }

    #[test]
    fn test_output_is_trimmed_and_empty_hashtags_dropped() {
        let mut items: Vec<Value> = (0..5).map(valid_item).collect();
        items[0] = json!({
            "meme_text": "  spaced out  ",
            "caption": "\tcaption\n",
            "format": "text_only",
            // Not #-prefixed on purpose: the generation path leaves prefixes alone.
            "hashtags": [" #tag ", "", "  ", "plain"],
        });
        let ideas = validate_ideas(&Value::Array(items)).unwrap();
        assert_eq!(ideas[0].meme_text, "spaced out");
        assert_eq!(ideas[0].caption, "caption");
        assert_eq!(ideas[0].hashtags, vec!["#tag", "plain"]);
    }

    #[test]
    fn test_round_trip_of_accepted_output() {
        let ideas = validate_ideas(&valid_array()).unwrap();
        let reserialized = serde_json::to_string(&ideas).unwrap();
        let revalidated = parse_ideas(&reserialized).unwrap();
        assert_eq!(revalidated, ideas);
    }
}
