//! Sentence/video metadata to caption annotation remapping.
//!
//! The input document carries `sentences` and `videos`; the output carries
//! `annotations`, `images`, `type` and `licenses`. Every other top-level key
//! is carried over untouched.

use crate::domain::model::{Document, RemapSummary, TransformResult};
use crate::utils::error::{RemapError, Result};
use serde_json::{Number, Value};
use std::str::FromStr;

pub const SENTENCES_KEY: &str = "sentences";
pub const VIDEOS_KEY: &str = "videos";
pub const ANNOTATIONS_KEY: &str = "annotations";
pub const IMAGES_KEY: &str = "images";
pub const TYPE_KEY: &str = "type";
pub const LICENSES_KEY: &str = "licenses";

pub const CAPTION_TYPE: &str = "captions";

/// Length of the `"video"` prefix stripped from every `video_id`.
pub const VIDEO_ID_PREFIX_LEN: usize = 5;

const OUTPUT_KEYS: [&str; 4] = [ANNOTATIONS_KEY, IMAGES_KEY, TYPE_KEY, LICENSES_KEY];

/// Parses the numeric part of a `video_id` such as `"video7205"`.
///
/// The first five characters are discarded whatever they are. The rest must
/// be a base-10 integer: surrounding whitespace, a leading sign and single
/// underscores between digits are accepted, and there is no range limit.
pub fn parse_image_id(video_id: &str) -> Result<Number> {
    image_id_from(video_id, "video_id")
}

fn image_id_from(video_id: &str, context: &str) -> Result<Number> {
    let quoted = format!("\"{}\"", video_id);

    let suffix = match video_id.char_indices().nth(VIDEO_ID_PREFIX_LEN) {
        Some((offset, _)) => &video_id[offset..],
        None => {
            return Err(RemapError::format(
                quoted,
                context,
                format!("has no characters after its {}-character prefix", VIDEO_ID_PREFIX_LEN),
            ))
        }
    };

    let literal = integer_literal(suffix.trim()).ok_or_else(|| {
        RemapError::format(
            quoted.clone(),
            context,
            format!("has a non-integer suffix '{}'", suffix),
        )
    })?;

    Number::from_str(&literal).map_err(|e| {
        RemapError::format(
            quoted,
            context,
            format!("has a non-integer suffix '{}' ({})", suffix, e),
        )
    })
}

/// Normalizes an integer literal to JSON number text: sign kept only when
/// negative, digit-group underscores and leading zeros dropped.
fn integer_literal(text: &str) -> Option<String> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut digits = String::with_capacity(body.len());
    let mut previous_was_digit = false;
    for c in body.chars() {
        match c {
            '0'..='9' => {
                digits.push(c);
                previous_was_digit = true;
            }
            '_' if previous_was_digit => previous_was_digit = false,
            _ => return None,
        }
    }
    // Empty, or ends with an underscore.
    if !previous_was_digit {
        return None;
    }

    let magnitude = digits.trim_start_matches('0');
    Some(match (negative, magnitude) {
        (_, "") => "0".to_string(),
        (true, magnitude) => format!("-{}", magnitude),
        (false, magnitude) => magnitude.to_string(),
    })
}

/// Applies the remapping to a whole document.
///
/// `sentences` is processed before `videos` is looked up, and every
/// `image_id` is derived before any `id` is copied, so the first failure
/// reported matches a field-by-field walk of the input.
pub fn remap_document(document: Document) -> Result<TransformResult> {
    let mut data = document.data;

    let sentences = data
        .shift_remove(SENTENCES_KEY)
        .ok_or_else(|| RemapError::schema(SENTENCES_KEY, "document root"))?;
    let Value::Array(mut annotations) = sentences else {
        return Err(RemapError::schema(
            SENTENCES_KEY,
            "document root (expected an array)",
        ));
    };

    for (index, item) in annotations.iter_mut().enumerate() {
        let context = format!("{}[{}]", SENTENCES_KEY, index);
        let record = item
            .as_object_mut()
            .ok_or_else(|| RemapError::schema("video_id", format!("{} (not an object)", context)))?;

        let image_id = match record.get("video_id") {
            Some(Value::String(video_id)) => image_id_from(video_id, &context)?,
            Some(other) => {
                return Err(RemapError::format(other.to_string(), context, "is not a string"))
            }
            None => return Err(RemapError::schema("video_id", context)),
        };
        record.insert("image_id".to_string(), Value::Number(image_id));
    }

    for (index, item) in annotations.iter_mut().enumerate() {
        // Every item was checked to be an object by the pass above.
        if let Some(record) = item.as_object_mut() {
            let sen_id = record
                .get("sen_id")
                .cloned()
                .ok_or_else(|| RemapError::schema("sen_id", format!("{}[{}]", SENTENCES_KEY, index)))?;
            record.insert("id".to_string(), sen_id);
        }
    }

    let videos = data
        .shift_remove(VIDEOS_KEY)
        .ok_or_else(|| RemapError::schema(VIDEOS_KEY, "document root"))?;

    let summary = RemapSummary {
        annotations: annotations.len(),
        images: videos.as_array().map(Vec::len),
        passthrough_keys: data
            .keys()
            .filter(|key| !OUTPUT_KEYS.contains(&key.as_str()))
            .cloned()
            .collect(),
    };

    data.insert(ANNOTATIONS_KEY.to_string(), Value::Array(annotations));
    data.insert(IMAGES_KEY.to_string(), videos);
    data.insert(TYPE_KEY.to_string(), Value::String(CAPTION_TYPE.to_string()));
    data.insert(LICENSES_KEY.to_string(), Value::Array(Vec::new()));

    Ok(TransformResult {
        document: Document::new(data),
        summary,
    })
}

/// Convenience wrapper over [`remap_document`] for callers holding a raw value.
pub fn remap_value(value: Value) -> Result<Value> {
    let document = Document::try_from(value)?;
    Ok(remap_document(document)?.document.into_value())
}
