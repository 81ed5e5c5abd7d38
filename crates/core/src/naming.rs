//! Filename conventions for stories, scene assets, and rendered videos.
//!
//! All names are derived deterministically from story data so that a
//! directory listing alone reveals what belongs to what.

use crate::types::Timestamp;

/// Lowercase a string and replace every run of non-alphanumeric
/// characters with a single underscore.
///
/// # Examples
///
/// ```
/// use wildtale_core::naming::slugify;
///
/// assert_eq!(slugify("Emperor Penguin"), "emperor_penguin");
/// assert_eq!(slugify("  Red   Fox!  "), "red_fox");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_sep = true;

    for c in input.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }

    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Generate the story JSON filename.
///
/// Convention: `{animal_slug}_{YYYYMMDD_HHMMSS}.json`.
pub fn story_filename(animal: &str, created_at: Timestamp) -> String {
    format!(
        "{}_{}.json",
        slugify(animal),
        created_at.format("%Y%m%d_%H%M%S")
    )
}

/// Filename for a scene's generated still image.
pub fn scene_image_filename(scene_number: u32) -> String {
    format!("scene_{scene_number}.png")
}

/// Filename for a scene's synthesized narration audio.
pub fn scene_audio_filename(scene_number: u32) -> String {
    format!("scene_{scene_number}.mp3")
}

/// Filename for a scene's intermediate rendered clip.
pub fn scene_clip_filename(scene_number: u32) -> String {
    format!("scene_{scene_number}.mp4")
}

/// Generate the rendered video filename from a story title.
///
/// Convention: keep alphanumerics, spaces, dashes, and underscores; trim;
/// replace spaces with underscores; append `.mp4`. Falls back to `story`
/// when the title contains no usable characters.
///
/// # Examples
///
/// ```
/// use wildtale_core::naming::video_filename;
///
/// assert_eq!(video_filename("A Lion's Journey"), "A_Lions_Journey.mp4");
/// assert_eq!(video_filename("!!!"), "story.mp4");
/// ```
pub fn video_filename(story_title: &str) -> String {
    let safe: String = story_title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = safe.trim();

    if safe.is_empty() {
        return "story.mp4".to_string();
    }
    format!("{}.mp4", safe.replace(' ', "_"))
}
