//! Prompt templates for story, image, and narration generation.

/// System prompt establishing the storyteller persona.
pub const STORY_SYSTEM_PROMPT: &str = "You are a children's nature story writer who generates \
scene-by-scene English narration and image prompts about an animal's life. Each scene should be \
educational, engaging, and suitable for children. Focus on the animal's natural behaviors, \
habitat, and life cycle.";

/// Build the user prompt requesting a story with the exact JSON shape the
/// pipeline parses.
pub fn story_user_prompt(animal: &str, num_scenes: u8) -> String {
    format!(
        r#"Create a story about a {animal}'s life with {num_scenes} scenes.

Provide the response in the following JSON format, and nothing else:
{{
    "story_title": "Title of the story",
    "scenes": [
        {{
            "scene_number": 1,
            "narration": "English narration text for this scene",
            "image_prompt": "Detailed image generation prompt for this scene",
            "duration": 5,
            "background_music": "nature_sounds_gentle"
        }}
    ],
    "total_duration": 25
}}"#
    )
}

/// Wrap a scene's raw image prompt with quality and style guidance so
/// illustrations stay consistent across the story.
pub fn enhance_image_prompt(scene_prompt: &str) -> String {
    format!(
        "Create a high-quality, engaging illustration for this scene: {scene_prompt}. \
The image should be visually appealing, clear, colorful, detailed but not cluttered, \
and consistent with the overall story style."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_mentions_animal_and_scene_count() {
        let prompt = story_user_prompt("Emperor Penguin", 8);
        assert!(prompt.contains("Emperor Penguin"));
        assert!(prompt.contains("8 scenes"));
        assert!(prompt.contains("\"story_title\""));
        assert!(prompt.contains("\"image_prompt\""));
    }

    #[test]
    fn enhanced_prompt_embeds_scene_prompt() {
        let enhanced = enhance_image_prompt("A lion cub at dawn");
        assert!(enhanced.contains("A lion cub at dawn"));
        assert!(enhanced.starts_with("Create a high-quality"));
    }
}
