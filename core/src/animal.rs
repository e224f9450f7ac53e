//! Animal Data Model
//!
//! Core data types for generated content. `AnimalRecord` is the unit of
//! session history; the derived types hold the optional YouTube metadata,
//! tag string, and video prompts produced for a selected animal.
//!
//! The serde field names match the JSON the model is instructed to emit,
//! so these types deserialize straight from a facade response.

use serde::{Deserialize, Serialize};

/// One of the two content languages every generated text exists in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Russian
    #[default]
    Ru,
    /// English
    En,
}

impl Language {
    /// The other language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Language::Ru => Language::En,
            Language::En => Language::Ru,
        }
    }

    /// Short display label ("RU" / "EN").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::En => "EN",
        }
    }
}

/// A generated fictional animal with its two-language article.
///
/// Immutable once created; `name` is the uniqueness key within the
/// session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    /// The animal's invented name (session-unique).
    #[serde(rename = "animalName")]
    pub name: String,
    /// Descriptive article in Russian.
    #[serde(rename = "russianArticle")]
    pub article_ru: String,
    /// Descriptive article in English.
    #[serde(rename = "englishArticle")]
    pub article_en: String,
}

impl AnimalRecord {
    /// The article in the requested language.
    #[must_use]
    pub fn article(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.article_ru,
            Language::En => &self.article_en,
        }
    }
}

/// YouTube title and description in one language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeContent {
    /// Video title.
    pub title: String,
    /// Video description.
    pub description: String,
}

/// YouTube content in both languages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualLangContent {
    /// Russian title and description.
    pub ru: YouTubeContent,
    /// English title and description.
    pub en: YouTubeContent,
}

impl DualLangContent {
    /// The content variant for the requested language.
    #[must_use]
    pub fn content(&self, language: Language) -> &YouTubeContent {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
        }
    }
}

/// Video prompt lists in both languages.
///
/// Each field is one multi-line string, one prompt per line, possibly
/// numbered. [`crate::prompts::normalize_prompt_lines`] turns it into
/// individually copyable prompts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPrompts {
    /// Russian prompt list.
    #[serde(rename = "ru_prompts")]
    pub ru: String,
    /// English prompt list.
    #[serde(rename = "en_prompts")]
    pub en: String,
}

impl VideoPrompts {
    /// The raw prompt list for the requested language.
    #[must_use]
    pub fn prompts(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_toggle() {
        assert_eq!(Language::Ru.toggled(), Language::En);
        assert_eq!(Language::En.toggled(), Language::Ru);
        assert_eq!(Language::default(), Language::Ru);
    }

    #[test]
    fn test_animal_record_wire_format() {
        let json = r#"{
            "animalName": "Fox",
            "russianArticle": "Лисица обыкновенная.",
            "englishArticle": "A common fox."
        }"#;

        let animal: AnimalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(animal.name, "Fox");
        assert_eq!(animal.article(Language::Ru), "Лисица обыкновенная.");
        assert_eq!(animal.article(Language::En), "A common fox.");
    }

    #[test]
    fn test_video_prompts_wire_format() {
        let json = r#"{"ru_prompts": "1. А\n2. Б", "en_prompts": "1. A\n2. B"}"#;
        let prompts: VideoPrompts = serde_json::from_str(json).unwrap();
        assert_eq!(prompts.prompts(Language::En), "1. A\n2. B");
    }
}
