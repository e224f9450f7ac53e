//! Prompt Templates and Model-Output Normalization
//!
//! One template per facade operation, plus the two text cleanups applied to
//! model output: stripping Markdown code fences around JSON answers, and
//! turning a numbered multi-line prompt list into individual prompts.

use crate::animal::AnimalRecord;

/// System preamble shared by all structured-output requests.
pub const STRUCTURED_OUTPUT_SYSTEM: &str = "You are a content assistant for a channel about \
fictional animals. Always answer with exactly the requested format and nothing else: no \
preamble, no explanation, no Markdown fences.";

/// Prompt for generating a new fictional animal.
///
/// Embeds the exclusion list of names already in the session history. The
/// model is expected, but not guaranteed, to honor it; the keeper still
/// checks the result against the history.
#[must_use]
pub fn animal_prompt(excluded: &[String]) -> String {
    let mut prompt = String::from(
        "Invent a fictional animal that does not exist in the real world. \
Respond with strict JSON using exactly these keys:\n\
{\"animalName\": \"...\", \"russianArticle\": \"...\", \"englishArticle\": \"...\"}\n\
\"animalName\" is the animal's invented name in English. \"russianArticle\" is an \
engaging encyclopedia-style article about the animal in Russian (4-6 sentences: \
habitat, appearance, diet, one surprising fact). \"englishArticle\" is the same \
article in English.",
    );

    if !excluded.is_empty() {
        prompt.push_str("\nDo NOT use any of these already generated names: ");
        prompt.push_str(&excluded.join(", "));
        prompt.push('.');
    }

    prompt
}

/// Prompt for YouTube title and description in both languages.
#[must_use]
pub fn youtube_content_prompt(animal: &AnimalRecord) -> String {
    format!(
        "Here is a fictional animal called \"{name}\".\n\
Russian article:\n{ru}\n\nEnglish article:\n{en}\n\n\
Write a catchy YouTube video title and an engaging video description about this \
animal, in Russian and in English. Respond with strict JSON using exactly these keys:\n\
{{\"ru\": {{\"title\": \"...\", \"description\": \"...\"}}, \
\"en\": {{\"title\": \"...\", \"description\": \"...\"}}}}",
        name = animal.name,
        ru = animal.article_ru,
        en = animal.article_en,
    )
}

/// Prompt for a YouTube tag string (English only).
#[must_use]
pub fn youtube_tags_prompt(animal: &AnimalRecord) -> String {
    format!(
        "Here is a fictional animal called \"{name}\".\n\
English article:\n{en}\n\n\
Write a single line of comma-separated English YouTube tags for a video about this \
animal (10-15 tags, lowercase, no hash signs). Respond with the tag line only.",
        name = animal.name,
        en = animal.article_en,
    )
}

/// Prompt for text-to-video generation prompts in both languages.
#[must_use]
pub fn video_prompts_prompt(animal: &AnimalRecord) -> String {
    format!(
        "Here is a fictional animal called \"{name}\".\n\
Russian article:\n{ru}\n\nEnglish article:\n{en}\n\n\
Write 5 cinematic text-to-video prompts showing this animal in its habitat, \
first in Russian and then in English. Each list is a numbered list with one \
prompt per line. Respond with strict JSON using exactly these keys:\n\
{{\"ru_prompts\": \"1. ...\\n2. ...\", \"en_prompts\": \"1. ...\\n2. ...\"}}",
        name = animal.name,
        ru = animal.article_ru,
        en = animal.article_en,
    )
}

/// Strip a surrounding Markdown code fence from a model answer.
///
/// Models routinely wrap JSON in ``` or ```json fences despite being told
/// not to. Anything without a leading fence is returned trimmed.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[newline + 1..].trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Split a multi-line prompt list into individual cleaned prompts.
///
/// Blank lines are dropped and a leading `<digits>. ` numbering prefix is
/// removed from each remaining line. Empty input yields an empty list.
#[must_use]
pub fn normalize_prompt_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_numbering(line).to_string())
        .collect()
}

/// Strip a leading `<digits>. ` prefix, if present.
fn strip_numbering(line: &str) -> &str {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(tail) => tail.trim_start(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fox() -> AnimalRecord {
        AnimalRecord {
            name: "Fox".to_string(),
            article_ru: "Статья о лисе.".to_string(),
            article_en: "An article about the fox.".to_string(),
        }
    }

    #[test]
    fn test_animal_prompt_embeds_exclusions() {
        let excluded = vec!["Fox".to_string(), "Owl".to_string()];
        let prompt = animal_prompt(&excluded);
        assert!(prompt.contains("Fox, Owl"));
        assert!(prompt.contains("animalName"));

        // No exclusion clause on the first generation
        let first = animal_prompt(&[]);
        assert!(!first.contains("already generated"));
    }

    #[test]
    fn test_content_prompts_carry_both_articles() {
        let animal = fox();
        for prompt in [
            youtube_content_prompt(&animal),
            video_prompts_prompt(&animal),
        ] {
            assert!(prompt.contains("Fox"));
            assert!(prompt.contains("Статья о лисе."));
            assert!(prompt.contains("An article about the fox."));
        }

        // Tags are English-only
        let tags = youtube_tags_prompt(&animal);
        assert!(tags.contains("An article about the fox."));
        assert!(!tags.contains("Статья о лисе."));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_normalize_numbered_list() {
        assert_eq!(normalize_prompt_lines("1. A\n\n2. B\n"), vec!["A", "B"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_prompt_lines(""), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_unnumbered_lines() {
        assert_eq!(normalize_prompt_lines("A\nB"), vec!["A", "B"]);
    }

    #[test]
    fn test_normalize_keeps_inner_numbers() {
        // Only a leading "<digits>. " prefix is stripped
        assert_eq!(
            normalize_prompt_lines("10. Shot 10 of 12\n3 foxes dancing"),
            vec!["Shot 10 of 12", "3 foxes dancing"]
        );
    }
}
