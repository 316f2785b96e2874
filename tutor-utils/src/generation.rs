//! Lesson generation.
//!
//! [`TemplateGenerator`] fills a fixed outline locally. [`OpenAiGenerator`]
//! asks an OpenAI-compatible chat completion endpoint to write the lesson.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f64 = 0.6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedLesson {
    pub title: String,
    pub content: String,
}

#[async_trait]
pub trait LessonGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, topic: &str) -> Result<GeneratedLesson, Error>;
}

/// Offline generator producing an outline with placeholders to fill in.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl LessonGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, topic: &str) -> Result<GeneratedLesson, Error> {
        Ok(template_lesson(topic))
    }
}

pub fn template_lesson(topic: &str) -> GeneratedLesson {
    let title = format!("Introduction to {}", title_case(topic));
    let objectives = format!(
        "By the end of this lesson, learners will be able to: 1) Understand the basics of {topic}. \
         2) Apply a simple example. 3) Answer quick quiz questions about core ideas."
    );
    let body = format!(
        "\nWhat is {topic}?\n\
         {} is an important topic that involves... (explain the core idea briefly).\n\n\
         Example:\n\
         Consider a simple case of {topic} where... (add a short illustrative example).\n\n",
        capitalize(topic)
    );
    let quick_quiz = "Quick Quiz Questions:\n\
                      1) What is the main idea of the lesson?\n\
                      2) Pick the correct option about a key fact.\n\
                      3) True or False: ...\n";

    GeneratedLesson {
        title,
        content: format!("{objectives}\n\n{body}\n{quick_quiz}"),
    }
}

/// Generator backed by an OpenAI-compatible `/v1/chat/completions` API.
pub struct OpenAiGenerator {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str, base_url: Option<String>, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

pub fn lesson_prompt(topic: &str) -> String {
    format!(
        "Create a concise lesson for learners about: {topic}. Include learning objectives, \
         a short explanation, examples, and 3 quick quiz questions."
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl LessonGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self), fields(model = %self.model), err(Debug))]
    async fn generate(&self, topic: &str) -> Result<GeneratedLesson, Error> {
        let body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![ChatMessage {
                role: "user",
                content: lesson_prompt(topic),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "completion API error (HTTP {}): {message}",
                status.as_u16()
            )));
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Generation("completion returned no choices".to_string()))?;

        tracing::debug!(len = content.len(), "lesson generated");

        Ok(GeneratedLesson {
            title: format!("Lesson: {}", title_case(topic)),
            content,
        })
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter not preceded by another letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("rUST ownership"), "Rust Ownership");
        assert_eq!(title_case("c++ and k-means"), "C++ And K-Means");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn capitalize_only_touches_first_character() {
        assert_eq!(capitalize("machine LEARNING"), "Machine learning");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn template_lesson_fills_outline() {
        let lesson = TemplateGenerator.generate("photosynthesis basics").await.unwrap();

        assert_eq!(lesson.title, "Introduction to Photosynthesis Basics");
        assert!(lesson.content.starts_with(
            "By the end of this lesson, learners will be able to: 1) Understand the basics of photosynthesis basics."
        ));
        assert!(lesson.content.contains("\nWhat is photosynthesis basics?\n"));
        assert!(
            lesson
                .content
                .contains("Photosynthesis basics is an important topic that involves...")
        );
        assert!(lesson.content.contains("Example:\nConsider a simple case of photosynthesis basics"));
        assert!(lesson.content.ends_with(
            "Quick Quiz Questions:\n1) What is the main idea of the lesson?\n\
             2) Pick the correct option about a key fact.\n3) True or False: ...\n"
        ));
    }

    #[tokio::test]
    async fn openai_lesson_uses_trimmed_completion() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "\n  Objectives: learn rust.\n\n", "role": "assistant"}, "index": 0}],
            "model": "gpt-4o-mini"
        });

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 600,
                "messages": [{"role": "user", "content": lesson_prompt("rust")}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new("test-key", Some(server.uri()), "gpt-4o-mini");
        let lesson = generator.generate("rust").await.unwrap();

        assert_eq!(lesson.title, "Lesson: Rust");
        assert_eq!(lesson.content, "Objectives: learn rust.");
    }

    #[tokio::test]
    async fn openai_error_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new("key", Some(server.uri()), "gpt-4o-mini");
        let err = generator.generate("rust").await.unwrap_err();

        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn openai_empty_choices_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new("key", Some(server.uri()), "gpt-4o-mini");
        let err = generator.generate("rust").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }
}
