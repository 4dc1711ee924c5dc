//! Keyword source — pluggable, trait-based collaborator that supplies the
//! ordered keyword list for a source text.
//!
//! Default: `LlmKeywordSource` (OpenAI via the shared `LlmClient`).
//! `AppState` holds an `Arc<dyn KeywordSource>`, so tests and future
//! backends can swap the implementation without touching handlers.
//!
//! The source owns everything the core treats as given: count bounds,
//! ordering, and case-insensitive uniqueness of the returned keywords.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::keywords::prompts::{KEYWORD_PROMPT_TEMPLATE, KEYWORD_SYSTEM};
use crate::layout::locate::{normalize, SourceText};
use crate::llm_client::LlmClient;

pub mod prompts;

/// Supplies an ordered sequence of unique keyword strings for a text.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    async fn extract(
        &self,
        text: &SourceText,
        min_keywords: usize,
        max_keywords: usize,
    ) -> Result<Vec<String>, AppError>;
}

/// Intermediate type for deserializing the LLM's keyword response.
#[derive(Debug, Deserialize)]
struct KeywordList {
    keywords: Vec<String>,
}

/// The default keyword source: one LLM call per document.
pub struct LlmKeywordSource {
    llm: LlmClient,
}

impl LlmKeywordSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl KeywordSource for LlmKeywordSource {
    async fn extract(
        &self,
        text: &SourceText,
        min_keywords: usize,
        max_keywords: usize,
    ) -> Result<Vec<String>, AppError> {
        let document = text.paragraphs.join("\n\n");
        let prompt = build_keyword_prompt(&document, min_keywords, max_keywords);

        let response: KeywordList = self
            .llm
            .call_json(&prompt, KEYWORD_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Keyword extraction call failed: {e}")))?;

        let keywords = sanitize_keywords(response.keywords, max_keywords);

        if keywords.len() < min_keywords {
            return Err(AppError::Llm(format!(
                "expected at least {min_keywords} keywords, got {}",
                keywords.len()
            )));
        }

        info!(count = keywords.len(), "keywords extracted");
        Ok(keywords)
    }
}

pub(crate) fn build_keyword_prompt(
    document: &str,
    min_keywords: usize,
    max_keywords: usize,
) -> String {
    KEYWORD_PROMPT_TEMPLATE
        .replace("{min_keywords}", &min_keywords.to_string())
        .replace("{max_keywords}", &max_keywords.to_string())
        .replace("{document}", document)
}

/// Trims, drops empties, dedupes case-insensitively in input order, and
/// clamps to `max_keywords`. The core still rejects duplicates as a contract
/// violation; this keeps a sloppy LLM response from aborting the whole run.
pub(crate) fn sanitize_keywords(raw: Vec<String>, max_keywords: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords: Vec<String> = Vec::new();

    for keyword in raw {
        let trimmed = keyword.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.insert(normalize(&trimmed)) {
            warn!(keyword = %trimmed, "dropping duplicate keyword from LLM response");
            continue;
        }
        keywords.push(trimmed);
        if keywords.len() == max_keywords {
            break;
        }
    }
    keywords
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
