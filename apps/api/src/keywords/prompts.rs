//! LLM prompt constants for keyword extraction.
//!
//! The prompt instructs the model to return `{"keywords": ["..."]}` JSON
//! only. Callers deserialize via `llm.call_json::<KeywordList>()`.

pub const KEYWORD_SYSTEM: &str = "\
You are a precise assistant that extracts key concepts from documents.\n\
\n\
Respond with valid JSON only: {\"keywords\": [\"...\"]}\n\
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const KEYWORD_PROMPT_TEMPLATE: &str = "\
Analyze this document and extract {min_keywords}-{max_keywords} keywords that:\n\
1. Represent the most important concepts or topics\n\
2. Are contextually significant (not just frequent words)\n\
3. Would help someone quickly understand the document's key themes\n\
4. Are unique and non-overlapping\n\
\n\
List the keywords in the order they first appear in the document. Each keyword \
must occur verbatim in the document text.\n\
\n\
Document:\n\
{document}\n\
\n\
Return JSON only: {\"keywords\": [\"keyword1\", \"keyword2\", \"keyword3\"]}";
