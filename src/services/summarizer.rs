//! Three-line summaries on top of a [`TextGenerator`].
//!
//! The generation call runs on its own tokio task and the caller awaits the
//! join handle, so a slow upstream never holds a request-handling worker.
//! Whatever the model returns is reshaped into at most three `- ` bullets,
//! each capitalized and terminated with `.`, `!` or `?`. Fewer than three
//! surviving lines is not an error.

use crate::core::logging::{get_request_id, REQUEST_ID};
use crate::core::metrics::get_metrics;
use crate::core::SummarizeError;
use crate::services::gemini::TextGenerator;
use std::sync::Arc;
use std::time::Instant;

/// Maximum number of lines in a summary.
pub const SUMMARY_LINES: usize = 3;

const BULLET: &str = "- ";
const BULLET_CHARS: &[char] = &['-', '•', ' '];
const TERMINATORS: &[char] = &['.', '!', '?'];

/// Build the instruction sent to the model.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in exactly {} concise lines. Keep it factual and clear.\n\nTEXT:\n{}",
        SUMMARY_LINES, text
    )
}

/// Strip bullets and surrounding whitespace; `None` if nothing is left.
fn clean_line(line: &str) -> Option<&str> {
    let cleaned = line.trim().trim_start_matches(BULLET_CHARS).trim();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// All-caps lines with more than one letter, e.g. `SECOND.`.
fn is_shouting(line: &str) -> bool {
    !line.chars().any(char::is_lowercase) && line.chars().filter(|c| c.is_uppercase()).count() > 1
}

/// Uppercase the first character when it is lowercase.
fn capitalize(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => line.to_string(),
    }
}

/// Capitalize the first letter and make sure the line ends a sentence.
///
/// Shouting is judged on the capitalized line.
fn format_line(line: &str) -> String {
    let capitalized = capitalize(line);
    let mut formatted: String = if is_shouting(&capitalized) {
        let mut chars = capitalized.chars();
        chars
            .next()
            .into_iter()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    } else {
        capitalized
    };
    if !formatted.ends_with(TERMINATORS) {
        formatted.push('.');
    }
    formatted
}

/// Reshape raw model output into the bulleted summary.
///
/// Idempotent: feeding the result back in returns it unchanged.
pub fn normalize_summary(raw: &str) -> Result<String, SummarizeError> {
    let without_backticks = raw.replace('`', "");

    let lines: Vec<String> = without_backticks
        .split('\n')
        .filter_map(clean_line)
        .take(SUMMARY_LINES)
        .map(|line| format!("{}{}", BULLET, format_line(line)))
        .collect();

    if lines.is_empty() {
        return Err(SummarizeError::EmptyResponse);
    }
    Ok(lines.join("\n"))
}

/// Produces summaries through a shared [`TextGenerator`].
#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Summarize `text` using `credential` for the upstream call.
    ///
    /// `text` is expected to be trimmed and non-empty already.
    pub async fn summarize(&self, credential: &str, text: &str) -> Result<String, SummarizeError> {
        if credential.trim().is_empty() {
            return Err(SummarizeError::Configuration(
                "missing credential".to_string(),
            ));
        }

        let generator = Arc::clone(&self.generator);
        let credential = credential.trim().to_string();
        let prompt = build_prompt(text);
        let request_id = get_request_id();

        let start = Instant::now();
        let worker = tokio::spawn(REQUEST_ID.scope(request_id, async move {
            generator.generate(&credential, &prompt).await
        }));

        let outcome = match worker.await {
            Ok(result) => result,
            Err(join_err) => Err(SummarizeError::Service(format!(
                "generation worker failed: {}",
                join_err
            ))),
        };

        let label = match &outcome {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        get_metrics()
            .generation_latency
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        let response = outcome?;
        let raw = response.text();
        if raw.trim().is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }

        tracing::debug!(raw_len = raw.len(), "normalizing model output");
        normalize_summary(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gemini::{Candidate, Content, GenerateContentResponse, Part};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns a canned response and remembers what it was asked.
    struct StubGenerator {
        response: Mutex<Option<Result<GenerateContentResponse, SummarizeError>>>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn returning(result: Result<GenerateContentResponse, SummarizeError>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(result)),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn with_parts(parts: &[&str]) -> Arc<Self> {
            Self::returning(Ok(response_with_parts(parts)))
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            _credential: &str,
            prompt: &str,
        ) -> Result<GenerateContentResponse, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(SummarizeError::Service("called twice".to_string())))
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(
            &self,
            _credential: &str,
            _prompt: &str,
        ) -> Result<GenerateContentResponse, SummarizeError> {
            panic!("boom");
        }
    }

    fn response_with_parts(parts: &[&str]) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: Some(
                        parts
                            .iter()
                            .map(|t| Part {
                                text: Some(t.to_string()),
                            })
                            .collect(),
                    ),
                }),
                finish_reason: Some("STOP".to_string()),
            }]),
            prompt_feedback: None,
        }
    }

    #[test]
    fn test_build_prompt() {
        assert_eq!(
            build_prompt("Rust is a language."),
            "Summarize the following text in exactly 3 concise lines. Keep it factual and clear.\n\nTEXT:\nRust is a language."
        );
    }

    #[test]
    fn test_normalize_reference_output() {
        let summary = normalize_summary("first point\nSECOND.\n- third!").unwrap();
        assert_eq!(summary, "- First point.\n- Second.\n- Third!");
    }

    #[test]
    fn test_normalize_strips_backticks_and_bullets() {
        let summary = normalize_summary("```\n• alpha\n  -  beta?\n--gamma\n```").unwrap();
        assert_eq!(summary, "- Alpha.\n- Beta?\n- Gamma.");
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("SECOND."), "Second.");
        assert_eq!(format_line("NASA launched a rocket"), "NASA launched a rocket.");
        assert_eq!(format_line("I"), "I.");
        assert_eq!(format_line("done!"), "Done!");
        assert_eq!(format_line("why?"), "Why?");
        assert_eq!(format_line("3 items"), "3 items.");
        assert_eq!(format_line("mRNA"), "Mrna.");
        assert_eq!(format_line("a NASA REPORT"), "A nasa report.");
        assert_eq!(format_line("éA"), "Éa.");
    }

    #[test]
    fn test_normalize_keeps_trailing_bullet_characters() {
        assert_eq!(
            normalize_summary("result is positive -").unwrap(),
            "- Result is positive -."
        );
    }

    #[test]
    fn test_normalize_keeps_first_three_lines() {
        let summary = normalize_summary("one\ntwo\n\nthree\nfour\nfive").unwrap();
        assert_eq!(summary, "- One.\n- Two.\n- Three.");
    }

    #[test]
    fn test_normalize_fewer_than_three_lines_is_fine() {
        assert_eq!(normalize_summary("only one line").unwrap(), "- Only one line.");
    }

    #[test]
    fn test_normalize_discards_bullet_only_lines() {
        let summary = normalize_summary("- - \nreal content\n•\n  ").unwrap();
        assert_eq!(summary, "- Real content.");
    }

    #[test]
    fn test_normalize_all_bullets_is_empty() {
        assert_matches!(
            normalize_summary("- - \n•  •\n``"),
            Err(SummarizeError::EmptyResponse)
        );
    }

    #[test]
    fn test_normalize_handles_crlf_and_non_ascii() {
        let summary = normalize_summary("émile wrote it\r\n42 is the answer\r\n").unwrap();
        assert_eq!(summary, "- Émile wrote it.\n- 42 is the answer.");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_summary("first point\nSECOND.\n- third!\nfourth").unwrap();
        let twice = normalize_summary(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_is_idempotent_when_only_first_letter_is_lowercase() {
        for raw in ["mRNA", "a NASA REPORT", "éA", "- iOS"] {
            let once = normalize_summary(raw).unwrap();
            let twice = normalize_summary(&once).unwrap();
            assert_eq!(once, twice, "input {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let stub = StubGenerator::with_parts(&["first point\n", "SECOND.\n- third!"]);
        let summarizer = Summarizer::new(stub.clone());

        let summary = summarizer.summarize("key", "some text").await.unwrap();

        assert_eq!(summary, "- First point.\n- Second.\n- Third!");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            stub.last_prompt.lock().unwrap().as_deref(),
            Some(build_prompt("some text").as_str())
        );
    }

    #[tokio::test]
    async fn test_summarize_missing_credential_never_calls_service() {
        let stub = StubGenerator::with_parts(&["unused"]);
        let summarizer = Summarizer::new(stub.clone());

        for credential in ["", "   "] {
            let result = summarizer.summarize(credential, "text").await;
            assert_matches!(result, Err(SummarizeError::Configuration(_)));
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_summarize_empty_response() {
        let stub = StubGenerator::returning(Ok(GenerateContentResponse::default()));
        let summarizer = Summarizer::new(stub);

        assert_matches!(
            summarizer.summarize("key", "text").await,
            Err(SummarizeError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_summarize_whitespace_response() {
        let stub = StubGenerator::with_parts(&["  \n\t", "\n"]);
        let summarizer = Summarizer::new(stub);

        assert_matches!(
            summarizer.summarize("key", "text").await,
            Err(SummarizeError::EmptyResponse)
        );
    }

    #[tokio::test]
    async fn test_summarize_propagates_service_error() {
        let stub = StubGenerator::returning(Err(SummarizeError::Service("quota".to_string())));
        let summarizer = Summarizer::new(stub.clone());

        assert_matches!(
            summarizer.summarize("key", "text").await,
            Err(SummarizeError::Service(msg)) if msg == "quota"
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summarize_worker_panic_is_service_error() {
        let summarizer = Summarizer::new(Arc::new(PanickingGenerator));

        assert_matches!(
            summarizer.summarize("key", "text").await,
            Err(SummarizeError::Service(_))
        );
    }
}
