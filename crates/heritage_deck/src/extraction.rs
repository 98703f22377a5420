//! Extracting the structured deck payload from model responses.
//!
//! Even in JSON mode, model responses sometimes arrive wrapped in markdown
//! code fences or prefixed with explanatory text. This module pulls the
//! JSON object out of whatever wrapping came back.

use heritage_error::{GenerationError, GenerationErrorKind};

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Tries two strategies in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
///
/// # Errors
///
/// Returns a [`GenerationError`] if no JSON object is found; the content
/// call treats that as a fatal decode failure.
///
/// # Examples
///
/// ```
/// use heritage_deck::extract_json;
///
/// let response = "Here is your deck:\n\
///     \n\
///     ```json\n\
///     {\"topic\": \"剪纸\", \"slides\": []}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("剪纸"));
/// ```
pub fn extract_json(response: &str) -> Result<String, GenerationError> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON object found in model response"
    );

    Err(GenerationError::new(GenerationErrorKind::InvalidShape(
        format!("no JSON object in response (length: {})", response.len()),
    )))
}

/// Extract content from a markdown code block.
///
/// Looks for ```json\n...\n``` first, then a bare ``` fence. An unclosed
/// fence (truncated response) yields everything after the opening fence.
fn extract_from_code_block(response: &str) -> Option<String> {
    if let Some(start) = response.find("```json") {
        let content_start = start + "```json".len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip past a language specifier if present
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to the
/// matching `close`, handling nesting and string literals correctly.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
