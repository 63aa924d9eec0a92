//! Utilities for extracting structured data from generation responses.
//!
//! Model responses often wrap JSON in markdown code fences or mix it with
//! explanatory text. This module provides strict extraction that handles
//! the common patterns without ever silently narrowing a malformed shape.

use animatic_error::{AnimaticResult, JsonError};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Tries, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns an error if no JSON candidate is found in the response.
///
/// # Examples
///
/// ```
/// use animatic_compose::extract_json;
///
/// let response = "Here are the orderings:\n```json\n{\"orderings\": []}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("orderings"));
/// ```
pub fn extract_json(response: &str) -> AnimaticResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    // Prefer whichever structure opens first in the response.
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
        }
        (Some(_), None) => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
        _ => {
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in generation response"
    );

    Err(JsonError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence found - likely truncated response
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to next newline (in case there's a language specifier)
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

/// Extract content between balanced delimiters, honoring string escapes.
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

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
///
/// # Examples
///
/// ```
/// use animatic_compose::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Candidate {
///     score: i64,
/// }
///
/// let candidate: Candidate = parse_json(r#"{"score": 3}"#).unwrap();
/// assert_eq!(candidate.score, 3);
/// ```
pub fn parse_json<T>(json_str: &str) -> AnimaticResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_from_code_block() {
        let response = r#"
Here's the ordering you requested:

```json
{
  "orderings": [["a", "b"]]
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"orderings\""));
    }

    #[test]
    fn extract_json_balanced_braces() {
        let response = r#"Sure! {"orderings": [], "nested": {"value": "}"}}"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn extract_json_array_first() {
        let response = "Items: [\n  {\"id\": 1},\n  {\"id\": 2}\n]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn no_json_found_is_an_error() {
        assert!(extract_json("This is just plain text with no JSON").is_err());
    }

    #[test]
    fn string_escapes_do_not_break_balancing() {
        let response = r#"{"text": "She said \"vote\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn parse_json_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct Row {
            id: i32,
        }

        let row: Row = parse_json(r#"{"id": 42}"#).unwrap();
        assert_eq!(row.id, 42);

        let err = parse_json::<Row>(r#"{"id": "not a number"}"#).unwrap_err();
        assert!(format!("{}", err).contains("JSON Error"));
    }
}
