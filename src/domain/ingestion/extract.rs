//! Locating a JSON document inside free-form completion text.

/// Returns the most likely JSON payload in `text`.
///
/// Tries, in order: the body of the first fenced code block, the span from
/// the first `{` to the last `}`, and finally the trimmed text itself.
pub fn extract_json(text: &str) -> &str {
    if let Some(body) = fenced_block(text) {
        return body;
    }
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text.trim()
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip an optional language tag on the fence line.
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    let inner = body[..close].trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}
