const MAX_PREVIEW_CHARS: usize = 120;

const SECRET_MARKERS: [&str; 4] = ["Bearer ", "api_key=", "token=", "secret="];

/// Short, log-safe rendition of transcript or model text.
///
/// Trims whitespace, flattens newlines, truncates on a char boundary and masks
/// anything that looks like a credential.
pub fn preview_text(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flattened.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = flattened.chars().count();
    let preview = if total_chars > MAX_PREVIEW_CHARS {
        let head: String = flattened.chars().take(MAX_PREVIEW_CHARS).collect();
        format!("{}... ({} chars total)", head, total_chars)
    } else {
        flattened
    };

    redact_secrets(preview)
}

fn redact_secrets(mut text: String) -> String {
    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(offset) = text[search_from..].find(marker) {
            let value_start = search_from + offset + marker.len();
            let value_end = text[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map(|i| value_start + i)
                .unwrap_or(text.len());
            text.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }
    text
}
