// src/core/sanitize.rs

/// Decode the handful of entities that show up in names, alt text and hrefs.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove every `open … close` span, e.g. `(old)` annotations in a homepage cell.
/// Non-greedy per pair, no nesting. An unclosed span runs to the end.
pub fn strip_enclosed(s: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut inside = false;
    for ch in s.chars() {
        match ch {
            c if c == open => inside = true,
            c if c == close && inside => inside = false,
            _ if !inside => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Drop quoting and bracket characters that leak into spreadsheet URL cells.
pub fn strip_quoting(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\'' | '<' | '>'))
        .collect()
}
