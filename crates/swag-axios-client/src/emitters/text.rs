//! Small text helpers shared by the emitters.

use std::collections::HashSet;

use swag_core::ir::{IrEndpoint, IrTypeDef};

/// Double-quoted literal with JSON escaping, which is also valid TypeScript.
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

/// Render a JSDoc block, or nothing when there is nothing to say. Every line
/// is prefixed with `indent` and the block ends with a newline.
pub fn jsdoc(
    summary: Option<&str>,
    description: Option<&str>,
    deprecated: bool,
    indent: &str,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    for text in [summary, description].into_iter().flatten() {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(text.lines().map(|line| escape_jsdoc(line.trim_end())));
    }
    if deprecated {
        lines.push("@deprecated".to_string());
    }
    if lines.is_empty() {
        return String::new();
    }

    let mut out = format!("{indent}/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Case-sensitive whole-word search: `word` must not be preceded or followed
/// by an identifier character.
pub fn is_match_whole_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Names of `types` that `text` mentions as whole words, deduplicated, in
/// declaration order.
pub fn used_type_names<'a>(text: &str, types: &'a [IrTypeDef]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    types
        .iter()
        .map(|t| t.name.as_str())
        .filter(|name| is_match_whole_word(text, name) && seen.insert(*name))
        .collect()
}

/// Endpoints sorted by route, byte-wise ascending. The sort is stable, so
/// endpoints sharing a route keep their document order.
pub fn sort_by_route(endpoints: &[IrEndpoint]) -> Vec<&IrEndpoint> {
    let mut sorted: Vec<&IrEndpoint> = endpoints.iter().collect();
    sorted.sort_by(|a, b| a.route.cmp(&b.route));
    sorted
}
