use scraper::Html;
use serde_json::Value;

/// Keys that carry a display label when upstream nests a value in an object
const LABEL_KEYS: [&str; 4] = ["name", "title", "label", "address"];

/// Non-blank text from a string, number, labelled object, or first usable array entry
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => LABEL_KEYS
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(as_text),
        Value::Array(items) => items.iter().find_map(as_text),
        _ => None,
    }
}

/// Non-empty list of labels from an array, or a comma-separated string
pub fn as_text_list(value: &Value) -> Option<Vec<String>> {
    let list: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    (!list.is_empty()).then_some(list)
}

/// Yes/no flags sent as booleans or words
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" | "furnished" => Some(true),
            "no" | "false" | "0" | "unfurnished" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Visible text of an HTML fragment with whitespace collapsed
pub fn strip_html(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return html.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
