use crate::models::PLACEHOLDER_IMAGE;
use serde_json::Value;

/// Gallery fields, in the order their entries are preferred
const GALLERY_KEYS: [&str; 3] = ["images", "gallery", "image_urls"];

/// URL from a plain string or an `{url}` / `{src}` object
fn as_url(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => ["url", "src", "original", "large"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str).filter(|s| !s.trim().is_empty()))?,
        _ => return None,
    };
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

fn urls_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(as_url).collect(),
        Some(other) => as_url(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Main image and the remaining gallery, de-duplicated against the main image
pub fn resolve_images(raw: &Value) -> (String, Vec<String>) {
    let mut candidates = urls_of(raw.get("main_image"));
    for key in GALLERY_KEYS {
        candidates.extend(urls_of(raw.get(key)));
    }

    let mut iter = candidates.into_iter();
    let main_image = match iter.next() {
        Some(url) => url,
        None => return (PLACEHOLDER_IMAGE.to_string(), Vec::new()),
    };

    let mut gallery: Vec<String> = Vec::new();
    for url in iter {
        if url != main_image && !gallery.contains(&url) {
            gallery.push(url);
        }
    }

    (main_image, gallery)
}
