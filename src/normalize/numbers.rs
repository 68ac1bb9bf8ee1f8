use serde_json::Value;

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

/// "Two" -> 2, case-insensitive, "zero" through "twenty"
pub fn word_to_number(word: &str) -> Option<u32> {
    let word = word.trim().to_ascii_lowercase();
    NUMBER_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|idx| idx as u32)
}

/// Inverse of [`word_to_number`] with the upstream capitalization ("Two")
pub fn number_to_word(n: u32) -> Option<String> {
    let word = NUMBER_WORDS.get(n as usize)?;
    let mut chars = word.chars();
    let first = chars.next()?;
    Some(first.to_ascii_uppercase().to_string() + chars.as_str())
}

/// Leading number of a text such as "AED 1,250,000" or "85.5 sqm"
fn parse_numeric_text(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let token: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();

    let negative = text[..start].trim_end().ends_with('-');
    let value = token.trim_end_matches('.').parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Number from a JSON number or numeric string
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Number greater than zero
pub fn as_positive(value: &Value) -> Option<f64> {
    as_f64(value).filter(|n| *n > 0.0)
}

/// Room-style count: numbers, digit strings, number words or arrays of those.
/// Zero, "zero" and blank text all mean the count is unknown.
pub fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 1.0)
            .map(|f| f.trunc() as u32),
        Value::String(s) => {
            let text = s.trim();
            let first_word = text.split_whitespace().next()?;
            if let Some(n) = word_to_number(first_word) {
                return Some(n).filter(|n| *n > 0);
            }
            parse_numeric_text(text)
                .filter(|f| *f >= 1.0)
                .map(|f| f.trunc() as u32)
        }
        Value::Array(items) => items.iter().find_map(as_count),
        _ => None,
    }
}
