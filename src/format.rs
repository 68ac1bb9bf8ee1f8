/// Compact price label: "999.00", "2K", "2.50M", "3.00B"
pub fn format_price(price: f64) -> String {
    if price >= 1_000_000_000.0 {
        format!("{:.2}B", price / 1_000_000_000.0)
    } else if price >= 1_000_000.0 {
        format!("{:.2}M", price / 1_000_000.0)
    } else if price >= 1_000.0 {
        format!("{}K", (price / 1_000.0).round())
    } else {
        format!("{:.2}", price)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Area label with grouped digits, e.g. "1,250 sq.ft"
pub fn format_area(area: f64) -> String {
    format!("{} sq.ft", group_thousands(area.max(0.0).round() as u64))
}
