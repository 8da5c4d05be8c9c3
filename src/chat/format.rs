use crate::models::PropertyRecord;

/// Group an integer with comma thousands separators
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Price with a `$` prefix for USD listings
pub fn format_price(price: f64, currency: &str) -> String {
    let symbol = if currency == "USD" { "$" } else { "" };
    format!("{}{} {}", symbol, thousands(price as i64), currency)
        .trim()
        .to_string()
}

/// One-paragraph summary used for listing replies
pub fn listing_detail(p: &PropertyRecord) -> String {
    format!(
        "{} — {} BHK ({} sqft) in {}. Price: {} {}. Status: {}.\nShort: {}\nContact: {}",
        p.property_name,
        p.bedrooms(),
        p.area_sqft as i64,
        p.city,
        thousands(p.price as i64),
        p.price_currency,
        p.availability,
        p.short_description,
        p.agent_email,
    )
}
