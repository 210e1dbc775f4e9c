//! Lenient numeric readers for transcript fields.
//!
//! Vendor logs carry locale artifacts (`0,02€`, `1 000`) and the occasional
//! garbage token. Every reader here returns zero instead of failing; a hand
//! with an unreadable amount is kept with a zero value.

/// Reads a money amount. Accepts `,` or `.` as decimal separator, drops
/// blank digit-group separators (including no-break spaces) and ignores a
/// trailing currency sign. Unreadable text gives `0.0`.
pub fn to_amount(s: &str) -> f64 {
    let normalized: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    leading_number(&normalized)
}

/// Reads a tournament buy-in such as `"10+1"` or `"0,90€ + 0,10€"`.
/// Components joined by `+` are summed.
pub fn to_buy_in(s: &str) -> f64 {
    let mut total = 0.0;
    let mut token = String::new();
    for c in s.chars() {
        match c {
            ',' => token.push('.'),
            '.' | '0'..='9' => token.push(c),
            '+' => {
                total += leading_number(&token);
                token.clear();
            }
            _ => {}
        }
    }
    total + leading_number(&token)
}

/// Reads a leading integer, ignoring surrounding blanks. Unreadable text gives 0.
pub fn to_int(s: &str) -> i64 {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().unwrap_or(0)
}

/// Trims and replaces `'` with `-`, so table and game names are safe to
/// embed in quoted text.
pub fn sanitize(s: &str) -> String {
    s.trim().replace('\'', "-")
}

fn leading_number(s: &str) -> f64 {
    let s = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            '-' if i == 0 => end = 1,
            _ => break,
        }
    }
    let value = s[..end].trim_end_matches('.').parse::<f64>().unwrap_or(0.0);
    if value.is_finite() { value } else { 0.0 }
}
