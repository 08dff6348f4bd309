//! Formatting helpers for place cards.

pub const MAX_STARS: usize = 5;

/// Star row for a rating: entry `i` is filled when `floor(rating) > i`.
#[must_use]
pub fn stars(rating: f64) -> [bool; MAX_STARS] {
    let whole = rating.floor();
    let mut row = [false; MAX_STARS];
    for (i, filled) in row.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let index = i as f64;
        *filled = whole > index;
    }
    row
}

/// `"$"` repeated once per price tier.
#[must_use]
pub fn price_tier(level: u8) -> String {
    "$".repeat(usize::from(level))
}

/// Integer with en-US thousands separators, e.g. `12,345`.
#[must_use]
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The rating row is only shown when both the rating and its count exist.
#[must_use]
pub fn rating_line(rating: Option<f64>, count: Option<u32>) -> Option<String> {
    let (rating, count) = (rating?, count?);
    let row: String = stars(rating)
        .iter()
        .map(|&filled| if filled { '*' } else { '-' })
        .collect();
    Some(format!("{row} ({})", format_count(count)))
}
