//! Random sampling helpers shared by the entity generators.

use fake::{Fake, faker::lorem::en::Paragraph};
use std::fmt::Display;

use rand::Rng;
use rust_decimal::Decimal;
use time::{Date, Duration, OffsetDateTime};

use crate::error::SeedError;

/// Rejects an inclusive `(min, max)` range that is inverted or starts below `floor`.
pub fn check_range<T: PartialOrd + Display>(
    name: &str,
    (min, max): (T, T),
    floor: T,
) -> Result<(), SeedError> {
    if min < floor {
        return Err(SeedError::InvalidConfig(format!(
            "{name} must start at {floor} or more, got {min}"
        )));
    }
    if min > max {
        return Err(SeedError::InvalidConfig(format!(
            "{name} range is inverted: {min} > {max}"
        )));
    }
    Ok(())
}

/// Rejects a look-back window that would place timestamps after `now`.
pub fn check_history_days(name: &str, days: i64) -> Result<(), SeedError> {
    if days < 0 {
        return Err(SeedError::InvalidConfig(format!(
            "{name} must not be negative, got {days}"
        )));
    }
    Ok(())
}

/// Uniform instant in `[start, end]`. Returns `start` when the window is empty.
pub fn datetime_between(
    start: OffsetDateTime,
    end: OffsetDateTime,
    rng: &mut impl Rng,
) -> OffsetDateTime {
    if end <= start {
        return start;
    }
    let span = (end - start).whole_seconds();
    start + Duration::seconds(rng.gen_range(0..=span))
}

/// Uniform instant within the last `days` days up to `now`.
pub fn datetime_within_days(now: OffsetDateTime, days: i64, rng: &mut impl Rng) -> OffsetDateTime {
    datetime_between(now - Duration::days(days), now, rng)
}

/// Uniform date in `[from, from + days]`.
pub fn date_within_days_ahead(from: Date, days: i64, rng: &mut impl Rng) -> Date {
    from + Duration::days(rng.gen_range(0..=days))
}

/// Uniform amount in `[min_cents, max_cents]`, two decimal places.
pub fn price_between(min_cents: i64, max_cents: i64, rng: &mut impl Rng) -> Decimal {
    Decimal::new(rng.gen_range(min_cents..=max_cents), 2)
}

/// Lorem text no longer than `max_chars`, cut at a word boundary.
pub fn text(max_chars: usize, rng: &mut impl Rng) -> String {
    let paragraph: String = Paragraph(3..6).fake_with_rng(rng);
    if paragraph.len() <= max_chars {
        return paragraph;
    }

    let mut out = String::with_capacity(max_chars);
    for word in paragraph.split_whitespace() {
        let sep = usize::from(!out.is_empty());
        // +1 reserves room for the closing period
        if out.len() + sep + word.len() + 1 > max_chars {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }

    let kept = out.trim_end_matches(|c: char| c.is_ascii_punctuation()).len();
    out.truncate(kept);
    out.push('.');
    out
}
