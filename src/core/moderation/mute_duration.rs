// Parsing for the optional `.mute @user <duration>` argument.

use std::time::Duration;

/// Parse `<digits><unit>` with unit `s`, `m` or `h`.
///
/// Anything else (unknown unit, missing digits, decimals, signs) yields
/// `None`, which the mute command treats as a permanent mute rather than an
/// error.
pub fn parse_mute_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let unit = input.chars().last()?;
    let digits = &input[..input.len() - unit.len_utf8()];

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        _ => return None,
    };

    let amount: u64 = digits.parse().ok()?;
    amount.checked_mul(multiplier).map(Duration::from_secs)
}
