use regex::Regex;
use std::sync::LazyLock;

macro_rules! number_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Patterns run against lower-cased text; group 1 is the number.
number_pattern!(RE_CELSIUS, r"(\d+\.?\d*)\s*°?c");
number_pattern!(RE_KELVIN, r"(\d+\.?\d*)\s*k");
number_pattern!(RE_AFTER_PEAK, r"peak[:\s]*(\d+\.?\d*)");
number_pattern!(RE_AFTER_TEMPERATURE, r"temperature[:\s]*(\d+\.?\d*)");
number_pattern!(RE_PERCENT, r"(\d+\.?\d*)\s*%");
number_pattern!(RE_AFTER_COLON, r":\s*(\d+\.?\d*)");
number_pattern!(RE_BARE, r"(\d+\.?\d*)");

/// An ordered list of number patterns; the first that converts wins.
pub type PatternLadder = [&'static LazyLock<Option<Regex>>];

/// Crystallization peaks: Celsius, Kelvin, after "peak", after "temperature".
pub static THERMAL_LADDER: [&LazyLock<Option<Regex>>; 4] =
    [&RE_CELSIUS, &RE_KELVIN, &RE_AFTER_PEAK, &RE_AFTER_TEMPERATURE];

/// Curie temperature: Celsius, Kelvin, after a colon, first bare number.
pub static MAGNETIC_LADDER: [&LazyLock<Option<Regex>>; 4] =
    [&RE_CELSIUS, &RE_KELVIN, &RE_AFTER_COLON, &RE_BARE];

/// Pinhole counts and areas: percent-suffixed, after a colon, first bare number.
pub static DEFECT_LADDER: [&LazyLock<Option<Regex>>; 3] = [&RE_PERCENT, &RE_AFTER_COLON, &RE_BARE];

/// Try each pattern in order against `line` (already lower-cased).
///
/// Only the first match of each pattern is considered. A match whose text does
/// not convert to `f64` counts as no match and the next pattern is tried.
pub fn first_number(line: &str, ladder: &PatternLadder) -> Option<f64> {
    first_converted(line, ladder, |raw| raw.parse::<f64>().ok())
}

/// Like [`first_number`], truncated toward zero to a count. A value outside
/// the `u64` range counts as no match.
pub fn first_count(line: &str, ladder: &PatternLadder) -> Option<u64> {
    first_converted(line, ladder, |raw| raw.parse::<f64>().ok().and_then(count_from))
}

// 2^64, the first value past `u64::MAX`.
const COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn count_from(value: f64) -> Option<u64> {
    let value = value.trunc();
    (0.0..COUNT_LIMIT).contains(&value).then_some(value as u64)
}

fn first_converted<T>(
    line: &str,
    ladder: &PatternLadder,
    convert: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    for pattern in ladder.iter().copied() {
        let Some(regex) = pattern.as_ref() else {
            continue;
        };
        if let Some(captures) = regex.captures(line)
            && let Some(raw) = captures.get(1)
            && let Some(value) = convert(raw.as_str())
        {
            return Some(value);
        }
    }
    None
}

/// Search each line of `window` in order, lower-casing it first.
pub fn first_number_in_window<'a, I>(window: I, ladder: &PatternLadder) -> Option<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    window
        .into_iter()
        .find_map(|line| first_number(&line.to_lowercase(), ladder))
}
