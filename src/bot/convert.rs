use once_cell::sync::Lazy;
use regex::Regex;

struct Conversion {
    from: &'static str,
    to: &'static str,
    apply: fn(f64) -> f64,
    label: &'static str,
}

const FEET_PER_METER: f64 = 3.28084;
const POUNDS_PER_KILOGRAM: f64 = 2.20462;

static CONVERSIONS: &[Conversion] = &[
    // Length
    Conversion { from: "m", to: "ft", apply: |v| v * FEET_PER_METER, label: "ft" },
    Conversion { from: "ft", to: "m", apply: |v| v / FEET_PER_METER, label: "m" },
    Conversion { from: "km", to: "mi", apply: |v| v * 0.621371, label: "mi" },
    Conversion { from: "mi", to: "km", apply: |v| v * 1.60934, label: "km" },
    // Weight
    Conversion { from: "kg", to: "lb", apply: |v| v * POUNDS_PER_KILOGRAM, label: "lb" },
    Conversion { from: "lb", to: "kg", apply: |v| v / POUNDS_PER_KILOGRAM, label: "kg" },
    // Temperature
    Conversion { from: "c", to: "f", apply: |v| v * 9.0 / 5.0 + 32.0, label: "°F" },
    Conversion { from: "f", to: "c", apply: |v| (v - 32.0) * 5.0 / 9.0, label: "°C" },
];

// Longer units come first so "mi" is never read as "m". Trailing letters are
// ignored, which lets "lbs" or "fahrenheit" through.
static CONVERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(ft|km|mi|kg|lb|m|c|f)\s+(?:to|in)\s+(ft|km|mi|kg|lb|m|c|f)",
    )
    .expect("conversion pattern is valid")
});

/// Answers "<number> <unit> to <unit>" questions. `None` when the input is not a
/// conversion or the unit pair is not in the table.
pub fn convert_units(input: &str) -> Option<String> {
    let captures = CONVERSION_PATTERN.captures(input)?;
    let value = captures.get(1)?.as_str();
    let from = captures.get(2)?.as_str();
    let to = captures.get(3)?.as_str().to_ascii_lowercase();

    let conversion = CONVERSIONS
        .iter()
        .find(|c| c.from.eq_ignore_ascii_case(from) && c.to == to)?;
    let amount: f64 = value.parse().ok()?;
    let result = (conversion.apply)(amount);

    Some(format!(
        "{value}{} is equal to {result:.2}{}",
        from.to_uppercase(),
        conversion.label
    ))
}
