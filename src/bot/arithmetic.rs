use once_cell::sync::Lazy;
use regex::Regex;

static EXPRESSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:whatis|what's)?((\d+)([+\-*/])(\d+))").expect("expression pattern is valid")
});

/// Finds the first `<int><op><int>` in the input (whitespace ignored) and
/// evaluates it. Division by zero counts as no match.
pub fn evaluate(input: &str) -> Option<f64> {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let captures = EXPRESSION_PATTERN.captures(&cleaned)?;

    let operator = captures.get(3)?.as_str();
    let divisor: f64 = captures.get(4)?.as_str().parse().ok()?;
    if operator == "/" && divisor == 0.0 {
        return None;
    }

    let expression = captures.get(1)?.as_str();
    let mut ns = fasteval::EmptyNamespace;
    match fasteval::ez_eval(expression, &mut ns) {
        Ok(result) if result.is_finite() => Some(result),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!("cannot evaluate '{}': {}", expression, err);
            None
        }
    }
}

pub fn answer(input: &str) -> Option<String> {
    evaluate(input).map(|result| format!("The answer is {}", super::format_number(result)))
}
