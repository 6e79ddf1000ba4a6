//! Parsers for attribute and style values shared by the document adapter and
//! the composer.

/// Parses a number, ignoring absolute unit suffixes (treated as user units).
pub fn parse_number(input: &str) -> Option<f32> {
    let s = input.trim();
    let s = s
        .trim_end_matches("px")
        .trim_end_matches("pt")
        .trim_end_matches("mm")
        .trim_end_matches("cm")
        .trim_end_matches("in")
        .trim();
    s.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parses a number or percentage; percentages become fractions (`50%` → `0.5`).
pub fn parse_fraction(input: &str) -> Option<f32> {
    let s = input.trim();
    match s.strip_suffix('%') {
        Some(pct) => parse_number(pct).map(|v| v / 100.0),
        None => parse_number(s),
    }
}

/// Parses an opacity value clamped to `[0, 1]`.
pub fn parse_opacity(input: &str) -> Option<f32> {
    parse_fraction(input).map(|v| v.clamp(0.0, 1.0))
}

/// Parses a comma and/or whitespace separated list of numbers, skipping
/// entries that are not numbers.
pub fn parse_number_list(input: &str) -> Vec<f32> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(parse_number)
        .collect()
}

/// Splits a `style` attribute into `(name, value)` declarations.
pub fn style_declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        let name = name.trim();
        let value = value.trim();
        let value = value.strip_suffix("!important").map(str::trim_end).unwrap_or(value);
        (!name.is_empty() && !value.is_empty()).then_some((name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_ignore_units() {
        assert_eq!(parse_number(" 12px "), Some(12.0));
        assert_eq!(parse_number("-1.5e1"), Some(-15.0));
        assert_eq!(parse_number("auto"), None);
    }

    #[test]
    fn fractions_and_opacity() {
        assert_eq!(parse_fraction("50%"), Some(0.5));
        assert_eq!(parse_fraction("0.25"), Some(0.25));
        assert_eq!(parse_opacity("150%"), Some(1.0));
        assert_eq!(parse_opacity("-2"), Some(0.0));
    }

    #[test]
    fn number_lists() {
        assert_eq!(parse_number_list("5, 3 2,,1"), vec![5.0, 3.0, 2.0, 1.0]);
        assert!(parse_number_list("none").is_empty());
    }

    #[test]
    fn style_attribute_declarations() {
        let decls: Vec<_> = style_declarations("fill: red; stroke:none ;; opacity:0.5 !important;bad").collect();
        assert_eq!(decls, vec![("fill", "red"), ("stroke", "none"), ("opacity", "0.5")]);
    }
}
