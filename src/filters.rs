//! Number formatting for monetary amounts in report output.
//!
//! Amounts are whole currency units with a thousands separator and the
//! currency unit as a suffix, e.g. "1.234.567 Kč" for cs-CZ.

/// Format an amount rounded to whole units, with thousands separator and
/// currency suffix.
pub fn format_amount(value: f64, currency: &str, locale: &str) -> String {
    format!("{} {}", format_number(value, locale), currency)
}

/// Format a number rounded to whole units with a locale thousands separator.
pub fn format_number(value: f64, locale: &str) -> String {
    let (thousands_sep, _) = locale_separators(locale);
    let rounded = value.round() as i64;
    let formatted = format_with_thousands(rounded.unsigned_abs(), thousands_sep);

    if rounded < 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Format a percentage with one decimal place and a locale-aware decimal
/// separator, e.g. "12,3 %" for cs-CZ.
pub fn format_percent(value: f64, locale: &str) -> String {
    let (_, decimal_sep) = locale_separators(locale);
    let scaled = (value.abs() * 10.0).round() as i64;
    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };

    format!("{}{}{}{} %", sign, scaled / 10, decimal_sep, scaled % 10)
}

/// Thousands and decimal separators for a locale tag.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "cs-CZ" | "sk-SK" | "de-DE" | "de-AT" | "fr-FR" | "pl-PL" | "hu-HU" => ('.', ','),
        // English-speaking locales use comma as thousands, period as decimal
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: u64, sep: char) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_czech() {
        assert_eq!(format_number(1234567.0, "cs-CZ"), "1.234.567");
    }

    #[test]
    fn test_format_number_english() {
        assert_eq!(format_number(1234567.0, "en-US"), "1,234,567");
    }

    #[test]
    fn test_format_number_rounds_to_whole_units() {
        assert_eq!(format_number(1234.49, "cs-CZ"), "1.234");
        assert_eq!(format_number(1234.5, "cs-CZ"), "1.235");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1234567.0, "cs-CZ"), "-1.234.567");
    }

    #[test]
    fn test_format_number_small() {
        assert_eq!(format_number(0.0, "cs-CZ"), "0");
        assert_eq!(format_number(999.0, "cs-CZ"), "999");
        assert_eq!(format_number(1000.0, "cs-CZ"), "1.000");
    }

    #[test]
    fn test_format_amount_currency_suffix() {
        assert_eq!(format_amount(1234567.0, "Kč", "cs-CZ"), "1.234.567 Kč");
    }

    #[test]
    fn test_format_percent_czech() {
        assert_eq!(format_percent(12.34, "cs-CZ"), "12,3 %");
    }

    #[test]
    fn test_format_percent_rounds_up() {
        assert_eq!(format_percent(99.96, "cs-CZ"), "100,0 %");
    }

    #[test]
    fn test_format_percent_zero() {
        assert_eq!(format_percent(0.0, "cs-CZ"), "0,0 %");
    }

    #[test]
    fn test_format_percent_english_separator() {
        assert_eq!(format_percent(7.5, "en-US"), "7.5 %");
    }
}
