/// The single data-row predicate: a line is a data row when its first two
/// whitespace tokens both parse as numbers. The first token failing to parse
/// disqualifies the line regardless of anything after it.
pub(super) fn parse_data_row(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace();
    let independent = parse_engine_number(tokens.next()?)?;
    let dependent = parse_engine_number(tokens.next()?)?;
    Some((independent, dependent))
}

/// Engine reports mix plain decimals with scientific notation, including
/// Fortran `D` exponents.
pub(super) fn parse_engine_number(token: &str) -> Option<f64> {
    if token.is_empty() {
        return None;
    }
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_data_row, parse_engine_number};

    #[test]
    fn plain_decimal_rows_parse() {
        let (angle, value) = parse_data_row("  10.00    1.234").expect("row should parse");
        assert_eq!(angle, 10.0);
        assert_eq!(value, 1.234);
    }

    #[test]
    fn scientific_dependent_values_parse() {
        let (angle, value) =
            parse_data_row("  10.00    1.234E-01   9.9").expect("row should parse");
        assert_eq!(angle, 10.0);
        assert!((value - 0.1234).abs() < 1.0e-12);
    }

    #[test]
    fn fortran_d_exponents_are_tolerated() {
        let value = parse_engine_number("1.234D+02").expect("D exponent should parse");
        assert!((value - 123.4).abs() < 1.0e-9);
    }

    #[test]
    fn non_numeric_first_token_disqualifies_the_line() {
        assert_eq!(parse_data_row("Theta   1.234E-01"), None);
        assert_eq!(parse_data_row("Tot-sig   1.234E-01"), None);
    }

    #[test]
    fn one_token_lines_and_blanks_are_not_rows() {
        assert_eq!(parse_data_row("   "), None);
        assert_eq!(parse_data_row(""), None);
        assert_eq!(parse_data_row("  10.00"), None);
    }

    #[test]
    fn non_numeric_second_token_disqualifies_the_line() {
        assert_eq!(parse_data_row("1001000000200000    36S(d,p)@ 8MeV"), None);
    }
}
