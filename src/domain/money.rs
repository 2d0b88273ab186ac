use std::fmt;

/// Money is represented as integer minor units to avoid floating-point precision issues.
/// For a currency with two decimals, 1 unit = 100 minor units, so 50.00 = 5000.
pub type Amount = i64;

/// Format an amount as a plain decimal number, as written to CSV.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format an amount with thousands separators for human-facing text.
/// Example: 500000000 -> "5,000,000.00"
pub fn format_amount_grouped(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let units = (abs / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{:02}", sign, grouped, abs % 100)
}

/// Parse a decimal string into minor units.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "1,000" -> 100000
///
/// Commas must form groups of three digits ("1,000,000"). Underscores are
/// stripped wherever they appear ("1_0000" is accepted).
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };
    if fraction.contains('.') {
        return Err(ParseAmountError::InvalidFormat);
    }

    // Digit-group separators are only meaningful in the whole part
    let whole: String = whole.chars().filter(|c| *c != '_').collect();
    if !has_valid_grouping(&whole) {
        return Err(ParseAmountError::InvalidFormat);
    }
    let whole: String = whole.chars().filter(|c| *c != ',').collect();
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidFormat);
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseAmountError::Overflow)?
    };

    // Pad or truncate the fraction to 2 digits
    let minor: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| ParseAmountError::InvalidFormat)? * 10,
        _ => fraction[..2]
            .parse()
            .map_err(|_| ParseAmountError::InvalidFormat)?,
    };

    let amount = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(minor))
        .ok_or(ParseAmountError::Overflow)?;
    Ok(if negative { -amount } else { amount })
}

fn has_valid_grouping(whole: &str) -> bool {
    if !whole.contains(',') {
        return true;
    }
    let mut groups = whole.split(',');
    let leading_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()));
    leading_ok && groups.all(|g| g.len() == 3)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5000), "50.00");
        assert_eq!(format_amount(1234), "12.34");
        assert_eq!(format_amount(1), "0.01");
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(-5000), "-50.00");
        assert_eq!(format_amount(-1), "-0.01");
        assert_eq!(format_amount(500_000_000), "5000000.00");
    }

    #[test]
    fn test_format_amount_grouped() {
        assert_eq!(format_amount_grouped(0), "0.00");
        assert_eq!(format_amount_grouped(99_999), "999.99");
        assert_eq!(format_amount_grouped(100_000), "1,000.00");
        assert_eq!(format_amount_grouped(500_000_000), "5,000,000.00");
        assert_eq!(format_amount_grouped(-400_000_050), "-4,000,000.50");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(5000));
        assert_eq!(parse_amount("50"), Ok(5000));
        assert_eq!(parse_amount("12.5"), Ok(1250));
        assert_eq!(parse_amount(".50"), Ok(50));
        assert_eq!(parse_amount("-50.00"), Ok(-5000));
        assert_eq!(parse_amount("100.999"), Ok(10099)); // Truncates
        assert_eq!(parse_amount("5,000,000"), Ok(500_000_000));
        assert_eq!(parse_amount("1_000.25"), Ok(100_025));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.34.56"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("."), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("--5"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("-"), Err(ParseAmountError::Empty));
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(ParseAmountError::Overflow)
        );
    }

    #[test]
    fn test_parse_amount_comma_grouping() {
        assert_eq!(parse_amount("12,345.67"), Ok(1_234_567));
        assert_eq!(parse_amount("1,2,3"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("1000,000"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount(",100"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("100,"), Err(ParseAmountError::InvalidFormat));
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        for amount in [0, 1, 99, 100, 123_456, -7_500] {
            assert_eq!(parse_amount(&format_amount(amount)), Ok(amount));
            assert_eq!(parse_amount(&format_amount_grouped(amount)), Ok(amount));
        }
    }
}
