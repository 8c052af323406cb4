use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn read_trimmed() -> io::Result<String> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        // Treat a closed stdin as the end of the session.
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_owned())
}

pub fn read_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    read_trimmed()
}

/// Prompt until the input parses.
pub fn read_parsed<T: FromStr>(label: &str) -> io::Result<T> {
    loop {
        let line = read_line(label)?;
        match line.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid number, try again"),
        }
    }
}

/// Prompt for a decimal amount, returned in minor units.
pub fn read_price(label: &str) -> io::Result<i64> {
    loop {
        let line = read_line(label)?;
        match parse_price(&line) {
            Some(value) => return Ok(value),
            None => println!("Invalid amount, expected something like 12.50"),
        }
    }
}

pub fn confirm(label: &str) -> io::Result<bool> {
    let line = read_line(label)?;
    Ok(matches!(line.as_str(), "y" | "Y" | "yes"))
}

/// Parse a non-negative decimal amount with up to two fraction digits into
/// minor units: "12.5" -> 1250.
pub fn parse_price(input: &str) -> Option<i64> {
    let text = input.trim();
    if text.is_empty() || text.starts_with('-') || text.starts_with('+') {
        return None;
    }

    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse::<i64>().ok()?,
    };

    whole.checked_mul(100)?.checked_add(cents)
}

pub fn format_price(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_amounts_into_minor_units() {
        assert_eq!(parse_price("12.50"), Some(1250));
        assert_eq!(parse_price("12.5"), Some(1250));
        assert_eq!(parse_price("12."), Some(1200));
        assert_eq!(parse_price("12"), Some(1200));
        assert_eq!(parse_price("0.05"), Some(5));
        assert_eq!(parse_price(" 7 "), Some(700));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("+1"), None);
        assert_eq!(parse_price("1.234"), None);
        assert_eq!(parse_price("1.2x"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("."), None);
    }

    #[test]
    fn formats_minor_units_as_decimals() {
        assert_eq!(format_price(1250), "12.50");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(0), "0.00");
        assert_eq!(format_price(-1250), "-12.50");
    }
}
