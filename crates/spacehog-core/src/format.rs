use thiserror::Error;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with the largest binary (1024-based) unit that keeps
/// the magnitude in [1, 1024). Bytes print as an integer, everything else
/// with two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    // Values just under 1024 would round up to "1024.00" at two decimals;
    // bump those to the next unit to keep the displayed magnitude < 1024.
    if value >= 1023.995 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid size '{0}'")]
pub struct ParseSizeError(pub String);

/// Parse a human-readable size string ("512", "100MB", "1.5 GB") into
/// bytes. Units are binary multiples; a bare number means bytes.
pub fn parse_size(input: &str) -> Result<u64, ParseSizeError> {
    let trimmed = input.trim();
    let upper = trimmed.to_ascii_uppercase();

    let (number, multiplier) = if let Some(n) = upper.strip_suffix("PB") {
        (n, 1u64 << 50)
    } else if let Some(n) = upper.strip_suffix("TB") {
        (n, 1u64 << 40)
    } else if let Some(n) = upper.strip_suffix("GB") {
        (n, 1u64 << 30)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, 1u64 << 20)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1u64 << 10)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1u64)
    } else {
        (upper.as_str(), 1u64)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| ParseSizeError(input.to_string()))?;
    if value < 0.0 {
        return Err(ParseSizeError(input.to_string()));
    }

    Ok((value * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_bytes_are_integral() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn format_size_binary_units() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024 * 5), "5.00 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_size(1u64 << 40), "1.00 TB");
        assert_eq!(format_size(1u64 << 50), "1.00 PB");
    }

    #[test]
    fn format_size_never_displays_1024_of_a_unit() {
        // 1023.999 KB must round up to the next unit, not print "1024.00 KB".
        assert_eq!(format_size(1024 * 1024 - 1), "1.00 MB");
        assert_eq!(format_size(1024 * 1024 * 1024 - 1), "1.00 GB");
        // Just below the rounding threshold still stays in its unit.
        assert_eq!(format_size(1023 * 1024), "1023.00 KB");
    }

    #[test]
    fn parse_size_plain_and_suffixed() {
        assert_eq!(parse_size("512"), Ok(512));
        assert_eq!(parse_size("512B"), Ok(512));
        assert_eq!(parse_size("1KB"), Ok(1024));
        assert_eq!(parse_size("100MB"), Ok(100 * 1024 * 1024));
        assert_eq!(parse_size("1gb"), Ok(1 << 30));
        assert_eq!(parse_size(" 1.5 KB "), Ok(1536));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("lots").is_err());
        assert!(parse_size("-5MB").is_err());
        assert!(parse_size("MB").is_err());
    }
}
