use anyhow::{anyhow, Result};
use chrono::Month;

/// Calendar order. Detection walks this list, so "january" wins over "june"
/// only because it comes first.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

pub const DEFAULT_YEAR: i32 = 2023;

/// Finds the first month whose English name appears in the file name.
pub fn detect_month(file_name: &str) -> Option<Month> {
    let lower = file_name.to_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|m| lower.contains(&m.name().to_lowercase()))
}

/// `solar_h2_<month>_<year>_detailed.csv`
pub fn data_file_name(month: Month, year: i32) -> String {
    format!(
        "solar_h2_{}_{}_detailed.csv",
        month.name().to_lowercase(),
        year
    )
}

/// Accepts a month name, its three letter abbreviation or a number 1-12.
pub fn parse_month(input: &str) -> Result<Month> {
    let input = input.trim();
    if let Ok(n) = input.parse::<u8>() {
        return Month::try_from(n).map_err(|_| anyhow!("Month number out of range: {}", n));
    }
    input
        .parse::<Month>()
        .map_err(|_| anyhow!("Unknown month: '{}'", input))
}

pub fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_month() {
        assert_eq!(detect_month("solar_h2_march_2023_detailed.csv"), Some(Month::March));
        assert_eq!(detect_month("SOLAR_H2_JUNE_2023.CSV"), Some(Month::June));
        assert_eq!(detect_month("results_December.csv"), Some(Month::December));
        assert_eq!(detect_month("summary_2023.csv"), None);
    }

    #[test]
    fn test_data_file_name() {
        assert_eq!(
            data_file_name(Month::September, 2023),
            "solar_h2_september_2023_detailed.csv"
        );
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("march").unwrap(), Month::March);
        assert_eq!(parse_month("Oct").unwrap(), Month::October);
        assert_eq!(parse_month("12").unwrap(), Month::December);
        assert!(parse_month("13").is_err());
        assert!(parse_month("smarch").is_err());
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index(Month::January), 0);
        assert_eq!(month_index(Month::December), 11);
    }
}
