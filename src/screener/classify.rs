//! Critical-value interval classification shared by both testers.

use super::error::ScreenerError;

/// Classify a test statistic against labeled critical values.
///
/// A threshold counts as exceeded when `|statistic| > |threshold|`;
/// among all exceeded thresholds the one with the largest absolute value
/// wins, i.e. the most stringent significance level, regardless of the
/// order the table is supplied in. Returns `(cointegrated, interval)`
/// where `interval` is the winning label parsed as an integer percentage
/// ("1%" -> 1), or `(false, 0)` when nothing is exceeded.
///
/// Only the "1%", "5%" and "10%" significance levels exist downstream
/// (the confidence mapping depends on it), so any other label is a
/// [`ScreenerError::Configuration`], even when it would not win.
pub fn classify(
    statistic: f64,
    critical_values: &[(String, f64)],
) -> Result<(bool, u8), ScreenerError> {
    // Validate every label up front so a malformed table always fails.
    for (label, _) in critical_values {
        parse_interval(label)?;
    }

    let abs_statistic = statistic.abs();
    let mut best: Option<(&str, f64)> = None;
    for (label, threshold) in critical_values {
        let abs_threshold = threshold.abs();
        if abs_statistic > abs_threshold
            && best.map_or(true, |(_, best_abs)| abs_threshold > best_abs)
        {
            best = Some((label, abs_threshold));
        }
    }

    match best {
        Some((label, _)) => Ok((true, parse_interval(label)?)),
        None => Ok((false, 0)),
    }
}

fn parse_interval(label: &str) -> Result<u8, ScreenerError> {
    match label.trim().trim_end_matches('%').parse::<u8>() {
        Ok(interval @ (1 | 5 | 10)) => Ok(interval),
        _ => Err(ScreenerError::Configuration(format!(
            "critical-value label '{label}' is not one of the 1%/5%/10% significance levels"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adf_table() -> Vec<(String, f64)> {
        vec![
            ("1%".to_string(), -3.0),
            ("5%".to_string(), -2.5),
            ("10%".to_string(), -2.0),
        ]
    }

    #[test]
    fn statistic_beyond_all_thresholds_is_one_percent() {
        assert_eq!(classify(-3.2, &adf_table()).unwrap(), (true, 1));
    }

    #[test]
    fn statistic_beyond_weakest_threshold_is_ten_percent() {
        assert_eq!(classify(-2.2, &adf_table()).unwrap(), (true, 10));
    }

    #[test]
    fn statistic_within_all_thresholds_is_not_cointegrated() {
        assert_eq!(classify(-1.0, &adf_table()).unwrap(), (false, 0));
    }

    #[test]
    fn most_stringent_exceeded_threshold_wins_regardless_of_order() {
        let mut table = adf_table();
        table.reverse();
        assert_eq!(classify(-3.2, &table).unwrap(), (true, 1));
    }

    #[test]
    fn positive_thresholds_compare_by_magnitude() {
        // Johansen trace tables are positive; the comparison is on
        // absolute values either way.
        let table = vec![
            ("10%".to_string(), 13.4294),
            ("5%".to_string(), 15.4943),
            ("1%".to_string(), 19.9349),
        ];
        assert_eq!(classify(21.0, &table).unwrap(), (true, 1));
        assert_eq!(classify(14.0, &table).unwrap(), (true, 10));
        assert_eq!(classify(5.0, &table).unwrap(), (false, 0));
    }

    #[test]
    fn malformed_label_is_a_configuration_error() {
        let table = vec![("one percent".to_string(), -3.0)];
        assert!(matches!(
            classify(-5.0, &table),
            Err(ScreenerError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_label_fails_even_when_not_winning() {
        let table = vec![("1%".to_string(), -3.0), ("bad".to_string(), -99.0)];
        assert!(classify(-3.2, &table).is_err());
    }

    #[test]
    fn label_outside_the_significance_levels_is_rejected() {
        // Parses as a percentage but is not a level the confidence
        // mapping can represent.
        let table = vec![("150%".to_string(), -100.0)];
        assert!(matches!(
            classify(-200.0, &table),
            Err(ScreenerError::Configuration(_))
        ));
        let table = vec![("7%".to_string(), -2.0)];
        assert!(matches!(
            classify(-3.0, &table),
            Err(ScreenerError::Configuration(_))
        ));
    }
}
