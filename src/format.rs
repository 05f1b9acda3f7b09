use std::fmt;

use crate::value::{RoundingMode, Value, DISPLAY_PRECISION};

/// How stack values are rendered. Stored values never change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Standard,
    Fixed,
    Scientific,
    Engineering,
}

impl Default for DisplayMode {
    fn default() -> DisplayMode {
        DisplayMode::Standard
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DisplayMode::Standard => "STD",
            DisplayMode::Fixed => "FIX",
            DisplayMode::Scientific => "SCI",
            DisplayMode::Engineering => "ENG",
        };
        write!(f, "{}", name)
    }
}

/// Renders a value for display. The value is rounded to
/// `DISPLAY_PRECISION` significant digits first (half-even), so long
/// results of floating point functions stay readable
pub fn format_entry(v: &Value, mode: DisplayMode) -> String {
    let v = v.round_to_precision(DISPLAY_PRECISION, RoundingMode::HalfEven);
    match mode {
        DisplayMode::Standard => v.to_standard_string(),
        DisplayMode::Fixed => v.to_plain_string(),
        DisplayMode::Scientific => v.to_scientific_string(),
        DisplayMode::Engineering => v.to_engineering_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Value {
        Value::from_str_decimal(s).unwrap()
    }

    #[test]
    fn test_modes() {
        let val = v("1234.5");
        assert_eq!(format_entry(&val, DisplayMode::Standard), "1234.5");
        assert_eq!(format_entry(&val, DisplayMode::Fixed), "1234.5");
        assert_eq!(format_entry(&val, DisplayMode::Scientific), "1.2345E+3");
        assert_eq!(format_entry(&val, DisplayMode::Engineering), "1234.5");

        let val = v("0.00000005");
        assert_eq!(format_entry(&val, DisplayMode::Standard), "5E-8");
        assert_eq!(format_entry(&val, DisplayMode::Fixed), "0.00000005");
        assert_eq!(format_entry(&val, DisplayMode::Scientific), "5E-8");
        assert_eq!(format_entry(&val, DisplayMode::Engineering), "50E-9");
    }

    #[test]
    fn test_display_rounding() {
        let third = Value::from(1i64).divide(Value::from(3i64)).unwrap();
        assert_eq!(format_entry(&third, DisplayMode::Standard), "0.3333333333333333");
        assert_eq!(third.precision(), 34);

        let big = v("12345678901234567890");
        assert_eq!(format_entry(&big, DisplayMode::Standard), "1.234567890123457E+19");
        assert_eq!(format_entry(&big, DisplayMode::Fixed), "12345678901234570000");
        assert_eq!(format_entry(&big, DisplayMode::Engineering), "12.34567890123457E+18");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(DisplayMode::default(), DisplayMode::Standard);
        assert_eq!(format!("{}", DisplayMode::Engineering), "ENG");
    }
}
