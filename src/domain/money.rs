use serde::{Deserialize, Serialize};
use std::fmt;

/// Amounts are stored in a SQLite REAL column, so they are carried as `f64`.
pub type Amount = f64;

/// Format an amount with two decimals.
/// Example: 25.5 -> "25.50", -3.0 -> "-3.00"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// A numeric field as sent by a client: either a JSON number or a numeric
/// string such as `"25.5"` or `"1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

// Largest integer magnitude an f64 represents exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

impl NumericInput {
    /// Returns true when the value carries nothing: blank text.
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }

    /// Returns true for a JSON number equal to zero. Text such as `"0"` is
    /// not a zero number: it is a value that happens to parse to zero.
    pub fn is_zero_number(&self) -> bool {
        match self {
            NumericInput::Integer(n) => *n == 0,
            NumericInput::Float(f) => *f == 0.0,
            NumericInput::Text(_) => false,
        }
    }

    /// Coerce to a finite amount. Text is trimmed before parsing.
    pub fn to_amount(&self) -> Result<Amount, ParseNumberError> {
        let value = match self {
            NumericInput::Integer(n) => *n as f64,
            NumericInput::Float(f) => *f,
            NumericInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseNumberError::NotANumber(s.clone()))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseNumberError::NotANumber(self.to_string()))
        }
    }

    /// Coerce to an integer identifier. Floats are accepted only when they
    /// hold a whole number.
    pub fn to_id(&self) -> Result<i64, ParseNumberError> {
        match self {
            NumericInput::Integer(n) => Ok(*n),
            NumericInput::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT {
                    Ok(*f as i64)
                } else {
                    Err(ParseNumberError::NotAnInteger(f.to_string()))
                }
            }
            NumericInput::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ParseNumberError::NotAnInteger(s.clone())),
        }
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Integer(n) => write!(f, "{}", n),
            NumericInput::Float(v) => write!(f, "{}", v),
            NumericInput::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Float(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Integer(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    NotANumber(String),
    NotAnInteger(String),
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseNumberError::NotANumber(s) => write!(f, "'{}' is not a number", s),
            ParseNumberError::NotAnInteger(s) => write!(f, "'{}' is not an integer", s),
        }
    }
}

impl std::error::Error for ParseNumberError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(25.5), "25.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-3.0), "-3.00");
        assert_eq!(format_amount(1234.567), "1234.57");
    }

    #[test]
    fn test_amount_from_numbers_and_strings() {
        assert_eq!(NumericInput::Float(25.5).to_amount(), Ok(25.5));
        assert_eq!(NumericInput::Integer(12).to_amount(), Ok(12.0));
        assert_eq!(NumericInput::from("25.5").to_amount(), Ok(25.5));
        assert_eq!(NumericInput::from(" 7 ").to_amount(), Ok(7.0));
    }

    #[test]
    fn test_amount_rejects_non_numeric_text() {
        assert!(NumericInput::from("abc").to_amount().is_err());
        assert!(NumericInput::from("12abc").to_amount().is_err());
        assert!(NumericInput::from("NaN").to_amount().is_err());
        assert!(NumericInput::from("inf").to_amount().is_err());
    }

    #[test]
    fn test_id_coercion() {
        assert_eq!(NumericInput::Integer(1).to_id(), Ok(1));
        assert_eq!(NumericInput::from("1").to_id(), Ok(1));
        assert_eq!(NumericInput::Float(3.0).to_id(), Ok(3));
        assert!(NumericInput::Float(3.5).to_id().is_err());
        assert!(NumericInput::from("one").to_id().is_err());
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<NumericInput> = serde_json::from_str(r#"[1, 25.5, "25.5"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                NumericInput::Integer(1),
                NumericInput::Float(25.5),
                NumericInput::Text("25.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_detection() {
        assert!(NumericInput::from("   ").is_blank());
        assert!(!NumericInput::from("0").is_blank());
        assert!(!NumericInput::Integer(0).is_blank());
    }

    #[test]
    fn test_zero_number_detection() {
        assert!(NumericInput::Integer(0).is_zero_number());
        assert!(NumericInput::Float(0.0).is_zero_number());
        assert!(!NumericInput::from("0").is_zero_number());
        assert!(!NumericInput::Float(0.5).is_zero_number());
    }
}
