//! Numeric codes accepted by lookups and station queries.

use super::{Ccaa, Municipality, Product, Province, Zone};

/// Error returned when a code argument is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid code {input:?}: {reason}")]
pub struct InvalidCode {
    input: String,
    reason: &'static str,
}

/// A code as supplied by a caller: an integer, or text that may hold one.
///
/// Resolved entities convert into their own code, so queries accept either
/// `&Municipality` or `"0012"`.
///
/// # Examples
///
/// ```
/// use fuel_prices::domain::CodeArg;
///
/// assert_eq!(CodeArg::from("0012").parse(), Ok(12));
/// assert_eq!(CodeArg::from(7).parse(), Ok(7));
/// assert!(CodeArg::from(-3).parse().is_err());
/// assert!(CodeArg::from("doce").parse().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeArg {
    Int(i64),
    Text(String),
}

impl CodeArg {
    /// Parse into a positive code.
    pub fn parse(&self) -> Result<u32, InvalidCode> {
        match self {
            CodeArg::Int(n) => {
                if *n <= 0 {
                    return Err(invalid(n.to_string(), "must be positive"));
                }
                u32::try_from(*n).map_err(|_| invalid(n.to_string(), "out of range"))
            }
            CodeArg::Text(s) => {
                let digits = s.trim();
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(s.clone(), "must contain only digits"));
                }
                let code: u32 = digits
                    .parse()
                    .map_err(|_| invalid(s.clone(), "out of range"))?;
                if code == 0 {
                    return Err(invalid(s.clone(), "must be positive"));
                }
                Ok(code)
            }
        }
    }
}

fn invalid(input: String, reason: &'static str) -> InvalidCode {
    InvalidCode { input, reason }
}

/// Keep only the arguments that parse as positive codes.
pub fn parse_codes<I>(codes: I) -> Vec<u32>
where
    I: IntoIterator,
    I::Item: Into<CodeArg>,
{
    codes
        .into_iter()
        .filter_map(|c| c.into().parse().ok())
        .collect()
}

impl From<i64> for CodeArg {
    fn from(n: i64) -> Self {
        CodeArg::Int(n)
    }
}

impl From<i32> for CodeArg {
    fn from(n: i32) -> Self {
        CodeArg::Int(n.into())
    }
}

impl From<u32> for CodeArg {
    fn from(n: u32) -> Self {
        CodeArg::Int(n.into())
    }
}

impl From<&str> for CodeArg {
    fn from(s: &str) -> Self {
        CodeArg::Text(s.to_owned())
    }
}

impl From<String> for CodeArg {
    fn from(s: String) -> Self {
        CodeArg::Text(s)
    }
}

impl From<&Ccaa> for CodeArg {
    fn from(c: &Ccaa) -> Self {
        c.code().into()
    }
}

impl From<&Province> for CodeArg {
    fn from(p: &Province) -> Self {
        p.code().into()
    }
}

impl From<&Municipality> for CodeArg {
    fn from(m: &Municipality) -> Self {
        m.code().into()
    }
}

impl From<&Product> for CodeArg {
    fn from(p: &Product) -> Self {
        p.code().into()
    }
}

impl From<&Zone> for CodeArg {
    fn from(z: &Zone) -> Self {
        z.code().into()
    }
}
