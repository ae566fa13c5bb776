//! Arithmetic and comparison overlay for [`Roman`] values.
//!
//! Every operation decodes its operands, performs ordinary integer
//! arithmetic and re-encodes the result, so this module adds no grammar of
//! its own. The result carries the left operand's notation and arithmetic
//! mode. Intermediate math is widened so that out-of-range results surface
//! as typed errors instead of wrapping.

use crate::{Error, ErrorKind, Roman};
use core::cmp::Ordering;

/// Which operand types arithmetic accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArithmeticMode {
    /// Only other numerals may participate.
    Strict,
    /// Integers participate freely; reals participate when equal to their
    /// truncation.
    #[default]
    Tolerant,
}

/// A right-hand operand for arithmetic on [`Roman`] values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    /// The decoded value of a numeral. Always compatible.
    Numeral(u64),
    Integer(i64),
    Real(f64),
}

impl From<&Roman> for Operand {
    fn from(roman: &Roman) -> Self {
        Operand::Numeral(roman.value())
    }
}

impl From<Roman> for Operand {
    fn from(roman: Roman) -> Self {
        Operand::Numeral(roman.value())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Integer(i64::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Integer(value)
    }
}

impl From<u32> for Operand {
    fn from(value: u32) -> Self {
        Operand::Integer(i64::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Real(value)
    }
}

impl Operand {
    /// Apply the compatibility rules for `mode` and produce the operand's
    /// integer value.
    fn resolve(self, mode: ArithmeticMode) -> Result<i128, Error> {
        match self {
            Operand::Numeral(value) => Ok(value as i128),
            Operand::Integer(value) => {
                if mode == ArithmeticMode::Strict {
                    return Err(Error::new(
                        ErrorKind::IncompatibleOperand,
                        format!("integer {value}"),
                    ));
                }
                Ok(value as i128)
            }
            Operand::Real(value) => {
                if mode == ArithmeticMode::Strict {
                    return Err(Error::new(
                        ErrorKind::IncompatibleOperand,
                        format!("real {value}"),
                    ));
                }
                if !value.is_finite() || value.trunc() != value {
                    return Err(Error::new(
                        ErrorKind::NonIntegralOperand,
                        value.to_string(),
                    ));
                }
                Ok(value as i128)
            }
        }
    }
}

/// Quotient and remainder under floor division; the remainder carries the
/// divisor's sign. The caller has already excluded a zero divisor.
fn floor_div_rem(lhs: i128, rhs: i128) -> (i128, i128) {
    let mut quotient = lhs / rhs;
    let mut remainder = lhs % rhs;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        quotient -= 1;
        remainder += rhs;
    }
    (quotient, remainder)
}

impl Roman {
    /// `self + rhs`, re-encoded in `self`'s notation.
    pub fn add(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        let sum = (self.value() as i128)
            .checked_add(rhs)
            .ok_or_else(|| Error::new(ErrorKind::Overflow, self.numeral().to_owned()))?;
        self.rebuild(sum)
    }

    /// `self - rhs`. A result below zero is [`ErrorKind::NegativeValue`];
    /// there is no numeral for it.
    pub fn sub(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        let difference = (self.value() as i128)
            .checked_sub(rhs)
            .ok_or_else(|| Error::new(ErrorKind::Overflow, self.numeral().to_owned()))?;
        self.rebuild(difference)
    }

    pub fn mul(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        let product = (self.value() as i128)
            .checked_mul(rhs)
            .ok_or_else(|| Error::new(ErrorKind::Overflow, self.numeral().to_owned()))?;
        self.rebuild(product)
    }

    /// Floor quotient of `self / rhs`.
    pub fn div(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        if rhs == 0 {
            return Err(Error::new(
                ErrorKind::DivisionByZero,
                self.numeral().to_owned(),
            ));
        }
        self.rebuild(floor_div_rem(self.value() as i128, rhs).0)
    }

    pub fn rem(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        if rhs == 0 {
            return Err(Error::new(
                ErrorKind::DivisionByZero,
                self.numeral().to_owned(),
            ));
        }
        self.rebuild(floor_div_rem(self.value() as i128, rhs).1)
    }

    /// Floor quotient and remainder of `self / rhs` as a pair of numerals.
    pub fn div_rem(&self, rhs: impl Into<Operand>) -> Result<(Roman, Roman), Error> {
        let rhs = rhs.into().resolve(self.arithmetic_mode())?;
        if rhs == 0 {
            return Err(Error::new(
                ErrorKind::DivisionByZero,
                self.numeral().to_owned(),
            ));
        }
        let (quotient, remainder) = floor_div_rem(self.value() as i128, rhs);
        Ok((self.rebuild(quotient)?, self.rebuild(remainder)?))
    }

    /// `self` raised to `rhs`. The exponent must be a non-negative integer;
    /// a fractional result has no numeral.
    pub fn pow(&self, rhs: impl Into<Operand>) -> Result<Roman, Error> {
        let exponent = rhs.into().resolve(self.arithmetic_mode())?;
        if exponent < 0 {
            return Err(Error::new(
                ErrorKind::NegativeValue,
                format!("exponent {exponent}"),
            ));
        }

        let exponent = u32::try_from(exponent)
            .map_err(|_| Error::new(ErrorKind::Overflow, format!("exponent {exponent}")))?;
        let raised = (self.value() as i128)
            .checked_pow(exponent)
            .ok_or_else(|| Error::new(ErrorKind::Overflow, self.numeral().to_owned()))?;
        self.rebuild(raised)
    }

    /// Re-encode a computed value in this instance's notation, keeping its
    /// arithmetic mode.
    fn rebuild(&self, value: i128) -> Result<Roman, Error> {
        if value < 0 {
            return Err(Error::new(
                ErrorKind::NegativeValue,
                format!("result {value}"),
            ));
        }
        if value > i64::MAX as i128 {
            return Err(Error::new(ErrorKind::Overflow, format!("result {value}")));
        }

        Ok(Roman::from_value(value as i64, self.notation())?
            .with_arithmetic_mode(self.arithmetic_mode()))
    }
}

// Comparisons reduce to the decoded values; renderings and notation do not
// participate. XL and XXXX with value 40 compare equal.

impl PartialEq for Roman {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Roman {}

impl Ord for Roman {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for Roman {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<u64> for Roman {
    fn eq(&self, other: &u64) -> bool {
        self.value() == *other
    }
}

impl PartialOrd<u64> for Roman {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        self.value().partial_cmp(other)
    }
}

impl PartialEq<i64> for Roman {
    fn eq(&self, other: &i64) -> bool {
        i128::from(self.value()) == i128::from(*other)
    }
}

impl PartialOrd<i64> for Roman {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        i128::from(self.value()).partial_cmp(&i128::from(*other))
    }
}

impl PartialEq<f64> for Roman {
    fn eq(&self, other: &f64) -> bool {
        self.value() as f64 == *other
    }
}

impl PartialOrd<f64> for Roman {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        (self.value() as f64).partial_cmp(other)
    }
}
