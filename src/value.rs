use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::errors::*;

pub use bigdecimal::RoundingMode;

/// Operation result: either value or error
pub type CalcResult = Result<Value, CalcError>;
pub type CalcErrorResult = Result<(), CalcError>;

/// Significant digits kept by a division that does not terminate
pub const DIVISION_PRECISION: u64 = 34;
/// Significant digits a value is rounded to before it is displayed
pub const DISPLAY_PRECISION: u64 = 16;
/// Upper bound of digits (and of the scale) an exact power may produce
pub const MAX_EXACT_DIGITS: u64 = 1_000_000;
/// The largest argument of factorial
pub const MAX_FACTORIAL: u64 = 100_000;

/// Arbitrary precision signed decimal number.
///
/// A value is an unscaled big integer and a scale: the number of digits
/// after the decimal point. Negative scale means trailing zeros, e.g.
/// `(12, -2)` is `1200` written with two significant digits.
#[derive(Clone)]
pub struct Value(BigDecimal);

fn pow10(n: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u32), n as usize)
}

// rounds `d` to `prec` significant digits, shorter values are kept as is
fn round_digits(d: &BigDecimal, prec: u64, mode: RoundingMode) -> BigDecimal {
    let prec = match NonZeroU64::new(prec) {
        Some(p) if d.digits() > prec => p,
        _ => return d.clone(),
    };
    let rounded = d.with_precision_round(prec, mode);
    // 9.99 -> 10.0 gains a digit, the extra one is a zero
    if rounded.digits() > prec.get() {
        let (_, scale) = rounded.as_bigint_and_exponent();
        rounded.with_scale_round(scale - 1, mode)
    } else {
        rounded
    }
}

// digits of a non-negative coefficient with the decimal point put in place
fn plain_digits(coeff: &str, scale: i64) -> String {
    if scale <= 0 {
        if coeff == "0" {
            return coeff.to_string();
        }
        return format!("{}{}", coeff, "0".repeat((-scale) as usize));
    }
    let scale = scale as usize;
    if coeff.len() > scale {
        let (int, fract) = coeff.split_at(coeff.len() - scale);
        format!("{}.{}", int, fract)
    } else {
        format!("0.{}{}", "0".repeat(scale - coeff.len()), coeff)
    }
}

fn exponential_digits(coeff: &str, adjusted: i64) -> String {
    let (first, rest) = coeff.split_at(1);
    if rest.is_empty() {
        format!("{}E{:+}", first, adjusted)
    } else {
        format!("{}.{}E{:+}", first, rest, adjusted)
    }
}

macro_rules! float_fn {
    ($id:ident, $f:expr) => {
        pub fn $id(self) -> CalcResult {
            let x = self.to_f64()?;
            Value::from_float(($f)(x), stringify!($id))
        }
    };
}

impl Value {
    pub fn new(digits: BigInt, scale: i64) -> Self {
        Value(BigDecimal::new(digits, scale))
    }

    pub fn zero() -> Self {
        Value::new(BigInt::zero(), 0)
    }

    /// Unscaled digits and scale
    pub fn parts(&self) -> (BigInt, i64) {
        self.0.as_bigint_and_exponent()
    }

    pub fn scale(&self) -> i64 {
        self.parts().1
    }

    /// The number of significant digits
    pub fn precision(&self) -> u64 {
        if self.is_zero() {
            1
        } else {
            self.0.digits()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// A value is an integer when it has no fractional digits. `5.0` is not.
    pub fn is_integer(&self) -> bool {
        self.scale() <= 0
    }

    // decimal text with an optional exponent, as printed by dtoa
    pub(crate) fn from_str_decimal(s: &str) -> CalcResult {
        BigDecimal::from_str(s)
            .map(Value)
            .map_err(|_| CalcError::InvalidNumber(s.to_string()))
    }

    pub fn from_f64(f: f64) -> CalcResult {
        Value::from_float(f, "f64")
    }

    // converts a floating point result of operation `op` back to a decimal.
    // Integral results get scale 0
    pub(crate) fn from_float(f: f64, op: &str) -> CalcResult {
        if !f.is_finite() {
            return Err(CalcError::NotFinite(op.to_string()));
        }
        let mut buf = dtoa::Buffer::new();
        let d = Value::from_str_decimal(buf.format(f))?.0.normalized();
        if d.fractional_digit_count() < 0 {
            Ok(Value(d.with_scale(0)))
        } else {
            Ok(Value(d))
        }
    }

    /// Floating point approximation of the value
    pub fn to_f64(&self) -> Result<f64, CalcError> {
        match self.to_standard_string().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(CalcError::Overflow("f64".to_string())),
        }
    }

    // integral part of the value
    fn to_big_int(&self) -> BigInt {
        self.0.with_scale_round(0, RoundingMode::Down).into_bigint_and_exponent().0
    }

    /// Rounds the value to at most `prec` significant digits
    pub fn round_to_precision(&self, prec: u64, mode: RoundingMode) -> Value {
        Value(round_digits(&self.0, prec, mode))
    }

    pub fn addition(self, rhs: Value) -> CalcResult {
        Ok(Value(self.0 + rhs.0))
    }

    pub fn subtract(self, rhs: Value) -> CalcResult {
        Ok(Value(self.0 - rhs.0))
    }

    pub fn multiply(self, rhs: Value) -> CalcResult {
        Ok(Value(self.0 * rhs.0))
    }

    /// Division rounded to `DIVISION_PRECISION` digits half-up. A quotient
    /// that terminates is exact, with the scale as close as possible to
    /// `scale(self) - scale(rhs)`
    pub fn divide(self, rhs: Value) -> CalcResult {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let (a, sa) = self.parts();
        let (b, sb) = rhs.parts();
        let preferred = sa - sb;
        if a.is_zero() {
            return Ok(Value::new(BigInt::zero(), preferred));
        }

        // at least DIVISION_PRECISION + 1 digits in the integer quotient
        let shift = (DIVISION_PRECISION as i64 + 1 + rhs.precision() as i64 - self.precision() as i64).max(0);
        let num = a.abs() * pow10(shift as u64);
        let den = b.abs();
        let mut q = &num / &den;
        let mut scale = preferred + shift;

        if (&num % &den).is_zero() {
            let ten = BigInt::from(10u32);
            while scale > preferred && (&q % &ten).is_zero() {
                q /= &ten;
                scale -= 1;
            }
        }
        if a.is_negative() != b.is_negative() {
            q = -q;
        }
        // the quotient is truncated, so half-up on its digits is exact
        let q = BigDecimal::new(q, scale);
        Ok(Value(round_digits(&q, DIVISION_PRECISION, RoundingMode::HalfUp)))
    }

    /// Truncating remainder: the result has the sign of the dividend
    pub fn remainder(self, rhs: Value) -> CalcResult {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let scale = self.scale().max(rhs.scale());
        let (a, _) = self.0.with_scale(scale).into_bigint_and_exponent();
        let (b, _) = rhs.0.with_scale(scale).into_bigint_and_exponent();
        Ok(Value::new(a % b, scale))
    }

    /// Integer exponents are exact (negative ones divide), any other
    /// exponent goes through floating point
    pub fn power(self, rhs: Value) -> CalcResult {
        if !rhs.is_integer() {
            let y = self.to_f64()?;
            let x = rhs.to_f64()?;
            return Value::from_float(y.powf(x), "pow");
        }

        let overflow = || CalcError::Overflow("pow".to_string());
        let n = rhs.to_big_int();
        let e = n.magnitude().to_u32().ok_or_else(overflow)?;
        let (int, scale) = self.parts();
        let trivial = int.abs() <= BigInt::one();
        if !trivial && self.precision().saturating_mul(u64::from(e)) > MAX_EXACT_DIGITS {
            return Err(overflow());
        }
        // 0.1^n has a single digit but n fractional places
        let new_scale = scale.checked_mul(i64::from(e)).ok_or_else(overflow)?;
        if new_scale.unsigned_abs() > MAX_EXACT_DIGITS {
            return Err(overflow());
        }

        let p = Value::new(num_traits::pow(int, e as usize), new_scale);
        if n.is_negative() {
            Value::from(1i64).divide(p)
        } else {
            Ok(p)
        }
    }

    /// `x * (x-1) * ... * 1`, `0! = 1`
    pub fn fact(self) -> CalcResult {
        if !self.is_integer() {
            return Err(CalcError::RequiresInteger);
        }
        let n = self.to_big_int();
        if n.is_negative() {
            return Err(CalcError::InvalidOperand("fact".to_string()));
        }
        let n = match n.to_u64() {
            Some(n) if n <= MAX_FACTORIAL => n,
            _ => return Err(CalcError::Overflow("fact".to_string())),
        };

        let mut res = BigInt::one();
        for i in 2..=n {
            res *= BigInt::from(i);
        }
        Ok(Value::new(res, 0))
    }

    pub fn negate(self) -> CalcResult {
        Ok(Value(-self.0))
    }

    pub fn abs(self) -> CalcResult {
        Ok(Value(self.0.abs()))
    }

    pub fn ceil(self) -> CalcResult {
        Ok(Value(self.0.with_scale_round(0, RoundingMode::Ceiling)))
    }

    pub fn floor(self) -> CalcResult {
        Ok(Value(self.0.with_scale_round(0, RoundingMode::Floor)))
    }

    /// The greater of the two. On a tie the top of the stack (`rhs`) wins,
    /// so `2.0 2.00 max` keeps the scale of `2.00`
    pub fn max(self, rhs: Value) -> CalcResult {
        Ok(if rhs >= self { rhs } else { self })
    }

    pub fn min(self, rhs: Value) -> CalcResult {
        Ok(if rhs <= self { rhs } else { self })
    }

    pub fn hypot(self, rhs: Value) -> CalcResult {
        let y = self.to_f64()?;
        let x = rhs.to_f64()?;
        Value::from_float(y.hypot(x), "hyp")
    }

    float_fn!(sqrt, f64::sqrt);
    float_fn!(cbrt, f64::cbrt);
    float_fn!(ln, f64::ln);
    float_fn!(log, f64::log10);
    float_fn!(exp, f64::exp);
    float_fn!(exp_m1, f64::exp_m1);
    float_fn!(sin, f64::sin);
    float_fn!(cos, f64::cos);
    float_fn!(tan, f64::tan);
    float_fn!(asin, f64::asin);
    float_fn!(acos, f64::acos);
    float_fn!(atan, f64::atan);
    float_fn!(sinh, f64::sinh);
    float_fn!(cosh, f64::cosh);
    float_fn!(tanh, f64::tanh);
    float_fn!(deg, f64::to_degrees);
    float_fn!(rad, f64::to_radians);

    // sign, coefficient digits and the exponent of the first digit
    fn layout(&self) -> (&'static str, String, i64, i64) {
        let (int, scale) = self.parts();
        let sign = if int.is_negative() { "-" } else { "" };
        let coeff = int.magnitude().to_string();
        let adjusted = -scale + (coeff.len() as i64 - 1);
        (sign, coeff, scale, adjusted)
    }

    /// Canonical form: plain digits unless the value is very small or has
    /// a negative scale, then `d.dddE±n`
    pub fn to_standard_string(&self) -> String {
        let (sign, coeff, scale, adjusted) = self.layout();
        if scale >= 0 && adjusted >= -6 {
            format!("{}{}", sign, plain_digits(&coeff, scale))
        } else {
            format!("{}{}", sign, exponential_digits(&coeff, adjusted))
        }
    }

    /// No exponent, all fractional digits of the scale
    pub fn to_plain_string(&self) -> String {
        let (sign, coeff, scale, _) = self.layout();
        format!("{}{}", sign, plain_digits(&coeff, scale))
    }

    /// Always `d.dddE±n`
    pub fn to_scientific_string(&self) -> String {
        let (sign, coeff, _, adjusted) = self.layout();
        format!("{}{}", sign, exponential_digits(&coeff, adjusted))
    }

    /// Like the canonical form but the exponent is a multiple of three
    pub fn to_engineering_string(&self) -> String {
        let (sign, coeff, scale, mut adjusted) = self.layout();
        if scale >= 0 && adjusted >= -6 {
            return format!("{}{}", sign, plain_digits(&coeff, scale));
        }

        let mut sig = adjusted.rem_euclid(3);
        adjusted -= sig;
        sig += 1;
        let sig = sig as usize;
        let mut body = if coeff == "0" {
            match sig {
                1 => "0".to_string(),
                2 => {
                    adjusted += 3;
                    "0.00".to_string()
                }
                _ => {
                    adjusted += 3;
                    "0.0".to_string()
                }
            }
        } else if sig >= coeff.len() {
            format!("{}{}", coeff, "0".repeat(sig - coeff.len()))
        } else {
            format!("{}.{}", &coeff[..sig], &coeff[sig..])
        };
        if adjusted != 0 {
            body.push_str(&format!("E{:+}", adjusted));
        }
        format!("{}{}", sign, body)
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::zero()
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::new(BigInt::from(i), 0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_standard_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (int, scale) = self.parts();
        write!(f, "Value({}, scale {})", int, scale)
    }
}

// numeric comparison: 2.50 == 2.5
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.0 == other.0
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Value {
        Value::from_str_decimal(s).unwrap()
    }

    #[test]
    fn test_from_str() {
        assert_eq!(v("12.50").parts(), (BigInt::from(1250), 2));
        assert_eq!(v("-0.5").parts(), (BigInt::from(-5), 1));
        assert_eq!(v("+.5").parts(), (BigInt::from(5), 1));
        assert_eq!(v("7.").parts(), (BigInt::from(7), 0));
        assert_eq!(v("1.5e3").parts(), (BigInt::from(15), -2));
        assert_eq!(v("25E-3").parts(), (BigInt::from(25), 3));
        assert!(Value::from_str_decimal(".").is_err());
        assert!(Value::from_str_decimal("1,000").is_err());
        assert!(Value::from_str_decimal("1.2.3").is_err());
        assert!(Value::from_str_decimal("").is_err());
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Value::from_f64(3.0).unwrap().parts(), (BigInt::from(3), 0));
        assert_eq!(Value::from_f64(0.1).unwrap().parts(), (BigInt::from(1), 1));
        assert_eq!(Value::from_f64(-2.5).unwrap().to_string(), "-2.5");
        assert_eq!(Value::from_f64(1e20).unwrap().parts(), (pow10(20), 0));
        assert!(Value::from_f64(f64::NAN).is_err());
        assert!(Value::from_f64(f64::INFINITY).is_err());
        assert_eq!(v("0.25").to_f64(), Ok(0.25));
    }

    #[test]
    fn test_integer() {
        assert!(v("5").is_integer());
        assert!(!v("5.0").is_integer());
        assert!(v("1e3").is_integer());
        assert_eq!(v("1e3").to_big_int(), BigInt::from(1000));
    }

    #[test]
    fn test_arith() {
        assert_eq!(v("1.5").addition(v("2.25")), Ok(v("3.75")));
        assert_eq!(v("1.5").subtract(v("2.25")), Ok(v("-0.75")));
        assert_eq!(v("1.5").multiply(v("-2")), Ok(v("-3")));
        assert_eq!(v("1.5").multiply(v("2")).unwrap().scale(), 1);
        assert_eq!(v("-3").abs(), Ok(v("3")));
        assert_eq!(v("3").negate(), Ok(v("-3")));
        assert_eq!(v("3").max(v("4")), Ok(v("4")));
        assert_eq!(v("3").min(v("4")), Ok(v("3")));
    }

    #[test]
    fn test_max_min_tie() {
        // equal values: the right operand is kept with its scale
        assert_eq!(v("2.0").max(v("2.00")).unwrap().to_string(), "2.00");
        assert_eq!(v("2.0").min(v("2.00")).unwrap().to_string(), "2.00");
        assert_eq!(v("2.00").max(v("2.0")).unwrap().to_string(), "2.0");
        assert_eq!(v("-1").max(v("-1.0")).unwrap().scale(), 1);
    }

    #[test]
    fn test_div() {
        assert_eq!(v("1").divide(v("4")).unwrap().to_string(), "0.25");
        assert_eq!(v("6").divide(v("2")).unwrap().to_string(), "3");
        assert_eq!(v("10").divide(v("4")).unwrap().to_string(), "2.5");
        assert_eq!(v("6.0").divide(v("2")).unwrap().to_string(), "3.0");
        assert_eq!(v("1").divide(v("3")).unwrap().to_string(), format!("0.{}", "3".repeat(34)));
        assert_eq!(v("2").divide(v("3")).unwrap().to_string(), format!("0.{}7", "6".repeat(33)));
        assert_eq!(v("-1").divide(v("8")).unwrap().to_string(), "-0.125");
        assert_eq!(v("0").divide(v("5")), Ok(Value::zero()));
        assert_eq!(v("2").divide(v("0")), Err(CalcError::DivisionByZero));
        assert_eq!(v("2").divide(v("0.00")), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_remainder() {
        assert_eq!(v("7").remainder(v("3")), Ok(v("1")));
        assert_eq!(v("-7").remainder(v("3")), Ok(v("-1")));
        assert_eq!(v("7.5").remainder(v("2")), Ok(v("1.5")));
        assert_eq!(v("7").remainder(v("0")), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_power() {
        assert_eq!(v("2").power(v("10")), Ok(v("1024")));
        assert_eq!(v("1.5").power(v("2")).unwrap().to_string(), "2.25");
        assert_eq!(v("2").power(v("-2")).unwrap().to_string(), "0.25");
        assert_eq!(v("7").power(v("0")), Ok(v("1")));
        assert_eq!(v("0").power(v("-1")), Err(CalcError::DivisionByZero));
        assert_eq!(v("4").power(v("0.5")), Ok(v("2")));
        assert_eq!(v("10").power(v("10000000")), Err(CalcError::Overflow("pow".to_string())));
        assert_eq!(v("1").power(v("10000000")), Ok(v("1")));
        assert_eq!(v("-1").power(v("10000001")), Ok(v("-1")));
    }

    #[test]
    fn test_power_scale_limit() {
        let overflow = Err(CalcError::Overflow("pow".to_string()));
        assert_eq!(v("0.1").power(v("4000000000")), overflow);
        assert_eq!(v("-0.1").power(v("4000000000")), overflow);
        assert_eq!(v("0.01").power(v("600000")), overflow);
        assert_eq!(v("1e5").power(v("300000")), overflow);
        assert_eq!(v("0.1").power(v("-4000000000")), overflow);
        assert_eq!(v("0.1").power(v("3")).unwrap().parts(), (BigInt::from(1), 3));
        assert_eq!(v("0.1").power(v("1000000")).unwrap().scale(), 1_000_000);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(v("5").fact(), Ok(v("120")));
        assert_eq!(v("0").fact(), Ok(v("1")));
        assert_eq!(v("1").fact(), Ok(v("1")));
        assert_eq!(v("5.0").fact(), Err(CalcError::RequiresInteger));
        assert_eq!(v("-3").fact(), Err(CalcError::InvalidOperand("fact".to_string())));
        assert_eq!(v("1000001").fact(), Err(CalcError::Overflow("fact".to_string())));
    }

    #[test]
    fn test_round() {
        assert_eq!(v("2.5").ceil(), Ok(v("3")));
        assert_eq!(v("2.5").floor(), Ok(v("2")));
        assert_eq!(v("-2.5").ceil(), Ok(v("-2")));
        assert_eq!(v("-2.5").floor(), Ok(v("-3")));
        assert_eq!(v("2.5").ceil().unwrap().scale(), 0);
        assert_eq!(v("1e3").ceil().unwrap().parts(), (BigInt::from(1000), 0));
        assert_eq!(v("2.25").round_to_precision(2, RoundingMode::HalfEven).to_string(), "2.2");
        assert_eq!(v("2.25").round_to_precision(2, RoundingMode::HalfUp).to_string(), "2.3");
        assert_eq!(v("-2.25").round_to_precision(2, RoundingMode::HalfUp).to_string(), "-2.3");
        assert_eq!(v("9.99").round_to_precision(2, RoundingMode::HalfEven).to_string(), "10");
        assert_eq!(v("99.96").round_to_precision(3, RoundingMode::HalfEven).parts(), (BigInt::from(100), 0));
        assert_eq!(v("1.23456").round_to_precision(3, RoundingMode::HalfEven).to_string(), "1.23");
        assert_eq!(v("1.5").round_to_precision(3, RoundingMode::HalfEven).to_string(), "1.5");
        assert_eq!(v("0").round_to_precision(3, RoundingMode::HalfEven).to_string(), "0");
    }

    #[test]
    fn test_transcendental() {
        assert_eq!(v("9").sqrt(), Ok(v("3")));
        assert_eq!(v("27").cbrt(), Ok(v("3")));
        assert_eq!(v("100").log(), Ok(v("2")));
        assert_eq!(v("0").exp(), Ok(v("1")));
        assert_eq!(v("0").sin(), Ok(v("0")));
        assert_eq!(v("3").hypot(v("4")), Ok(v("5")));
        let pi = v("180").rad().unwrap().to_f64().unwrap();
        assert!((pi - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(v("-1").sqrt(), Err(CalcError::NotFinite("sqrt".to_string())));
        assert_eq!(v("0").ln(), Err(CalcError::NotFinite("ln".to_string())));
    }

    #[test]
    fn test_to_str() {
        assert_eq!(v("1234.5").to_standard_string(), "1234.5");
        assert_eq!(v("0.0000001").to_standard_string(), "1E-7");
        assert_eq!(v("0.000001").to_standard_string(), "0.000001");
        assert_eq!(v("-0.00000012").to_standard_string(), "-1.2E-7");
        assert_eq!(v("1.5e3").to_standard_string(), "1.5E+3");
        assert_eq!(v("1.5e3").to_plain_string(), "1500");
        assert_eq!(v("0.0000001").to_plain_string(), "0.0000001");
        assert_eq!(v("1234.5").to_scientific_string(), "1.2345E+3");
        assert_eq!(v("0.25").to_scientific_string(), "2.5E-1");
        assert_eq!(v("5").to_scientific_string(), "5E+0");
        assert_eq!(v("12345e3").to_engineering_string(), "12.345E+6");
        assert_eq!(v("0.0000001").to_engineering_string(), "100E-9");
        assert_eq!(v("1234.5").to_engineering_string(), "1234.5");
        assert_eq!(v("0e2").to_engineering_string(), "0.0E+3");
        assert_eq!(format!("{:?}", v("1.25")), "Value(125, scale 2)");
    }
}
