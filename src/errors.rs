use std::fmt;

#[derive(Clone, PartialEq)]
pub enum CalcError {
    StackUnderflow,
    DivisionByZero,
    RequiresInteger,
    InvalidNumber(String),
    UnknownOperation(String),

    InvalidOperand(String),
    Overflow(String),
    NotFinite(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::StackUnderflow => write!(f, "Too few elements on stack"),
            CalcError::DivisionByZero => write!(f, "Division by zero"),
            CalcError::RequiresInteger => write!(f, "Last element must be an integer for this operation"),
            CalcError::InvalidNumber(s) => write!(f, "'{}' is not a valid value", s),
            CalcError::UnknownOperation(s) => write!(f, "Unknown operation '{}'", s),

            CalcError::InvalidOperand(s) => write!(f, "Function '{}' is not supported for negative integers", s),
            CalcError::Overflow(s) => write!(f, "Numeric overflow in '{}'", s),
            CalcError::NotFinite(s) => write!(f, "Result of '{}' is not a finite number", s),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::StackUnderflow => write!(f, "StackUnderflow"),
            CalcError::DivisionByZero => write!(f, "DivisionByZero"),
            CalcError::RequiresInteger => write!(f, "RequiresInteger"),
            CalcError::InvalidNumber(s) => write!(f, "InvalidNumber({:?})", s),
            CalcError::UnknownOperation(s) => write!(f, "UnknownOperation({:?})", s),
            CalcError::InvalidOperand(s) => write!(f, "InvalidOperand({:?})", s),
            CalcError::Overflow(s) => write!(f, "Overflow({:?})", s),
            CalcError::NotFinite(s) => write!(f, "NotFinite({:?})", s),
        }
    }
}

impl std::error::Error for CalcError {}
