//! # RPN calculator engine
//!
//! The engine keeps a stack of arbitrary precision decimal numbers and
//! applies operations to it in Reverse Polish Notation: operands first,
//! then the operation. `2 3 +` leaves `5` on the stack.
//!
//! Input is a stream of text tokens. Every token is resolved in the
//! following order:
//! * an operation from the catalog, e.g. `+`, `sqrt`, `dup`
//! * a named constant: `E` and `PI` (case-sensitive)
//! * a decimal numeral: optional sign, digits, at most one decimal point
//!
//! Numbers are exact decimals: addition, subtraction, and multiplication
//! never lose digits, division keeps 34 significant digits. Power with an
//! integer exponent is exact too. Transcendental functions (trigonometry,
//! logarithms, roots) are computed with 64-bit floats, so their results
//! are approximate.
//!
//! The list of supported operations (`x` is the top of the stack, `y`
//! is the element below it):
//! * arithmetic: `+`, `-`, `*`, `/`, `%`, `^` or `pow`, `!` (factorial)
//! * `abs`, `neg`, `ceil`, `floor`, `inv` (1/x), `max`, `min`, `hyp`
//! * roots and exponents: `sqrt`, `cbrt`, `root` (y^(1/x)), `exp` (10^x),
//!   `expn1`, `e` (e^x), `en1` (e^x-1), `ln`, `log`
//! * trigonometric and hyperbolic functions: `sin`, `cos`, `tan`, `asin`,
//!   `acos`, `atan`, `sinh`, `cosh`, `tanh`, `deg`, `rad`
//! * stack: `dup`, `del`, `c` (clear), `swap`, `rot` (third element to the
//!   top)
//! * `rand` - random number in [0, 1)
//! * display modes: `std`, `fix`, `sci`, `eng`
//!
//! ```
//! use rpncalc::Engine;
//!
//! let mut engine = Engine::new();
//! engine.eval("1 4 / 3 *").unwrap();
//! assert_eq!(engine.formatted_entry(0), Some("0.75".to_string()));
//! engine.eval("sci").unwrap();
//! assert_eq!(engine.formatted_entry(0), Some("7.5E-1".to_string()));
//! ```

#[macro_use]
extern crate pest_derive;

pub mod engine;
pub mod errors;
pub mod format;
pub mod ops;
pub mod parse;
pub mod stack;
pub mod value;

pub use crate::engine::Engine;
pub use crate::errors::CalcError;
pub use crate::format::{format_entry, DisplayMode};
pub use crate::ops::Op;
pub use crate::value::{CalcErrorResult, CalcResult, RoundingMode, Value};
