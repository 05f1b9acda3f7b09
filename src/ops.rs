use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

/// Operation identifiers. Comments show the effect, `x` is the top of
/// the stack and `y` the element below it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Abs,     // |x|
    Acos,    // acos(x)
    Add,     // y+x
    Asin,    // asin(x)
    Atan,    // atan(x)
    Cbrt,    // cbrt(x)
    Ceil,    // ceil(x)
    Clear,   // empties the stack
    Cos,     // cos(x)
    Cosh,    // cosh(x)
    Deg,     // radians to degrees
    Delete,  // drops x
    Div,     // y/x
    Dup,     // duplicates x
    E,       // e^x
    En1,     // e^x-1
    Eng,     // engineering display mode
    Exp,     // 10^x
    Expn1,   // push 10, inv, swap, pow
    Fact,    // x!
    Fix,     // fixed-point display mode
    Floor,   // floor(x)
    Hyp,     // hypot(y, x)
    Inv,     // 1/x
    Ln,      // ln(x)
    Log,     // log10(x)
    Max,     // max(y, x)
    Min,     // min(y, x)
    Mod,     // y%x
    Mult,    // y*x
    Neg,     // -x
    Pow,     // y^x
    Rad,     // degrees to radians
    Rand,    // random number in [0, 1)
    Root,    // y^(1/x)
    Rot,     // pulls the third element to the top
    Sci,     // scientific display mode
    Sin,     // sin(x)
    Sinh,    // sinh(x)
    Sqrt,    // sqrt(x)
    Std,     // standard display mode
    Subt,    // y-x
    Swap,    // swaps x and y
    Tan,     // tan(x)
    Tanh,    // tanh(x)
}

/// Token of every operation. A few operations have symbol aliases that
/// are listed in `OPERATIONS` only
static TOKENS: [(Op, &str); 45] = [
    (Op::Abs, "abs"),
    (Op::Acos, "acos"),
    (Op::Add, "+"),
    (Op::Asin, "asin"),
    (Op::Atan, "atan"),
    (Op::Cbrt, "cbrt"),
    (Op::Ceil, "ceil"),
    (Op::Clear, "c"),
    (Op::Cos, "cos"),
    (Op::Cosh, "cosh"),
    (Op::Deg, "deg"),
    (Op::Delete, "del"),
    (Op::Div, "/"),
    (Op::Dup, "dup"),
    (Op::E, "e"),
    (Op::En1, "en1"),
    (Op::Eng, "eng"),
    (Op::Exp, "exp"),
    (Op::Expn1, "expn1"),
    (Op::Fact, "!"),
    (Op::Fix, "fix"),
    (Op::Floor, "floor"),
    (Op::Hyp, "hyp"),
    (Op::Inv, "inv"),
    (Op::Ln, "ln"),
    (Op::Log, "log"),
    (Op::Max, "max"),
    (Op::Min, "min"),
    (Op::Mod, "%"),
    (Op::Mult, "*"),
    (Op::Neg, "neg"),
    (Op::Pow, "^"),
    (Op::Rad, "rad"),
    (Op::Rand, "rand"),
    (Op::Root, "root"),
    (Op::Rot, "rot"),
    (Op::Sci, "sci"),
    (Op::Sin, "sin"),
    (Op::Sinh, "sinh"),
    (Op::Sqrt, "sqrt"),
    (Op::Std, "std"),
    (Op::Subt, "-"),
    (Op::Swap, "swap"),
    (Op::Tan, "tan"),
    (Op::Tanh, "tanh"),
];

lazy_static! {
    /// Operation catalog: input token -> operation
    pub static ref OPERATIONS: HashMap<&'static str, Op> = {
        let mut m: HashMap<&'static str, Op> = TOKENS.iter().map(|(op, tok)| (*tok, *op)).collect();
        m.insert("pow", Op::Pow);
        m
    };
}

impl Op {
    /// Every operation, in catalog order
    pub fn all() -> impl Iterator<Item = Op> {
        TOKENS.iter().map(|(op, _)| *op)
    }

    /// Looks up an operation by its exact token
    pub fn from_token(token: &str) -> Option<Op> {
        OPERATIONS.get(token).copied()
    }

    /// The primary token of the operation
    pub fn token(self) -> &'static str {
        TOKENS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, tok)| *tok)
            .unwrap_or("")
    }

    /// Minimum number of stack elements the operation requires
    pub fn arity(self) -> usize {
        match self {
            Op::Delete | Op::Rand | Op::Std | Op::Fix | Op::Sci | Op::Eng => 0,
            Op::Add
            | Op::Subt
            | Op::Mult
            | Op::Div
            | Op::Mod
            | Op::Pow
            | Op::Hyp
            | Op::Max
            | Op::Min
            | Op::Root
            | Op::Swap => 2,
            Op::Rot => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
