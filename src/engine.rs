use std::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::errors::*;
use crate::format::{format_entry, DisplayMode};
use crate::ops::Op;
use crate::stack::Stack;
use crate::value::*;

// Primitive operations are atomic: the result is computed before the
// operands leave the stack, so a failure keeps the stack as it was.
macro_rules! one_arg_op {
    ($name:ident, $id:ident) => {
        fn $name(&mut self) -> CalcErrorResult {
            let x = self.stack.peek()?;
            let v = x.$id()?;
            self.stack.pop()?;
            self.stack.push(v);
            Ok(())
        }
    };
}

macro_rules! two_arg_op {
    ($name:ident, $id:ident) => {
        fn $name(&mut self) -> CalcErrorResult {
            self.stack.require(2)?;
            let x = self.stack.pop()?;
            let y = self.stack.pop()?;
            match y.clone().$id(x.clone()) {
                Ok(v) => {
                    self.stack.push(v);
                    Ok(())
                }
                Err(e) => {
                    self.stack.push(y);
                    self.stack.push(x);
                    Err(e)
                }
            }
        }
    };
}

/// RPN calculator engine: the operand stack and the display mode.
///
/// The engine is not synchronized. A caller must not run operations
/// from several threads at the same time on one engine.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    stack: Stack,
    mode: DisplayMode,
}

impl Engine {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Pushes a value without any token resolution
    pub fn push_value(&mut self, v: Value) {
        self.stack.push(v);
    }

    pub fn pop(&mut self) -> CalcResult {
        self.stack.pop()
    }

    pub fn peek(&self) -> CalcResult {
        self.stack.peek()
    }

    pub fn stack_height(&self) -> usize {
        self.stack.height()
    }

    /// Formats the entry at `index` (0 is the bottom) with the current
    /// display mode
    pub fn formatted_entry(&self, index: usize) -> Option<String> {
        self.stack.entry_at(index).map(|v| format_entry(v, self.mode))
    }

    /// One line per entry, bottom first, each numbered by its depth
    /// (the top is 1) and printed unrounded: `"2: 1.5\n1: 3\n"`
    pub fn stack_snapshot_text(&self) -> String {
        let height = self.stack.height();
        self.stack
            .iter()
            .enumerate()
            .map(|(idx, v)| format!("{}: {}\n", height - idx, v))
            .collect()
    }

    /// Runs an operation by its catalog name
    pub fn execute(&mut self, name: &str) -> Result<bool, CalcError> {
        match Op::from_token(name) {
            Some(op) => self.apply(op),
            None => Err(CalcError::UnknownOperation(name.to_string())),
        }
    }

    /// Runs an operation. Returns `false` only when the operation had
    /// nothing to do (`del` on an empty stack)
    pub fn apply(&mut self, op: Op) -> Result<bool, CalcError> {
        debug!("apply '{}', stack height {}", op, self.stack.height());
        let res = self.process_operation(op);
        if let Err(ref e) = res {
            warn!("operation '{}' failed: {}", op, e);
        }
        res
    }

    fn process_operation(&mut self, op: Op) -> Result<bool, CalcError> {
        self.stack.require(op.arity())?;
        match op {
            Op::Delete => return Ok(self.stack.pop().is_ok()),
            Op::Std => self.set_mode(DisplayMode::Standard),
            Op::Fix => self.set_mode(DisplayMode::Fixed),
            Op::Sci => self.set_mode(DisplayMode::Scientific),
            Op::Eng => self.set_mode(DisplayMode::Engineering),

            Op::Clear => self.stack.clear(),
            Op::Dup => {
                let x = self.stack.peek()?;
                self.stack.push(x);
            }
            Op::Swap => self.stack.swap_top_with(1)?,
            Op::Rot => {
                let w = self.stack.remove_at_depth(2)?;
                self.stack.push(w);
            }
            Op::Rand => {
                let r: f64 = rand::thread_rng().gen();
                self.stack.push(Value::from_float(r, "rand")?);
            }

            Op::Add => self.addition()?,
            Op::Subt => self.subtract()?,
            Op::Mult => self.multiply()?,
            Op::Div => self.divide()?,
            Op::Mod => self.remainder()?,
            Op::Pow => self.power()?,
            Op::Hyp => self.hypot()?,
            Op::Max => self.max()?,
            Op::Min => self.min()?,

            Op::Abs => self.abs()?,
            Op::Neg => self.negate()?,
            Op::Ceil => self.ceil()?,
            Op::Floor => self.floor()?,
            Op::Fact => self.fact()?,
            Op::Sqrt => self.sqrt()?,
            Op::Cbrt => self.cbrt()?,
            Op::Ln => self.ln()?,
            Op::Log => self.log()?,
            Op::E => self.exp()?,
            Op::En1 => self.exp_m1()?,
            Op::Sin => self.sin()?,
            Op::Cos => self.cos()?,
            Op::Tan => self.tan()?,
            Op::Asin => self.asin()?,
            Op::Acos => self.acos()?,
            Op::Atan => self.atan()?,
            Op::Sinh => self.sinh()?,
            Op::Cosh => self.cosh()?,
            Op::Tanh => self.tanh()?,
            Op::Deg => self.deg()?,
            Op::Rad => self.rad()?,

            Op::Exp => self.exp10()?,
            Op::Expn1 => self.exp10_inv()?,
            Op::Inv => self.inverse()?,
            Op::Root => self.root()?,
        }
        Ok(true)
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        debug!("display mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    two_arg_op!(addition, addition);
    two_arg_op!(subtract, subtract);
    two_arg_op!(multiply, multiply);
    two_arg_op!(divide, divide);
    two_arg_op!(remainder, remainder);
    two_arg_op!(power, power);
    two_arg_op!(hypot, hypot);
    two_arg_op!(max, max);
    two_arg_op!(min, min);

    one_arg_op!(abs, abs);
    one_arg_op!(negate, negate);
    one_arg_op!(ceil, ceil);
    one_arg_op!(floor, floor);
    one_arg_op!(fact, fact);
    one_arg_op!(sqrt, sqrt);
    one_arg_op!(cbrt, cbrt);
    one_arg_op!(ln, ln);
    one_arg_op!(log, log);
    one_arg_op!(exp, exp);
    one_arg_op!(exp_m1, exp_m1);
    one_arg_op!(sin, sin);
    one_arg_op!(cos, cos);
    one_arg_op!(tan, tan);
    one_arg_op!(asin, asin);
    one_arg_op!(acos, acos);
    one_arg_op!(atan, atan);
    one_arg_op!(sinh, sinh);
    one_arg_op!(cosh, cosh);
    one_arg_op!(tanh, tanh);
    one_arg_op!(deg, deg);
    one_arg_op!(rad, rad);

    // Composite operations run their steps one by one. A failing step
    // leaves the changes of the previous steps on the stack.

    // 10^x
    fn exp10(&mut self) -> CalcErrorResult {
        self.stack.push(Value::from(10i64));
        self.stack.swap_top_with(1)?;
        self.apply(Op::Pow)?;
        Ok(())
    }

    // push 10, 1/10, swap, pow
    fn exp10_inv(&mut self) -> CalcErrorResult {
        self.stack.push(Value::from(10i64));
        self.apply(Op::Inv)?;
        self.stack.swap_top_with(1)?;
        self.apply(Op::Pow)?;
        Ok(())
    }

    // 1/x
    fn inverse(&mut self) -> CalcErrorResult {
        self.stack.push(Value::from(1i64));
        self.stack.swap_top_with(1)?;
        self.apply(Op::Div)?;
        Ok(())
    }

    // y^(1/x)
    fn root(&mut self) -> CalcErrorResult {
        self.apply(Op::Inv)?;
        self.apply(Op::Pow)?;
        Ok(())
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stack_snapshot_text())
    }
}
