use crate::errors::*;
use crate::value::*;

/// Operand stack. Index 0 is the bottom, the last element is the top
/// (the "x" register).
///
/// Every access that needs elements checks the height first and fails
/// with `StackUnderflow` instead of panicking.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Fails if the stack holds fewer than `arity` elements
    pub fn require(&self, arity: usize) -> CalcErrorResult {
        if self.values.len() < arity {
            return Err(CalcError::StackUnderflow);
        }
        Ok(())
    }

    pub fn push(&mut self, v: Value) {
        self.values.push(v);
    }

    pub fn pop(&mut self) -> CalcResult {
        self.values.pop().ok_or(CalcError::StackUnderflow)
    }

    pub fn peek(&self) -> CalcResult {
        self.values.last().cloned().ok_or(CalcError::StackUnderflow)
    }

    pub fn height(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn entry_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Removes the element `depth` positions below the top (0 is the top)
    pub fn remove_at_depth(&mut self, depth: usize) -> CalcResult {
        self.require(depth + 1)?;
        let idx = self.values.len() - 1 - depth;
        Ok(self.values.remove(idx))
    }

    /// Exchanges the top with the element `depth` positions below it
    pub fn swap_top_with(&mut self, depth: usize) -> CalcErrorResult {
        self.require(depth + 1)?;
        let top = self.values.len() - 1;
        self.values.swap(top, top - depth);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}
