use pest::Parser;
use std::collections::HashMap;
use std::f64::consts::{E, PI};

use lazy_static::lazy_static;
use log::debug;
use num_bigint::BigInt;

use crate::engine::Engine;
use crate::errors::*;
use crate::ops::{Op, OPERATIONS};
use crate::value::*;

#[derive(Parser)]
#[grammar = "token.pest"]
pub struct TokenParser;

// typing one of these right after a number applies it at once: "12+"
const KEY_OPS: &str = "+-*/!^%";

lazy_static! {
    /// Named constants. Names are case-sensitive: `E` is a constant
    /// while `e` is the e^x operation
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("E", E);
        m.insert("PI", PI);
        m
    };
}

/// Returns a constant value by its name
pub fn constant(name: &str) -> Option<CalcResult> {
    CONSTANTS.get(name).map(|c| Value::from_f64(*c))
}

/// Parses a decimal numeral: optional sign, digits, at most one decimal
/// point. Exponents and digit separators are rejected
pub fn parse_numeral(token: &str) -> CalcResult {
    let invalid = || CalcError::InvalidNumber(token.to_string());
    let pairs = TokenParser::parse(Rule::numeral, token).map_err(|_| invalid())?;

    let mut negative = false;
    let mut digits = String::new();
    let mut scale = 0i64;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::sign => negative = pair.as_str() == "-",
            Rule::whole => digits.push_str(pair.as_str()),
            Rule::fraction => {
                digits.push_str(pair.as_str());
                scale = pair.as_str().len() as i64;
            }
            _ => {}
        }
    }

    let mut int = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    if negative {
        int = -int;
    }
    Ok(Value::new(int, scale))
}

fn is_known(token: &str) -> bool {
    OPERATIONS.contains_key(token) || CONSTANTS.contains_key(token)
}

// "12+" -> ("12", "+")
fn split_trailing_op(token: &str) -> Option<(&str, &str)> {
    if is_known(token) {
        return None;
    }
    let last = token.chars().last()?;
    if !KEY_OPS.contains(last) {
        return None;
    }
    let pos = token.len() - last.len_utf8();
    if pos == 0 {
        return None;
    }
    Some(token.split_at(pos))
}

impl Engine {
    /// Resolves a token and applies it: an operation first, then a
    /// named constant, then a decimal numeral
    pub fn push_token(&mut self, token: &str) -> CalcErrorResult {
        if let Some(op) = Op::from_token(token) {
            self.apply(op)?;
            return Ok(());
        }
        if let Some(c) = constant(token) {
            debug!("constant '{}'", token);
            self.push_value(c?);
            return Ok(());
        }
        let v = parse_numeral(token)?;
        debug!("number {}", v);
        self.push_value(v);
        Ok(())
    }

    /// Input line entry: blank text duplicates the top of the stack,
    /// anything else is a single token
    pub fn enter(&mut self, text: &str) -> CalcErrorResult {
        let text = text.trim();
        if text.is_empty() {
            self.apply(Op::Dup)?;
            return Ok(());
        }
        self.push_token(text)
    }

    /// Applies whitespace separated tokens from left to right. Stops at
    /// the first failing token, the tokens before it stay applied.
    /// A trailing operation key is applied even when the text before it
    /// fails: `abc+` reports `abc` but still adds the two values below
    pub fn eval(&mut self, line: &str) -> CalcErrorResult {
        for token in line.split_whitespace() {
            match split_trailing_op(token) {
                Some((value, op)) => {
                    let pushed = self.push_token(value);
                    let applied = self.push_token(op);
                    pushed.and(applied)?;
                }
                None => self.push_token(token)?,
            }
        }
        Ok(())
    }
}
