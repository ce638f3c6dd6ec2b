// MINI - Sectioned documents with inheritance and derived values
//
// Copyright (c) 2025 The MINI contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Left-to-right expression evaluator.
//!
//! Expressions have no operator precedence. Parenthesized groups are reduced
//! first, then the leftmost operator is applied repeatedly until none is
//! left:
//!
//! - `a + b`, `a - b`, `a * b`, `a / b`, `a ^ b` on two numbers is arithmetic
//! - `a + b` on text concatenates, `a - b` removes the first `b` from `a`
//! - a run of `+` or `-` is a unary marker: `ab++` gives `abbb`, `abcd--`
//!   gives `ab`, `++ab` gives `aaab`, `--abcd` gives `cd`
//!
//! A `+` or `-` that starts a number (`-3`, `2 * -1`, `1e-5`) is a sign, not
//! an operator. Operands are delimited by spaces and operators.
//!
//! # Examples
//!
//! ```
//! use mini_core::expression::evaluate;
//!
//! assert_eq!(evaluate("1 + 2 * 3").unwrap(), "9");
//! assert_eq!(evaluate("1 + (2 * 3)").unwrap(), "7");
//! assert_eq!(evaluate("fire + ball").unwrap(), "fireball");
//! ```

use crate::error::{MiniError, MiniResult};
use crate::value::{format_number, parse_number};

/// Maximum nesting depth of parenthesized groups.
pub const MAX_GROUP_DEPTH: usize = 64;

const OPERATORS: &[u8] = b"+-*/^";

/// Reduce an expression to its literal result.
pub fn evaluate(input: &str) -> MiniResult<String> {
    evaluate_group(input, 0)
}

fn evaluate_group(input: &str, depth: usize) -> MiniResult<String> {
    if depth > MAX_GROUP_DEPTH {
        return Err(MiniError::malformed(format!(
            "parentheses nested deeper than {}",
            MAX_GROUP_DEPTH
        )));
    }

    let mut text = input.to_string();
    while let Some(open) = text.find('(') {
        let close = matching_paren(&text, open)?;
        let inner = evaluate_group(&text[open + 1..close], depth + 1)?;
        text.replace_range(open..=close, &inner);
    }
    if text.contains(')') {
        return Err(MiniError::malformed(format!("unbalanced ')' in '{}'", input)));
    }

    reduce(&text)
}

fn matching_paren(text: &str, open: usize) -> MiniResult<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(MiniError::malformed(format!("unbalanced '(' in '{}'", text)))
}

fn reduce(input: &str) -> MiniResult<String> {
    let mut text = input.trim().to_string();
    // bare boolean shorthands are literals, not dangling operators
    if text == "+" || text == "-" {
        return Ok(text);
    }

    let mut budget = text.len() * 4 + 16;
    while let Some(at) = find_operator(text.as_bytes()) {
        if budget == 0 {
            return Err(MiniError::malformed(format!("'{}' does not reduce", input.trim())));
        }
        budget -= 1;
        text = apply_operator(&text, at)?.trim().to_string();
    }
    Ok(text)
}

fn is_operator(b: u8) -> bool {
    OPERATORS.contains(&b)
}

/// A `+`/`-` directly followed by a digit or `.` that starts an operand, or
/// an exponent sign in `<digit>e-5`.
fn is_sign(bytes: &[u8], i: usize) -> bool {
    if !matches!(bytes[i], b'+' | b'-') {
        return false;
    }
    if !bytes
        .get(i + 1)
        .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
    {
        return false;
    }
    if i == 0 {
        return true;
    }
    let prev = bytes[i - 1];
    if prev == b' ' || is_operator(prev) {
        return true;
    }
    matches!(prev, b'e' | b'E') && i >= 2 && bytes[i - 2].is_ascii_digit()
}

fn is_boundary(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b' ' || (is_operator(bytes[i]) && !is_sign(bytes, i))
}

fn find_operator(bytes: &[u8]) -> Option<usize> {
    (0..bytes.len()).find(|&i| is_operator(bytes[i]) && !is_sign(bytes, i))
}

/// Start of the operand ending at `end`.
fn operand_start(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && !is_boundary(bytes, start - 1) {
        start -= 1;
    }
    start
}

/// End of the operand beginning at `start`.
fn operand_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && !is_boundary(bytes, end) {
        end += 1;
    }
    end
}

fn apply_operator(text: &str, at: usize) -> MiniResult<String> {
    let bytes = text.as_bytes();
    let op = bytes[at];
    let mut run_end = at;
    while run_end < bytes.len() && bytes[run_end] == op {
        run_end += 1;
    }

    if run_end - at >= 2 {
        apply_unary(text, at, run_end)
    } else {
        apply_binary(text, at)
    }
}

fn apply_unary(text: &str, at: usize, run_end: usize) -> MiniResult<String> {
    let bytes = text.as_bytes();
    let op = bytes[at] as char;
    let run = run_end - at;
    if op != '+' && op != '-' {
        return Err(MiniError::malformed(format!(
            "'{}' cannot be repeated; only '+' and '-' have unary forms",
            op
        )));
    }

    let postfix = run_end == bytes.len() || bytes[run_end] == b' ' || is_operator(bytes[run_end]);
    if postfix {
        let start = operand_start(bytes, at);
        let operand = &text[start..at];
        let last = operand
            .chars()
            .last()
            .ok_or_else(|| MiniError::malformed(format!("'{}' has no operand", &text[at..run_end])))?;
        let replaced = if op == '+' {
            format!("{}{}", operand, last.to_string().repeat(run))
        } else {
            let keep = operand
                .char_indices()
                .rev()
                .nth(run - 1)
                .map_or(0, |(i, _)| i);
            operand[..keep].to_string()
        };
        Ok(format!("{}{}{}", &text[..start], replaced, &text[run_end..]))
    } else {
        let end = operand_end(bytes, run_end);
        let operand = &text[run_end..end];
        let first = operand
            .chars()
            .next()
            .ok_or_else(|| MiniError::malformed(format!("'{}' has no operand", &text[at..run_end])))?;
        let replaced = if op == '+' {
            format!("{}{}", first.to_string().repeat(run), operand)
        } else {
            let skip = operand
                .char_indices()
                .nth(run)
                .map_or(operand.len(), |(i, _)| i);
            operand[skip..].to_string()
        };
        Ok(format!("{}{}{}", &text[..at], replaced, &text[end..]))
    }
}

fn apply_binary(text: &str, at: usize) -> MiniResult<String> {
    let bytes = text.as_bytes();
    let op = bytes[at] as char;

    let mut left_end = at;
    while left_end > 0 && bytes[left_end - 1] == b' ' {
        left_end -= 1;
    }
    let left_start = operand_start(bytes, left_end);

    let mut right_start = at + 1;
    while right_start < bytes.len() && bytes[right_start] == b' ' {
        right_start += 1;
    }
    let right_end = operand_end(bytes, right_start);

    let left = &text[left_start..left_end];
    let right = &text[right_start..right_end];
    if left.is_empty() {
        return Err(MiniError::malformed(format!("'{}' has no left operand", op)));
    }
    if right.is_empty() {
        return Err(MiniError::malformed(format!("'{}' has no right operand", op)));
    }

    let result = match (parse_number(left), parse_number(right)) {
        (Some(a), Some(b)) => arithmetic(a, op, b)?,
        _ => concatenate(left, op, right)?,
    };
    Ok(format!("{}{}{}", &text[..left_start], result, &text[right_end..]))
}

fn arithmetic(a: f64, op: char, b: f64) -> MiniResult<String> {
    let result = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => {
            if b == 0.0 {
                return Err(MiniError::malformed(format!("division by zero in '{} / {}'", a, b)));
            }
            a / b
        }
        _ => a.powf(b),
    };
    if !result.is_finite() {
        return Err(MiniError::malformed(format!(
            "'{} {} {}' has no finite result",
            format_number(a),
            op,
            format_number(b)
        )));
    }
    Ok(format_number(result))
}

fn concatenate(left: &str, op: char, right: &str) -> MiniResult<String> {
    match op {
        '+' => Ok(format!("{}{}", left, right)),
        '-' => Ok(left.replacen(right, "", 1)),
        _ => Err(MiniError::malformed(format!(
            "'{}' needs numeric operands, got '{}' and '{}'",
            op, left, right
        ))),
    }
}
