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

//! Property values and literal type inference.

use std::fmt;

/// The three kinds a property value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Bool,
    Number,
    Text,
}

impl ValueKind {
    /// All kinds, in serialization order.
    pub const ALL: [ValueKind; 3] = [ValueKind::Bool, ValueKind::Number, ValueKind::Text];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    /// Boolean value (`true`/`+`, `false`/`-`).
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// Free text.
    Text(String),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The literal text this value is written as, and substituted as when
    /// referenced.
    pub fn to_literal(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for PropertyValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = crate::error::MiniError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use crate::error::MiniError;
        use serde_json::Value as Json;

        match value {
            Json::Bool(b) => Ok(Self::Bool(b)),
            Json::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| MiniError::unsupported_value_kind(format!("number {} is not representable", n))),
            Json::String(s) => Ok(Self::Text(s)),
            Json::Null => Err(MiniError::unsupported_value_kind("null has no property kind")),
            Json::Array(_) => Err(MiniError::unsupported_value_kind("arrays have no property kind")),
            Json::Object(_) => Err(MiniError::unsupported_value_kind("objects have no property kind")),
        }
    }
}

#[cfg(feature = "serde")]
impl From<&PropertyValue> for serde_json::Value {
    fn from(value: &PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(b) => serde_json::Value::Bool(*b),
            PropertyValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropertyValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Infer the typed value of a literal.
///
/// Numeric literals become numbers, `+`/`true` and `-`/`false` become
/// booleans, anything else is kept as trimmed text.
pub fn infer_literal(text: &str) -> PropertyValue {
    let text = text.trim();
    if let Some(n) = parse_number(text) {
        return PropertyValue::Number(n);
    }
    match text {
        "+" | "true" => PropertyValue::Bool(true),
        "-" | "false" => PropertyValue::Bool(false),
        _ => PropertyValue::Text(text.to_string()),
    }
}

/// Parse a numeric literal.
///
/// Accepts `[+-]?(digits[.digits]|.digits)([eE][+-]?digits)?`. Words such as
/// `inf` or `NaN`, which `f64::from_str` would take, are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    if !is_numeric_literal(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_numeric_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Render a number in its shortest round-tripping form (`10`, `2.5`).
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // -0 prints as "-0", which would read back as a negated operand
        return "0".to_string();
    }
    format!("{}", n)
}
