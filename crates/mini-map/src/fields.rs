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

//! Typed access to the properties of one section.

use crate::error::{MapError, MapResult};
use mini_core::{PropertyValue, Section};

/// Conversion from a resolved property value into a field type.
pub trait FromValue: Sized {
    /// Name of the accepted value shape, used in mismatch errors.
    const EXPECTED: &'static str;

    /// Convert, or `None` when the value does not fit.
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_number()
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_number().map(|n| n as f32)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

impl FromValue for PropertyValue {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &PropertyValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// Integral numbers inside `[min, max_exclusive)`.
fn integral(value: &PropertyValue, min: f64, max_exclusive: f64) -> Option<f64> {
    let n = value.as_number()?;
    (n.fract() == 0.0 && n >= min && n < max_exclusive).then_some(n)
}

macro_rules! impl_from_value_int {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_value(value: &PropertyValue) -> Option<Self> {
                    // the exclusive upper bound is a power of two, exact as f64
                    let min = <$ty>::MIN as f64;
                    let max_exclusive = (<$ty>::MAX as f64) + if <$ty>::BITS < 53 { 1.0 } else { 0.0 };
                    integral(value, min, max_exclusive).map(|n| n as $ty)
                }
            }
        )*
    };
}

impl_from_value_int! {
    i32 => "integer (i32)",
    u32 => "integer (u32)",
    i64 => "integer (i64)",
    u64 => "integer (u64)",
    usize => "integer (usize)",
}

/// A field of a mapped record, either required or optional.
///
/// Implemented for every [`FromValue`] type and its `Option`. Records built
/// with [`mini_record!`](crate::mini_record) read each field through this.
pub trait FromField: Sized {
    /// Read the field named `name` from `fields`.
    fn from_field(fields: &Fields<'_>, name: &str) -> MapResult<Self>;
}

macro_rules! impl_from_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn from_field(fields: &Fields<'_>, name: &str) -> MapResult<Self> {
                    fields.require(name)
                }
            }

            impl FromField for Option<$ty> {
                fn from_field(fields: &Fields<'_>, name: &str) -> MapResult<Self> {
                    fields.optional(name)
                }
            }
        )*
    };
}

impl_from_field!(bool, f64, f32, i32, u32, i64, u64, usize, String, PropertyValue);

/// Borrowed view of a section for record construction.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    section: &'a Section,
}

impl<'a> Fields<'a> {
    /// Wrap a resolved section.
    pub fn new(section: &'a Section) -> Self {
        Self { section }
    }

    /// Name of the section being mapped.
    pub fn section_name(&self) -> &'a str {
        self.section.name()
    }

    /// The underlying section.
    pub fn section(&self) -> &'a Section {
        self.section
    }

    /// Read a property that must exist and fit `T`.
    pub fn require<T: FromValue>(&self, name: &str) -> MapResult<T> {
        self.optional(name)?.ok_or_else(|| MapError::FieldNotFound {
            section: self.section.name().to_string(),
            field: name.to_string(),
        })
    }

    /// Read a property that may be absent. A present value of the wrong kind
    /// is still an error.
    pub fn optional<T: FromValue>(&self, name: &str) -> MapResult<Option<T>> {
        let Some(value) = self.section.value(name) else {
            return Ok(None);
        };
        T::from_value(value).map(Some).ok_or_else(|| MapError::KindMismatch {
            section: self.section.name().to_string(),
            field: name.to_string(),
            expected: T::EXPECTED,
            found: describe(value),
        })
    }
}

fn describe(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Text(_) => "text".to_string(),
        other => format!("{} {}", other.kind().name(), other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_core::parse;

    fn sample() -> Section {
        let doc = parse(
            "[S]\nflag = true\nhp = 12\nratio = 0.5\nneg = -3\nbig = 1e20\nname = Rex\n",
        )
        .unwrap();
        doc.section("S").unwrap().clone()
    }

    // ==================== FromValue tests ====================

    #[test]
    fn test_scalars() {
        let s = sample();
        let f = Fields::new(&s);
        assert!(f.require::<bool>("flag").unwrap());
        assert_eq!(f.require::<f64>("ratio").unwrap(), 0.5);
        assert_eq!(f.require::<f32>("ratio").unwrap(), 0.5);
        assert_eq!(f.require::<String>("name").unwrap(), "Rex");
        assert_eq!(
            f.require::<PropertyValue>("name").unwrap(),
            PropertyValue::Text("Rex".into())
        );
    }

    #[test]
    fn test_integers_must_be_integral() {
        let s = sample();
        let f = Fields::new(&s);
        assert_eq!(f.require::<i32>("hp").unwrap(), 12);
        assert_eq!(f.require::<u64>("hp").unwrap(), 12);
        assert_eq!(f.require::<i64>("neg").unwrap(), -3);
        assert!(matches!(
            f.require::<i32>("ratio"),
            Err(MapError::KindMismatch { expected: "integer (i32)", .. })
        ));
    }

    #[test]
    fn test_integers_must_be_in_range() {
        let s = sample();
        let f = Fields::new(&s);
        assert!(f.require::<u32>("neg").is_err());
        assert!(f.require::<usize>("neg").is_err());
        assert!(f.require::<i32>("big").is_err());
        assert!(f.require::<i64>("big").is_err());
        assert!(f.require::<u64>("big").is_err());
    }

    #[test]
    fn test_integer_bounds() {
        let max = PropertyValue::Number(u32::MAX as f64);
        let over = PropertyValue::Number(u32::MAX as f64 + 1.0);
        assert_eq!(u32::from_value(&max), Some(u32::MAX));
        assert_eq!(u32::from_value(&over), None);
        let min = PropertyValue::Number(i64::MIN as f64);
        let top = PropertyValue::Number(i64::MAX as f64);
        assert_eq!(i64::from_value(&min), Some(i64::MIN));
        assert_eq!(i64::from_value(&top), None);
    }

    // ==================== Fields tests ====================

    #[test]
    fn test_require_missing_field() {
        let s = sample();
        let err = Fields::new(&s).require::<f64>("mana").unwrap_err();
        match err {
            MapError::FieldNotFound { section, field } => {
                assert_eq!(section, "S");
                assert_eq!(field, "mana");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_optional_missing_is_none() {
        let s = sample();
        assert_eq!(Fields::new(&s).optional::<f64>("mana").unwrap(), None);
    }

    #[test]
    fn test_optional_wrong_kind_is_error() {
        let s = sample();
        let err = Fields::new(&s).optional::<bool>("name").unwrap_err();
        match err {
            MapError::KindMismatch { expected, found, .. } => {
                assert_eq!(expected, "boolean");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_describes_found_value() {
        let s = sample();
        let err = Fields::new(&s).require::<String>("hp").unwrap_err();
        assert_eq!(err.to_string(), "property 'S.hp' is number 12, expected text");
    }

    #[test]
    fn test_from_field_option() {
        let s = sample();
        let f = Fields::new(&s);
        assert_eq!(<Option<i32>>::from_field(&f, "hp").unwrap(), Some(12));
        assert_eq!(<Option<i32>>::from_field(&f, "mana").unwrap(), None);
        assert!(<i32>::from_field(&f, "mana").is_err());
    }
}
