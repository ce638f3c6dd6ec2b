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

//! Declarative record definitions.

/// Declare a struct and implement [`FromSection`](crate::FromSection) for it.
///
/// Each field is read from the property with the same name. Fields typed
/// `Option<T>` are optional; every other field is required.
///
/// # Usage
/// ```
/// use mini_map::{from_document, mini_record};
///
/// mini_record! {
///     #[derive(Debug)]
///     pub struct Unit {
///         pub hp: f64,
///         pub name: String,
///         pub armor: Option<u32>,
///     }
/// }
///
/// let doc = mini_core::parse("[Base]\nhp = 10\nname = $this\n[Orc] : Base\n").unwrap();
/// let orc: Unit = from_document(&doc, "Orc").unwrap();
/// assert_eq!(orc.name, "Orc");
/// assert_eq!(orc.armor, None);
/// ```
#[macro_export]
macro_rules! mini_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::FromSection for $name {
            fn from_section(fields: &$crate::Fields<'_>) -> $crate::MapResult<Self> {
                Ok(Self {
                    $(
                        $field: <$ty as $crate::FromField>::from_field(fields, stringify!($field))?,
                    )*
                })
            }
        }
    };
}
