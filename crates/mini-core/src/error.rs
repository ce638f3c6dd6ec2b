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

//! Error types for loading, resolving and saving MINI documents.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiniErrorKind {
    /// The document's source file does not exist.
    SourceNotFound,
    /// A value of a kind other than boolean, number or text was supplied.
    UnsupportedValueKind,
    /// A key was declared twice in one section without overwrite permission.
    DuplicateKey,
    /// Two sections share a name.
    DuplicateSectionName,
    /// A parent is missing or the inheritance graph has a cycle.
    UnresolvableInheritance,
    /// A `$` reference names a missing section or property.
    UnknownReference,
    /// An operation named a section the document does not have.
    UnknownSection,
    /// An expression could not be evaluated.
    MalformedExpression,
    /// A save target already exists and overwriting was not allowed.
    DestinationExists,
    /// Line-level structural violation.
    Syntax,
    /// A resource limit was exceeded.
    LimitExceeded,
    /// I/O failure while reading or writing a document.
    Io,
}

impl fmt::Display for MiniErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound => write!(f, "SourceNotFound"),
            Self::UnsupportedValueKind => write!(f, "UnsupportedValueKind"),
            Self::DuplicateKey => write!(f, "DuplicateKey"),
            Self::DuplicateSectionName => write!(f, "DuplicateSectionName"),
            Self::UnresolvableInheritance => write!(f, "UnresolvableInheritance"),
            Self::UnknownReference => write!(f, "UnknownReference"),
            Self::UnknownSection => write!(f, "UnknownSection"),
            Self::MalformedExpression => write!(f, "MalformedExpression"),
            Self::DestinationExists => write!(f, "DestinationExists"),
            Self::Syntax => write!(f, "SyntaxError"),
            Self::LimitExceeded => write!(f, "LimitExceeded"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// Where in a document an error was raised.
///
/// Every part is optional; errors raised while evaluating a detached
/// expression carry none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Source file, when the document came from disk.
    pub path: Option<PathBuf>,
    /// Line number (1-based).
    pub line: Option<usize>,
    /// Section being built or accessed.
    pub section: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, "{}:{}", path.display(), line)?,
            (Some(path), None) => write!(f, "{}", path.display())?,
            (None, Some(line)) => write!(f, "line {}", line)?,
            (None, None) => write!(f, "<input>")?,
        }
        if let Some(section) = &self.section {
            write!(f, " [{}]", section)?;
        }
        Ok(())
    }
}

/// An error raised by the document engine.
#[derive(Debug, Clone, Error)]
#[error("{kind} at {location}: {message}")]
pub struct MiniError {
    /// The kind of error.
    pub kind: MiniErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Where the error happened.
    pub location: Location,
}

impl MiniError {
    /// Create a new error with an empty location.
    pub fn new(kind: MiniErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: Location::default(),
        }
    }

    /// Attach a line number unless one is already set.
    pub fn with_line(mut self, line: usize) -> Self {
        self.location.line.get_or_insert(line);
        self
    }

    /// Attach the source path unless one is already set.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        if self.location.path.is_none() {
            self.location.path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Attach the section name unless one is already set.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        if self.location.section.is_none() {
            self.location.section = Some(section.into());
        }
        self
    }

    // Convenience constructors for each error kind
    pub fn source_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(MiniErrorKind::SourceNotFound, "source file does not exist").with_path(path)
    }

    pub fn unsupported_value_kind(message: impl Into<String>) -> Self {
        Self::new(MiniErrorKind::UnsupportedValueKind, message)
    }

    pub fn duplicate_key(key: &str) -> Self {
        Self::new(
            MiniErrorKind::DuplicateKey,
            format!("key '{}' is declared more than once", key),
        )
    }

    pub fn duplicate_section(name: &str) -> Self {
        Self::new(
            MiniErrorKind::DuplicateSectionName,
            format!("section '{}' is declared more than once", name),
        )
    }

    pub fn unresolvable(message: impl Into<String>) -> Self {
        Self::new(MiniErrorKind::UnresolvableInheritance, message)
    }

    pub fn unknown_reference(message: impl Into<String>) -> Self {
        Self::new(MiniErrorKind::UnknownReference, message)
    }

    pub fn unknown_section(name: &str) -> Self {
        Self::new(
            MiniErrorKind::UnknownSection,
            format!("document has no section '{}'", name),
        )
        .with_section(name)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(MiniErrorKind::MalformedExpression, message)
    }

    pub fn destination_exists(path: impl AsRef<Path>) -> Self {
        Self::new(MiniErrorKind::DestinationExists, "destination already exists").with_path(path)
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(MiniErrorKind::Syntax, message).with_line(line)
    }

    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(MiniErrorKind::LimitExceeded, message)
    }

    pub fn io(err: &std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::new(MiniErrorKind::Io, err.to_string()).with_path(path)
    }
}

/// Result type for MINI operations.
pub type MiniResult<T> = Result<T, MiniError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== MiniErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display_spec_names() {
        assert_eq!(MiniErrorKind::SourceNotFound.to_string(), "SourceNotFound");
        assert_eq!(MiniErrorKind::DuplicateKey.to_string(), "DuplicateKey");
        assert_eq!(
            MiniErrorKind::UnresolvableInheritance.to_string(),
            "UnresolvableInheritance"
        );
        assert_eq!(MiniErrorKind::UnknownReference.to_string(), "UnknownReference");
        assert_eq!(
            MiniErrorKind::MalformedExpression.to_string(),
            "MalformedExpression"
        );
        assert_eq!(MiniErrorKind::DestinationExists.to_string(), "DestinationExists");
    }

    #[test]
    fn test_error_kind_display_ambient() {
        assert_eq!(MiniErrorKind::Syntax.to_string(), "SyntaxError");
        assert_eq!(MiniErrorKind::Io.to_string(), "IOError");
        assert_eq!(MiniErrorKind::LimitExceeded.to_string(), "LimitExceeded");
        assert_eq!(MiniErrorKind::UnknownSection.to_string(), "UnknownSection");
    }

    // ==================== Location tests ====================

    #[test]
    fn test_location_display_empty() {
        assert_eq!(Location::default().to_string(), "<input>");
    }

    #[test]
    fn test_location_display_line_and_section() {
        let loc = Location {
            path: None,
            line: Some(4),
            section: Some("Mage".to_string()),
        };
        assert_eq!(loc.to_string(), "line 4 [Mage]");
    }

    #[test]
    fn test_location_display_path_and_line() {
        let loc = Location {
            path: Some(PathBuf::from("input.mini")),
            line: Some(12),
            section: None,
        };
        assert_eq!(loc.to_string(), "input.mini:12");
    }

    // ==================== MiniError tests ====================

    #[test]
    fn test_error_display() {
        let err = MiniError::syntax("missing ']'", 3);
        let msg = err.to_string();
        assert!(msg.contains("SyntaxError"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("missing ']'"));
    }

    #[test]
    fn test_context_is_not_overwritten() {
        let err = MiniError::duplicate_key("hp")
            .with_line(2)
            .with_section("Base")
            .with_line(9)
            .with_section("Other");
        assert_eq!(err.location.line, Some(2));
        assert_eq!(err.location.section.as_deref(), Some("Base"));
    }

    #[test]
    fn test_source_not_found_carries_path() {
        let err = MiniError::source_not_found("missing.mini");
        assert_eq!(err.kind, MiniErrorKind::SourceNotFound);
        assert_eq!(err.location.path, Some(PathBuf::from("missing.mini")));
    }

    #[test]
    fn test_io_wraps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = MiniError::io(&io, "out.mini");
        assert_eq!(err.kind, MiniErrorKind::Io);
        assert!(err.message.contains("denied"));
    }

    #[test]
    fn test_error_clone() {
        let err = MiniError::malformed("dangling operator");
        let cloned = err.clone();
        assert_eq!(err.kind, cloned.kind);
        assert_eq!(err.message, cloned.message);
    }
}
