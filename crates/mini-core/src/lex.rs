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

//! Line-level tokenization: section headers, property lines and comments.

use crate::error::{MiniError, MiniResult};
use crate::limits::Limits;

/// A `key = value ; comment` line, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty<'a> {
    pub key: &'a str,
    /// Value text with the comment removed, trimmed.
    pub value: &'a str,
    /// Comment including its `#` or `;`.
    pub comment: Option<&'a str>,
    pub line: usize,
}

/// A `[Name] : Parent1, Parent2` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a str,
    pub parents: Vec<String>,
}

/// A header and the property lines below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub name: &'a str,
    pub parents: Vec<String>,
    /// Header line (1-based).
    pub line: usize,
    pub properties: Vec<RawProperty<'a>>,
}

/// Position of the earliest `#` or `;`.
pub fn find_comment(text: &str) -> Option<usize> {
    memchr::memchr2(b'#', b';', text.as_bytes())
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

/// Parse a header line. The caller has checked it starts with `[`.
pub fn parse_header(line: &str, line_num: usize) -> MiniResult<Header<'_>> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('[')
        .ok_or_else(|| MiniError::syntax("section header must start with '['", line_num))?;
    let close = inner
        .find(']')
        .ok_or_else(|| MiniError::syntax("section header is missing ']'", line_num))?;

    let name = inner[..close].trim();
    if name.is_empty() {
        return Err(MiniError::syntax("section name is empty", line_num));
    }

    let rest = inner[close + 1..].trim();
    let parents = if rest.is_empty() || is_comment_line(rest) {
        Vec::new()
    } else if let Some(list) = rest.strip_prefix(':') {
        let list = match find_comment(list) {
            Some(at) => &list[..at],
            None => list,
        };
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        return Err(MiniError::syntax(
            format!("unexpected '{}' after section header", rest),
            line_num,
        ));
    };

    Ok(Header { name, parents })
}

/// Parse a `key = value` line.
pub fn parse_property(line: &str, line_num: usize) -> MiniResult<RawProperty<'_>> {
    let eq = line
        .find('=')
        .ok_or_else(|| MiniError::syntax("expected 'key = value'", line_num))?;
    let key = line[..eq].trim();
    if key.is_empty() {
        return Err(MiniError::syntax("property key is empty", line_num));
    }

    let rest = &line[eq + 1..];
    let (value, comment) = match find_comment(rest) {
        Some(at) => (rest[..at].trim(), Some(rest[at..].trim())),
        None => (rest.trim(), None),
    };

    Ok(RawProperty {
        key,
        value,
        comment,
        line: line_num,
    })
}

/// Split a document into header blocks.
///
/// Blank lines and whole-line comments are skipped anywhere. A property line
/// before the first header is an error.
pub fn split_blocks<'a>(input: &'a str, limits: &Limits) -> MiniResult<Vec<Block<'a>>> {
    limits.check_file_size(input.len())?;
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut blocks: Vec<Block<'a>> = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line_num = i + 1;
        limits.check_line_length(line.len(), line_num)?;

        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment_line(trimmed) {
            continue;
        }

        if trimmed.starts_with('[') {
            let header = parse_header(trimmed, line_num)?;
            blocks.push(Block {
                name: header.name,
                parents: header.parents,
                line: line_num,
                properties: Vec::new(),
            });
            limits.check_sections(blocks.len())?;
            continue;
        }

        let Some(block) = blocks.last_mut() else {
            return Err(MiniError::syntax(
                "property declared before any section header",
                line_num,
            ));
        };
        block.properties.push(parse_property(line, line_num)?);
        limits
            .check_properties(block.properties.len(), block.name)
            .map_err(|e| e.with_line(line_num))?;
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MiniErrorKind;

    // ==================== Comment detection tests ====================

    #[test]
    fn test_find_comment_earliest_marker() {
        assert_eq!(find_comment("a ; b # c"), Some(2));
        assert_eq!(find_comment("a # b ; c"), Some(2));
        assert_eq!(find_comment("plain"), None);
    }

    // ==================== Header tests ====================

    #[test]
    fn test_header_plain() {
        let h = parse_header("[Base]", 1).unwrap();
        assert_eq!(h.name, "Base");
        assert!(h.parents.is_empty());
    }

    #[test]
    fn test_header_with_parents() {
        let h = parse_header("[ Knight ]  :  Base ,Armored, ", 1).unwrap();
        assert_eq!(h.name, "Knight");
        assert_eq!(h.parents, vec!["Base".to_string(), "Armored".to_string()]);
    }

    #[test]
    fn test_header_with_comment() {
        let h = parse_header("[Knight] : Base # melee", 1).unwrap();
        assert_eq!(h.parents, vec!["Base".to_string()]);
        let h = parse_header("[Knight] ; note", 1).unwrap();
        assert!(h.parents.is_empty());
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(parse_header("[Base", 3).unwrap_err().kind, MiniErrorKind::Syntax);
        assert_eq!(parse_header("[  ]", 3).unwrap_err().kind, MiniErrorKind::Syntax);
        let err = parse_header("[Base] extra", 3).unwrap_err();
        assert_eq!(err.kind, MiniErrorKind::Syntax);
        assert_eq!(err.location.line, Some(3));
    }

    // ==================== Property line tests ====================

    #[test]
    fn test_property_simple() {
        let p = parse_property("hp = 10", 2).unwrap();
        assert_eq!((p.key, p.value, p.comment), ("hp", "10", None));
    }

    #[test]
    fn test_property_with_comment() {
        let p = parse_property("  name = Sir Lancelot ; the brave ", 2).unwrap();
        assert_eq!(p.key, "name");
        assert_eq!(p.value, "Sir Lancelot");
        assert_eq!(p.comment, Some("; the brave"));
    }

    #[test]
    fn test_property_value_may_contain_equals() {
        let p = parse_property("expr = a=b", 2).unwrap();
        assert_eq!(p.value, "a=b");
    }

    #[test]
    fn test_property_empty_value() {
        let p = parse_property("empty =", 2).unwrap();
        assert_eq!(p.value, "");
    }

    #[test]
    fn test_property_errors() {
        assert_eq!(parse_property("no equals", 4).unwrap_err().kind, MiniErrorKind::Syntax);
        assert_eq!(parse_property(" = 5", 4).unwrap_err().kind, MiniErrorKind::Syntax);
    }

    // ==================== Block splitting tests ====================

    #[test]
    fn test_split_blocks() {
        let input = "\u{feff}# leading comment\n[A]\nx = 1\n\n; note\n[B] : A\r\ny = 2\n";
        let blocks = split_blocks(input, &Limits::default()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "A");
        assert_eq!(blocks[0].line, 2);
        assert_eq!(blocks[0].properties.len(), 1);
        assert_eq!(blocks[1].parents, vec!["A".to_string()]);
        assert_eq!(blocks[1].properties[0].value, "2");
        assert_eq!(blocks[1].properties[0].line, 7);
    }

    #[test]
    fn test_property_before_header() {
        let err = split_blocks("x = 1\n[A]\n", &Limits::default()).unwrap_err();
        assert_eq!(err.kind, MiniErrorKind::Syntax);
        assert_eq!(err.location.line, Some(1));
    }

    #[test]
    fn test_empty_input() {
        assert!(split_blocks("", &Limits::default()).unwrap().is_empty());
    }

    #[test]
    fn test_limits_enforced() {
        let limits = Limits {
            max_sections: 1,
            ..Limits::default()
        };
        let err = split_blocks("[A]\n[B]\n", &limits).unwrap_err();
        assert_eq!(err.kind, MiniErrorKind::LimitExceeded);

        let limits = Limits {
            max_properties_per_section: 1,
            ..Limits::default()
        };
        let err = split_blocks("[A]\nx = 1\ny = 2\n", &limits).unwrap_err();
        assert_eq!(err.kind, MiniErrorKind::LimitExceeded);
        assert_eq!(err.location.line, Some(3));
    }
}
