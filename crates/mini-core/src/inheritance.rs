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

//! Construction order for sections.
//!
//! A section can only be built after every section it inherits from. It
//! should also come after the sections its values reference through
//! `$section.key`, but those edges are a preference: one that would close a
//! cycle is dropped, and the reference then fails as `UnknownReference`
//! when the value is resolved. The order is a topological sort; among
//! sections that are ready at the same time, the one declared first in the
//! file goes first.

use crate::error::{MiniError, MiniResult};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// One section as seen by the resolver.
#[derive(Debug, Clone)]
pub struct SectionNode<'a> {
    pub name: &'a str,
    /// Declared parents, in merge order.
    pub parents: &'a [String],
    /// Sections named by `$section.key` tokens in the body.
    pub references: Vec<&'a str>,
    /// Header line (1-based), for error locations.
    pub line: usize,
}

/// Order in which `nodes` must be built, as indices into `nodes`.
///
/// Fails with `DuplicateSectionName` when two nodes share a name, and with
/// `UnresolvableInheritance` when a parent does not exist or the parents
/// form a cycle. References never fail here: unknown sections add no edge,
/// and an edge that would close a cycle is skipped.
pub fn construction_order(nodes: &[SectionNode<'_>]) -> MiniResult<Vec<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.name, i).is_some() {
            return Err(MiniError::duplicate_section(node.name).with_line(node.line));
        }
    }

    // deps[i]: sections that must exist before i
    let mut deps: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        for parent in node.parents {
            let Some(&p) = index.get(parent.as_str()) else {
                return Err(MiniError::unresolvable(format!(
                    "section '{}' inherits from unknown section '{}'",
                    node.name, parent
                ))
                .with_line(node.line)
                .with_section(node.name));
            };
            deps[i].insert(p);
        }
    }

    let (order, in_degree) = topological_order(&deps);
    if order.len() < nodes.len() {
        let cycle = find_cycle(&deps, &in_degree);
        let names: Vec<&str> = cycle.iter().map(|&i| nodes[i].name).collect();
        let first = cycle[0];
        return Err(MiniError::unresolvable(format!(
            "sections inherit from each other in a cycle: {}",
            names.join(" -> ")
        ))
        .with_line(nodes[first].line)
        .with_section(nodes[first].name));
    }

    for (i, node) in nodes.iter().enumerate() {
        for referenced in &node.references {
            let Some(&r) = index.get(referenced) else {
                continue;
            };
            if r == i || deps[i].contains(&r) {
                continue;
            }
            if depends_on(&deps, r, i) {
                debug!(
                    section = node.name,
                    referenced = *referenced,
                    "reference would close a cycle, keeping file order"
                );
                continue;
            }
            deps[i].insert(r);
        }
    }

    // every accepted edge kept the graph acyclic
    let (order, _) = topological_order(&deps);
    debug!(
        order = ?order.iter().map(|&i| nodes[i].name).collect::<Vec<_>>(),
        "resolved construction order"
    );
    Ok(order)
}

/// Kahn's algorithm, lowest ready index first.
///
/// Returns the order reached and the remaining in-degrees; nodes left with a
/// nonzero in-degree sit on or behind a cycle.
fn topological_order(deps: &[BTreeSet<usize>]) -> (Vec<usize>, Vec<usize>) {
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); deps.len()];
    let mut in_degree: Vec<usize> = Vec::with_capacity(deps.len());
    for (i, node_deps) in deps.iter().enumerate() {
        in_degree.push(node_deps.len());
        for &d in node_deps {
            dependents[d].push(i);
        }
    }

    let mut ready: BTreeSet<usize> = (0..deps.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(deps.len());
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }
    (order, in_degree)
}

/// Whether `from` already waits on `target`, directly or transitively.
fn depends_on(deps: &[BTreeSet<usize>], from: usize, target: usize) -> bool {
    let mut seen = vec![false; deps.len()];
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if std::mem::replace(&mut seen[current], true) {
            continue;
        }
        stack.extend(deps[current].iter().copied());
    }
    false
}

/// Walk dependencies among the unbuilt nodes until one repeats.
///
/// Every unbuilt node still waits on another unbuilt node, so the walk
/// always closes. The returned path starts and ends with the same node.
fn find_cycle(deps: &[BTreeSet<usize>], in_degree: &[usize]) -> Vec<usize> {
    let pending = |i: usize| in_degree[i] > 0;
    let mut path: Vec<usize> = Vec::new();
    let mut current = (0..deps.len()).find(|&i| pending(i)).unwrap_or(0);
    loop {
        if let Some(start) = path.iter().position(|&n| n == current) {
            let mut cycle = path.split_off(start);
            cycle.push(current);
            return cycle;
        }
        path.push(current);
        match deps[current].iter().copied().find(|&d| pending(d)) {
            Some(next) => current = next,
            None => return path,
        }
    }
}
