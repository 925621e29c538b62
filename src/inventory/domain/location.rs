//! Location hierarchy: rebuilds a parent/child forest from the flat
//! location list and renders it as an indented text outline.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// One location in the reconstructed hierarchy.
///
/// A node is a root iff its parent reference is absent or dangling (points
/// at an id not present in the input). Dangling parents are never an error.
#[derive(Debug, Clone)]
pub struct LocationNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub children: Vec<LocationNode>,
    pub data: Value,
}

/// Builds the location forest from flat records carrying `id`, `name` and
/// an optional `parent_location_id`.
///
/// Records without a usable `id` are skipped. Parent cycles in the input
/// cannot be represented as a tree; every node caught in one is promoted to
/// a root so the build always terminates and no record is dropped.
pub fn build_forest(records: &[Value]) -> Vec<LocationNode> {
    let mut seeds: Vec<(i64, Option<i64>)> = Vec::new();
    let mut by_id: HashMap<i64, &Value> = HashMap::new();
    for record in records {
        let Some(id) = record.get("id").and_then(Value::as_i64) else {
            continue;
        };
        if by_id.contains_key(&id) {
            continue;
        }
        by_id.insert(id, record);
        let parent_id = record.get("parent_location_id").and_then(Value::as_i64);
        seeds.push((id, parent_id));
    }

    let known: HashSet<i64> = by_id.keys().copied().collect();
    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
    let mut roots: Vec<i64> = Vec::new();
    for &(id, parent_id) in &seeds {
        match parent_id {
            Some(parent) if known.contains(&parent) => {
                children_of.entry(parent).or_default().push(id)
            }
            _ => roots.push(id),
        }
    }

    // cycle safety: nodes unreachable from any root sit on a parent cycle;
    // promote them to roots in input order until everything is reachable
    let mut reachable = HashSet::new();
    for &root in &roots {
        mark_reachable(root, &children_of, &mut reachable);
    }
    for &(id, _) in &seeds {
        if !reachable.contains(&id) {
            roots.push(id);
            mark_reachable(id, &children_of, &mut reachable);
        }
    }

    let mut placed = HashSet::new();
    roots
        .iter()
        .map(|&id| assemble(id, &by_id, &children_of, &mut placed))
        .collect()
}

fn mark_reachable(id: i64, children_of: &HashMap<i64, Vec<i64>>, reachable: &mut HashSet<i64>) {
    if !reachable.insert(id) {
        return;
    }
    if let Some(children) = children_of.get(&id) {
        for &child in children {
            mark_reachable(child, children_of, reachable);
        }
    }
}

fn assemble(
    id: i64,
    by_id: &HashMap<i64, &Value>,
    children_of: &HashMap<i64, Vec<i64>>,
    placed: &mut HashSet<i64>,
) -> LocationNode {
    placed.insert(id);
    let record: &Value = by_id[&id];
    let children = children_of
        .get(&id)
        .map(|ids| {
            ids.iter()
                .filter(|child| !placed.contains(child))
                .copied()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
        .into_iter()
        .map(|child| assemble(child, by_id, children_of, placed))
        .collect();

    LocationNode {
        id,
        name: record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        parent_id: record.get("parent_location_id").and_then(Value::as_i64),
        children,
        data: record.clone(),
    }
}

/// Renders the forest as an ASCII tree, one line per location.
///
/// Depth-first pre-order; siblings at every level (roots included) sort by
/// name, case-sensitive ascending. The last sibling prints with a corner
/// glyph, the rest with a tee; ancestor columns continue with `│` while an
/// exhausted ancestor level pads with blanks.
pub fn render_forest(forest: &[LocationNode]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut roots: Vec<&LocationNode> = forest.iter().collect();
    roots.sort_by(|a, b| a.name.cmp(&b.name));

    for (i, root) in roots.iter().enumerate() {
        render_node(root, "", i == roots.len() - 1, &mut lines);
    }
    lines
}

fn render_node(node: &LocationNode, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
    let marker = if is_last { "└── " } else { "├── " };
    lines.push(format!("{prefix}{marker}{}", node.name));

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let mut children: Vec<&LocationNode> = node.children.iter().collect();
    children.sort_by(|a, b| a.name.cmp(&b.name));

    for (i, child) in children.iter().enumerate() {
        render_node(child, &child_prefix, i == children.len() - 1, lines);
    }
}
