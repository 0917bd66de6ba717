//! Nested mapping-of-mappings with typed leaves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tree whose interior nodes are string-keyed maps.
///
/// Visitors receive the key path from the root to the leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree<T> {
    /// A value.
    Leaf(T),
    /// A map of subtrees.
    Node(BTreeMap<String, Tree<T>>),
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::Node(BTreeMap::new())
    }
}

impl<T> Tree<T> {
    /// The leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Tree::Leaf(v) => Some(v),
            Tree::Node(_) => None,
        }
    }

    /// Follows `path` from this node.
    pub fn get_path(&self, path: &[&str]) -> Option<&Tree<T>> {
        path.iter().try_fold(self, |node, key| match node {
            Tree::Node(children) => children.get(*key),
            Tree::Leaf(_) => None,
        })
    }

    /// The leaf at `path`, if any.
    pub fn leaf(&self, path: &[&str]) -> Option<&T> {
        self.get_path(path).and_then(Tree::as_leaf)
    }

    /// Calls `f` on every leaf, depth first in key order.
    pub fn visit<F: FnMut(&[&str], &T)>(&self, mut f: F) {
        let mut path = Vec::new();
        self.visit_inner(&mut path, &mut f);
    }

    fn visit_inner<'a, F: FnMut(&[&str], &T)>(&'a self, path: &mut Vec<&'a str>, f: &mut F) {
        match self {
            Tree::Leaf(v) => f(path, v),
            Tree::Node(children) => {
                for (key, child) in children {
                    path.push(key);
                    child.visit_inner(path, f);
                    path.pop();
                }
            }
        }
    }

    /// Rebuilds the tree with every leaf transformed by `f`.
    pub fn map<U, F: FnMut(&[&str], &T) -> U>(&self, mut f: F) -> Tree<U> {
        let mut path = Vec::new();
        self.map_inner(&mut path, &mut f)
    }

    fn map_inner<'a, U, F: FnMut(&[&str], &T) -> U>(
        &'a self,
        path: &mut Vec<&'a str>,
        f: &mut F,
    ) -> Tree<U> {
        match self {
            Tree::Leaf(v) => Tree::Leaf(f(path, v)),
            Tree::Node(children) => {
                let mut out = BTreeMap::new();
                for (key, child) in children {
                    path.push(key);
                    out.insert(key.clone(), child.map_inner(path, f));
                    path.pop();
                }
                Tree::Node(out)
            }
        }
    }
}

impl<T: Clone> Tree<T> {
    /// Keeps the leaves for which `keep` returns `true`.
    ///
    /// Nodes left without children are pruned. Returns `None` when nothing
    /// survives.
    pub fn filter<F: FnMut(&[&str], &T) -> bool>(&self, mut keep: F) -> Option<Tree<T>> {
        let mut path = Vec::new();
        self.filter_inner(&mut path, &mut keep)
    }

    fn filter_inner<'a, F: FnMut(&[&str], &T) -> bool>(
        &'a self,
        path: &mut Vec<&'a str>,
        keep: &mut F,
    ) -> Option<Tree<T>> {
        match self {
            Tree::Leaf(v) => keep(path, v).then(|| Tree::Leaf(v.clone())),
            Tree::Node(children) => {
                let mut out = BTreeMap::new();
                for (key, child) in children {
                    path.push(key);
                    if let Some(kept) = child.filter_inner(path, keep) {
                        out.insert(key.clone(), kept);
                    }
                    path.pop();
                }
                (!out.is_empty()).then_some(Tree::Node(out))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<i32> {
        serde_json::from_str(r#"{"a": {"x": 1, "y": 2}, "b": {"z": {"deep": 3}}, "c": 4}"#).unwrap()
    }

    #[test]
    fn get_path_and_leaf() {
        let t = sample();
        assert_eq!(t.leaf(&["a", "y"]), Some(&2));
        assert_eq!(t.leaf(&["b", "z", "deep"]), Some(&3));
        assert!(t.leaf(&["b", "z"]).is_none());
        assert!(t.get_path(&["b", "z"]).is_some());
        assert!(t.get_path(&["c", "nope"]).is_none());
        assert!(t.get_path(&[]).is_some());
    }

    #[test]
    fn visit_reports_paths_in_key_order() {
        let mut seen = Vec::new();
        sample().visit(|path, v| seen.push((path.join("."), *v)));
        assert_eq!(
            seen,
            vec![
                ("a.x".to_string(), 1),
                ("a.y".to_string(), 2),
                ("b.z.deep".to_string(), 3),
                ("c".to_string(), 4)
            ]
        );
    }

    #[test]
    fn map_keeps_shape() {
        let doubled = sample().map(|_, v| v * 2);
        assert_eq!(doubled.leaf(&["b", "z", "deep"]), Some(&6));
        let named = sample().map(|path, _| path.last().copied().unwrap_or("").to_string());
        assert_eq!(named.leaf(&["a", "x"]).map(String::as_str), Some("x"));
    }

    #[test]
    fn filter_prunes_empty_nodes() {
        let odd = sample().filter(|_, v| v % 2 == 1).unwrap();
        assert_eq!(odd.leaf(&["a", "x"]), Some(&1));
        assert!(odd.get_path(&["a", "y"]).is_none());
        assert_eq!(odd.leaf(&["b", "z", "deep"]), Some(&3));
        assert!(odd.get_path(&["c"]).is_none());

        let big = sample().filter(|_, v| *v > 3).unwrap();
        assert!(big.get_path(&["a"]).is_none());
        assert!(big.get_path(&["b"]).is_none());

        assert!(sample().filter(|_, _| false).is_none());
    }
}
