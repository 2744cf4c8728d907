//! Lookup tables over the commits of one layout input.
//!
//! [`CommitGraph`] is built once per pass from the caller's commits and
//! answers the structural questions the lane allocator asks: is a hash part of
//! the input window, which commit does it name, and who are its children.
//! Building it is also where the input is validated, so a graph that exists
//! is always well formed.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use lanegraph_core::commit::Commit;

use crate::error::LanegraphError;

/// Hash-indexed view of an ordered list of commits.
#[derive(Debug)]
pub(crate) struct CommitGraph<'a> {
    commits: IndexMap<&'a str, &'a Commit>,
    children: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> CommitGraph<'a> {
    /// Validates `commits` and indexes them by hash.
    ///
    /// # Errors
    ///
    /// Returns [`LanegraphError::Validation`] if a hash is empty or if two
    /// commits share a hash.
    pub(crate) fn new(commits: &'a [Commit]) -> Result<Self, LanegraphError> {
        let mut by_hash: IndexMap<&'a str, &'a Commit> = IndexMap::with_capacity(commits.len());

        for (row, commit) in commits.iter().enumerate() {
            if commit.hash().is_empty() {
                return Err(LanegraphError::Validation(format!(
                    "commit at row {row} has an empty hash"
                )));
            }
            if let Some(first_row) = by_hash.get_index_of(commit.hash()) {
                return Err(LanegraphError::Validation(format!(
                    "commit `{}` appears at rows {first_row} and {row}",
                    commit.hash()
                )));
            }
            by_hash.insert(commit.hash(), commit);
        }

        let mut children: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for commit in commits {
            for parent in commit.parent_hashes() {
                children
                    .entry(parent.as_str())
                    .or_default()
                    .push(commit.hash());
            }
        }

        debug!(commits = by_hash.len(), parents_with_children = children.len(); "Indexed commits");

        Ok(Self {
            commits: by_hash,
            children,
        })
    }

    /// Returns the commit with this hash, if it is part of the input.
    pub(crate) fn commit(&self, hash: &str) -> Option<&'a Commit> {
        self.commits.get(hash).copied()
    }

    /// Returns `true` if the hash names a commit of the input.
    pub(crate) fn contains(&self, hash: &str) -> bool {
        self.commits.contains_key(hash)
    }

    /// Returns the children of `hash` in input order.
    pub(crate) fn children(&self, hash: &str) -> &[&'a str] {
        self.children
            .get(hash)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of commits.
    pub(crate) fn len(&self) -> usize {
        self.commits.len()
    }

    /// Consumes the graph, returning the child lists as owned strings.
    pub(crate) fn into_children(self) -> HashMap<String, Vec<String>> {
        self.children
            .into_iter()
            .map(|(parent, children)| {
                (
                    parent.to_string(),
                    children.into_iter().map(str::to_string).collect(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<Commit> {
        vec![
            Commit::new("c3", ["c2", "c1"]),
            Commit::new("c2", ["c0"]),
            Commit::new("c1", ["c0"]),
            Commit::new("c0", Vec::<String>::new()),
        ]
    }

    #[test]
    fn test_lookup_and_children() {
        let commits = history();
        let graph = CommitGraph::new(&commits).unwrap();

        assert_eq!(graph.len(), 4);
        assert!(graph.contains("c1"));
        assert!(!graph.contains("c9"));
        assert_eq!(graph.commit("c2").map(Commit::hash), Some("c2"));
        assert_eq!(graph.children("c0"), ["c2", "c1"]);
        assert!(graph.children("c3").is_empty());
    }

    #[test]
    fn test_children_include_parents_outside_input() {
        let commits = vec![Commit::new("a", ["outside"])];
        let graph = CommitGraph::new(&commits).unwrap();

        assert_eq!(graph.children("outside"), ["a"]);
        assert!(!graph.contains("outside"));
    }

    #[test]
    fn test_duplicate_hash_is_rejected() {
        let mut commits = history();
        commits.push(Commit::new("c2", ["c0"]));

        let err = CommitGraph::new(&commits).unwrap_err();
        assert!(matches!(err, LanegraphError::Validation(_)));
        assert!(err.to_string().contains("rows 1 and 4"));
    }

    #[test]
    fn test_empty_hash_is_rejected() {
        let commits = vec![Commit::new("", ["a"])];

        let err = CommitGraph::new(&commits).unwrap_err();
        assert!(err.to_string().contains("row 0"));
    }
}
