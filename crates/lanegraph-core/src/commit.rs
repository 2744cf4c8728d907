//! Commit records consumed by the layout engine.
//!
//! A [`Commit`] carries only the structural data needed to place a commit in
//! the graph: its hash, its ordered parent hashes, the branch labels pointing
//! at it and a [`CommitType`] classification. Everything else about a commit
//! (message, author, dates) belongs to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Branch label used when a commit carries no branch names.
pub const DEFAULT_BRANCH: &str = "main";

/// Number of characters shown by [`Commit::short_hash`].
const SHORT_HASH_LEN: usize = 7;

/// Classification of a commit for display purposes.
///
/// The layout engine never branches on this value; it is passed through to the
/// output so renderers can draw merge and checkout commits differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// A regular commit.
    #[default]
    Normal,
    /// A commit with two or more parents.
    Merge,
    /// A commit marking branch creation; it carries more than one branch label
    /// and the first one is typically the new branch.
    Checkout,
}

impl CommitType {
    /// Infers the commit type from the number of parents and branch labels.
    ///
    /// Merges win over checkouts: a merge commit that also carries several
    /// branch labels is still a merge.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanegraph_core::commit::CommitType;
    ///
    /// assert_eq!(CommitType::infer(2, 0), CommitType::Merge);
    /// assert_eq!(CommitType::infer(1, 2), CommitType::Checkout);
    /// assert_eq!(CommitType::infer(1, 1), CommitType::Normal);
    /// ```
    pub fn infer(parent_count: usize, branch_count: usize) -> Self {
        if parent_count >= 2 {
            Self::Merge
        } else if branch_count >= 2 {
            Self::Checkout
        } else {
            Self::Normal
        }
    }

    /// Returns the lowercase name of this commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Merge => "merge",
            Self::Checkout => "checkout",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single commit in the history being laid out.
///
/// Hashes are expected to be unique and non-empty across one layout input;
/// the layout engine validates this before starting a pass.
///
/// # Examples
///
/// ```
/// use lanegraph_core::commit::{Commit, CommitType};
///
/// let merge = Commit::new("c3", ["c2", "c1"])
///     .with_branch_names(["main"])
///     .with_commit_type(CommitType::Merge);
///
/// assert_eq!(merge.primary_parent(), Some("c2"));
/// assert_eq!(merge.display_branch(), "main");
/// assert!(merge.is_merge());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    hash: String,

    #[serde(default)]
    parent_hashes: Vec<String>,

    #[serde(default)]
    branch_names: Vec<String>,

    #[serde(default)]
    commit_type: CommitType,
}

impl Commit {
    /// Creates a commit with the given hash and parents, no branch labels and
    /// [`CommitType::Normal`].
    pub fn new<I, S>(hash: impl Into<String>, parent_hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hash: hash.into(),
            parent_hashes: parent_hashes.into_iter().map(Into::into).collect(),
            branch_names: Vec::new(),
            commit_type: CommitType::Normal,
        }
    }

    /// Sets the branch labels pointing at this commit (builder style).
    pub fn with_branch_names<I, S>(mut self, branch_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branch_names = branch_names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the commit type (builder style).
    pub fn with_commit_type(mut self, commit_type: CommitType) -> Self {
        self.commit_type = commit_type;
        self
    }

    /// Returns the commit hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the first seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash
            .char_indices()
            .nth(SHORT_HASH_LEN)
            .map_or(self.hash.as_str(), |(idx, _)| &self.hash[..idx])
    }

    /// Returns the parent hashes in order; the first is the primary parent.
    pub fn parent_hashes(&self) -> &[String] {
        &self.parent_hashes
    }

    /// Returns the primary (first) parent, if any.
    pub fn primary_parent(&self) -> Option<&str> {
        self.parent_hashes.first().map(String::as_str)
    }

    /// Returns the branch labels pointing at this commit.
    pub fn branch_names(&self) -> &[String] {
        &self.branch_names
    }

    /// Returns the label this commit is displayed under.
    ///
    /// This is the first branch name, or [`DEFAULT_BRANCH`] when the commit
    /// carries none.
    pub fn display_branch(&self) -> &str {
        self.branch_names
            .first()
            .map_or(DEFAULT_BRANCH, String::as_str)
    }

    /// Returns the commit type.
    pub fn commit_type(&self) -> CommitType {
        self.commit_type
    }

    /// Returns `true` if the commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// Returns `true` if the commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_branch_falls_back_to_main() {
        let commit = Commit::new("abc", ["def"]);
        assert_eq!(commit.display_branch(), DEFAULT_BRANCH);

        let labelled = commit.with_branch_names(["feature", "main"]);
        assert_eq!(labelled.display_branch(), "feature");
    }

    #[test]
    fn test_root_and_merge() {
        let root = Commit::new("r", Vec::<String>::new());
        assert!(root.is_root());
        assert!(!root.is_merge());
        assert_eq!(root.primary_parent(), None);

        let merge = Commit::new("m", ["a", "b", "c"]);
        assert!(merge.is_merge());
        assert_eq!(merge.primary_parent(), Some("a"));
        assert_eq!(merge.parent_hashes().len(), 3);
    }

    #[test]
    fn test_short_hash() {
        let commit = Commit::new("0123456789abcdef", ["x"]);
        assert_eq!(commit.short_hash(), "0123456");

        let short = Commit::new("abc", ["x"]);
        assert_eq!(short.short_hash(), "abc");
    }

    #[test]
    fn test_commit_type_infer() {
        assert_eq!(CommitType::infer(0, 0), CommitType::Normal);
        assert_eq!(CommitType::infer(1, 1), CommitType::Normal);
        assert_eq!(CommitType::infer(1, 2), CommitType::Checkout);
        assert_eq!(CommitType::infer(2, 3), CommitType::Merge);
        assert_eq!(CommitType::infer(3, 0), CommitType::Merge);
    }

    #[test]
    fn test_commit_type_display() {
        assert_eq!(CommitType::Normal.to_string(), "normal");
        assert_eq!(CommitType::Merge.to_string(), "merge");
        assert_eq!(CommitType::Checkout.to_string(), "checkout");
    }
}
