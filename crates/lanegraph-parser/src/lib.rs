//! # Lanegraph Parser
//!
//! Reads commit history dumps produced by
//!
//! ```text
//! git log --topo-order --format='%H|%P|%D'
//! ```
//!
//! into [`Commit`] records ready for layout. Lines keep the order of the
//! dump, which is the order rows are assigned in.
//!
//! ## Usage
//!
//! ```
//! # use lanegraph_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! c3|c2 c1|HEAD -> main
//! c2|c0|feature
//! c1|c0|
//! c0||tag: v1.0
//! ";
//!
//!     let commits = parse(source)?;
//!     assert_eq!(commits.len(), 4);
//!     assert!(commits[0].is_merge());
//!     assert_eq!(commits[0].display_branch(), "main");
//!     Ok(())
//! }
//! ```

pub mod error;

mod reader;
mod span;
mod validate;

pub use span::Span;

use indexmap::IndexSet;
use log::{debug, trace, warn};

use lanegraph_core::commit::{Commit, CommitType};

use error::ParseError;

/// Parse a git log dump into commit records.
///
/// The pipeline is:
///
/// 1. **Read** - split lines into hash, parents and refs (syntax errors)
/// 2. **Validate** - reject duplicate hashes and self-parents, warn about
///    parents listed twice
/// 3. **Build** - drop repeated parents, turn refs into branch labels and
///    infer the [`CommitType`]
///
/// Warnings do not stop the parse; they are logged at `warn` level.
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic per problem found, warnings
/// included. Reading errors are reported before validation runs.
pub fn parse(source: &str) -> Result<Vec<Commit>, ParseError> {
    let raw_commits = reader::read_commits(source)?;
    debug!(lines = raw_commits.len(); "Read commit lines");

    let warnings = validate::validate_commits(&raw_commits)?;
    for warning in &warnings {
        warn!(code = warning.code().as_str(); "{}", warning.message());
    }

    let commits: Vec<Commit> = raw_commits
        .iter()
        .map(|raw| {
            let branch_names = raw
                .decorations
                .map(branch_names)
                .unwrap_or_default();
            let parents: IndexSet<&str> = raw.parents.iter().map(|p| *p.inner()).collect();
            let commit_type = CommitType::infer(parents.len(), branch_names.len());
            trace!(
                hash = *raw.hash.inner(),
                parents = parents.len(),
                commit_type = commit_type.as_str();
                "Built commit"
            );

            Commit::new(*raw.hash.inner(), parents)
                .with_branch_names(branch_names)
                .with_commit_type(commit_type)
        })
        .collect();

    Ok(commits)
}

/// Extract branch labels from a `%D` (or parenthesised `%d`) decoration field.
///
/// `HEAD -> main` yields `main`; a detached `HEAD` and `tag: ...` entries are
/// dropped; every other ref is kept verbatim, in order.
///
/// # Examples
///
/// ```
/// use lanegraph_parser::branch_names;
///
/// let names = branch_names(" (HEAD -> main, origin/main, tag: v2, HEAD)");
/// assert_eq!(names, vec!["main", "origin/main"]);
/// ```
pub fn branch_names(decorations: &str) -> Vec<String> {
    let decorations = decorations.trim();
    let decorations = decorations
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(decorations);

    decorations
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "HEAD" && !name.starts_with("tag: "))
        .map(|name| name.strip_prefix("HEAD -> ").unwrap_or(name).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_names_plain_refs() {
        assert_eq!(branch_names("main, feature/x"), vec!["main", "feature/x"]);
    }

    #[test]
    fn test_branch_names_empty() {
        assert!(branch_names("").is_empty());
        assert!(branch_names("  ").is_empty());
        assert!(branch_names("tag: v1.0, HEAD").is_empty());
    }

    #[test]
    fn test_branch_names_head_pointer() {
        assert_eq!(branch_names("HEAD -> dev, main"), vec!["dev", "main"]);
    }

    #[test]
    fn test_parse_infers_commit_types() {
        let commits = parse("a3|a2 a1|main\na2|a0|feature, release\na1|a0|\na0||\n").unwrap();

        assert_eq!(commits[0].commit_type(), CommitType::Merge);
        assert_eq!(commits[1].commit_type(), CommitType::Checkout);
        assert_eq!(commits[1].display_branch(), "feature");
        assert_eq!(commits[2].commit_type(), CommitType::Normal);
        assert_eq!(commits[2].display_branch(), "main");
        assert!(commits[3].is_root());
    }

    #[test]
    fn test_parse_reports_syntax_before_validation() {
        // The duplicate is never reported because line 2 does not parse.
        let err = parse("ab|cd|\nab cd\nab||\n").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), error::ErrorCode::E101);
    }
}
