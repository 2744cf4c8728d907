//! Graph-level checks on the commits read from a dump.
//!
//! The layout engine requires unique hashes; a commit may not name itself as
//! a parent. Both are reported here with source locations, before any commit
//! record is built. A parent listed twice by the same commit is only a
//! warning: the repeat is dropped when the commit is built.

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    reader::RawCommit,
    span::Span,
};

/// Check every commit, reporting all problems at once.
///
/// Returns the warnings when there is no error.
pub(crate) fn validate_commits(commits: &[RawCommit<'_>]) -> Result<Vec<Diagnostic>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut first_seen: IndexMap<&str, Span> = IndexMap::with_capacity(commits.len());

    for commit in commits {
        let hash = *commit.hash.inner();

        if let Some(first) = first_seen.get(hash) {
            collector.emit(
                Diagnostic::new(ErrorCode::E200, format!("commit `{hash}` is listed more than once"))
                    .with_label(commit.hash.span(), "duplicate commit")
                    .with_secondary_label(*first, "first listed here")
                    .with_help("remove the repeated line; each commit must appear once"),
            );
        } else {
            first_seen.insert(hash, commit.hash.span());
        }

        let mut listed: IndexMap<&str, Span> = IndexMap::with_capacity(commit.parents.len());
        for parent in &commit.parents {
            let parent_hash = *parent.inner();
            if parent_hash == hash {
                collector.emit(
                    Diagnostic::new(ErrorCode::E201, format!("commit `{hash}` lists itself as a parent"))
                        .with_label(parent.span(), "self reference")
                        .with_secondary_label(commit.hash.span(), "commit defined here"),
                );
            } else if let Some(first) = listed.get(parent_hash) {
                collector.emit(
                    Diagnostic::new(
                        ErrorCode::W200,
                        format!("commit `{hash}` lists parent `{parent_hash}` more than once"),
                    )
                    .with_label(parent.span(), "repeated parent")
                    .with_secondary_label(*first, "first listed here")
                    .with_help("only the first listing is kept"),
                );
            } else {
                listed.insert(parent_hash, parent.span());
            }
        }
    }

    debug!(unique_commits = first_seen.len(); "Validated commits");
    collector.finish()
}
