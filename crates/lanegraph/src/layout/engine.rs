//! The lane allocator.
//!
//! Walks the commits once, in input order, keeping live per-lane occupancy in
//! [`LaneSlots`]. Each commit is drawn in the lane already carrying a line
//! down to it when there is one, otherwise in the left-most free lane,
//! otherwise in a new lane on the right. After drawing, the lane is handed to
//! the commit's continuation parent and extra lanes are reserved for the other
//! parents of a merge.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info, trace};

use lanegraph_core::commit::Commit;

use crate::{
    error::LanegraphError,
    layout::{
        lanes::{LaneSlot, LaneSlots},
        positions::{CommitLayout, Position, Spacing},
    },
    structure::CommitGraph,
};

/// Builder for configuring and running the lane allocator.
///
/// # Examples
///
/// ```
/// use lanegraph::{commit::Commit, layout::EngineBuilder};
///
/// let commits = vec![
///     Commit::new("b", ["a"]),
///     Commit::new("a", Vec::<String>::new()),
/// ];
///
/// let layout = EngineBuilder::new()
///     .with_column_spacing(16.0)
///     .build(&commits)
///     .expect("Failed to lay out commits");
///
/// assert_eq!(layout.get("a").map(|p| p.column()), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    spacing: Spacing,
}

impl EngineBuilder {
    /// Create a new engine builder with the default spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all distances at once.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the horizontal distance between lanes.
    pub fn with_column_spacing(mut self, column_spacing: f32) -> Self {
        self.spacing = Spacing::new(
            column_spacing,
            self.spacing.item_height(),
            self.spacing.item_spacing(),
        );
        self
    }

    /// Set the height of one commit row.
    pub fn with_item_height(mut self, item_height: f32) -> Self {
        self.spacing = Spacing::new(
            self.spacing.column_spacing(),
            item_height,
            self.spacing.item_spacing(),
        );
        self
    }

    /// Set the spacing above and below each row.
    pub fn with_item_spacing(mut self, item_spacing: f32) -> Self {
        self.spacing = Spacing::new(
            self.spacing.column_spacing(),
            self.spacing.item_height(),
            item_spacing,
        );
        self
    }

    /// Returns the configured spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Lay out `commits` in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`LanegraphError::Layout`] for an invalid spacing and
    /// [`LanegraphError::Validation`] for duplicate or empty hashes.
    pub fn build(&self, commits: &[Commit]) -> Result<CommitLayout, LanegraphError> {
        layout(commits, self.spacing)
    }
}

/// Lay out `commits` in the order given.
///
/// Empty input gives an empty layout. The input is never reordered or
/// modified, and no state is kept between calls.
///
/// # Errors
///
/// Returns [`LanegraphError::Layout`] for an invalid spacing and
/// [`LanegraphError::Validation`] for duplicate or empty hashes. No partial
/// layout is returned.
pub fn layout(commits: &[Commit], spacing: Spacing) -> Result<CommitLayout, LanegraphError> {
    spacing.validate()?;
    let graph = CommitGraph::new(commits)?;

    info!(commits = commits.len(); "Laying out commits");

    let mut pass = LanePass::new(&graph, spacing);
    for (row, commit) in commits.iter().enumerate() {
        pass.place(row, commit);
    }

    let lane_count = pass.peak;
    let positions = pass.positions;
    debug!(commits = positions.len(), lanes = lane_count; "Lanes assigned");

    Ok(CommitLayout::new(
        positions,
        graph.into_children(),
        lane_count,
    ))
}

/// Mutable state of one forward pass.
struct LanePass<'g, 'a> {
    graph: &'g CommitGraph<'a>,
    spacing: Spacing,
    lanes: LaneSlots,
    processed: HashSet<&'a str>,
    positions: IndexMap<String, Position>,
    /// Most lanes in use at once so far, counting the lane being drawn in.
    peak: usize,
}

impl<'g, 'a> LanePass<'g, 'a> {
    fn new(graph: &'g CommitGraph<'a>, spacing: Spacing) -> Self {
        Self {
            graph,
            spacing,
            lanes: LaneSlots::new(),
            processed: HashSet::with_capacity(graph.len()),
            positions: IndexMap::with_capacity(graph.len()),
            peak: 0,
        }
    }

    /// Draw `commit` at `row`, update the lanes for its parents and return
    /// the column it was drawn in.
    fn place(&mut self, row: usize, commit: &'a Commit) -> usize {
        let hash = commit.hash();
        self.processed.insert(hash);

        let column = self.lanes.select(hash);
        let drawn_in_free_lane = self.lanes.get(column).is_some_and(LaneSlot::is_free);
        self.peak = self
            .peak
            .max(self.lanes.occupied() + usize::from(drawn_in_free_lane));
        trace!(
            hash = commit.short_hash(),
            row,
            column,
            children = self.graph.children(hash).len();
            "Placed commit"
        );

        self.positions.insert(
            hash.to_string(),
            Position::new(
                column,
                row,
                commit.display_branch(),
                commit.commit_type(),
                self.spacing.point(column, row),
            ),
        );

        let parents = commit.parent_hashes();
        if parents.is_empty() {
            self.lanes.free(column);
        } else {
            let continuation = continuation_parent(commit, self.graph);
            self.continue_line(column, &parents[continuation]);

            for (index, parent) in parents.iter().enumerate() {
                if index != continuation {
                    self.open_merge_line(parent);
                }
            }
        }

        self.release_stale(commit);
        column
    }

    /// Hand the commit's lane to `parent`, or free it when the parent is not
    /// part of the input.
    fn continue_line(&mut self, column: usize, parent: &str) {
        if self.graph.contains(parent) {
            self.lanes.reserve(column, parent);
        } else {
            self.lanes.free(column);
        }
    }

    /// Draw the line from a merge to one of its extra parents.
    fn open_merge_line(&mut self, parent: &str) {
        if self.processed.contains(parent) {
            if let Some(column) = self.lanes.release(parent) {
                trace!(parent, column; "Closed line to drawn parent");
            }
        } else if self.lanes.expecting(parent).is_none() && self.graph.contains(parent) {
            let column = self.lanes.allocate(parent);
            self.peak = self.peak.max(self.lanes.occupied());
            trace!(parent, column; "Opened merge line");
        }
    }

    /// Free every lane still expecting a commit that has been drawn.
    ///
    /// Only the commit itself and its parents can have become stale during
    /// this step, since every earlier step ended with the same cleanup.
    fn release_stale(&mut self, commit: &Commit) {
        let candidates =
            std::iter::once(commit.hash()).chain(commit.parent_hashes().iter().map(String::as_str));
        for hash in candidates {
            if self.processed.contains(hash) {
                self.lanes.release_all(hash);
            }
        }
    }
}

/// Index of the parent whose line continues in the commit's own lane.
///
/// This is the primary parent, unless the commit carries branch labels and its
/// branch goes on through a later parent: when the primary parent is displayed
/// under another branch and a later parent of the input is displayed under the
/// commit's branch, that later parent continues the lane.
fn continuation_parent(commit: &Commit, graph: &CommitGraph<'_>) -> usize {
    if commit.branch_names().is_empty() {
        return 0;
    }

    let branch = commit.display_branch();
    let displayed_under = |hash: &str| graph.commit(hash).map(Commit::display_branch);

    let parents = commit.parent_hashes();
    let primary_differs = parents
        .first()
        .and_then(|primary| displayed_under(primary.as_str()))
        .is_some_and(|primary_branch| primary_branch != branch);
    if !primary_differs {
        return 0;
    }

    parents
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, parent)| displayed_under(parent.as_str()) == Some(branch))
        .map_or(0, |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn commit(hash: &str, parents: &[&str]) -> Commit {
        Commit::new(hash, parents.iter().copied())
    }

    fn columns(layout: &CommitLayout) -> Vec<usize> {
        layout.iter().map(|(_, position)| position.column()).collect()
    }

    fn run(commits: &[Commit]) -> CommitLayout {
        layout(commits, Spacing::default()).expect("Failed to lay out commits")
    }

    #[test]
    fn test_empty_input() {
        let layout = run(&[]);

        assert!(layout.is_empty());
        assert_eq!(layout.lane_count(), 0);
    }

    #[test]
    fn test_linear_history_stays_in_one_lane() {
        let commits = vec![
            commit("d", &["c"]),
            commit("c", &["b"]),
            commit("b", &["a"]),
            commit("a", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 0, 0, 0]);
        assert_eq!(layout.lane_count(), 1);
    }

    #[test]
    fn test_reference_merge_scenario() {
        let commits = vec![
            Commit::new("C3", ["C2", "C1"]).with_branch_names(["main"]),
            Commit::new("C2", ["C0"]).with_branch_names(["feature"]),
            Commit::new("C1", ["C0"]).with_branch_names(["main"]),
            Commit::new("C0", Vec::<String>::new()).with_branch_names(["main"]),
        ];

        let layout = EngineBuilder::new()
            .with_column_spacing(40.0)
            .with_item_height(20.0)
            .with_item_spacing(5.0)
            .build(&commits)
            .unwrap();

        let expected = [("C3", 0, 0), ("C2", 1, 1), ("C1", 0, 2), ("C0", 0, 3)];
        for (hash, column, row) in expected {
            let position = layout.get(hash).unwrap();
            assert_eq!(position.column(), column, "column of {hash}");
            assert_eq!(position.row(), row, "row of {hash}");
        }

        let feature = layout.get("C2").unwrap();
        assert_eq!(feature.branch_name(), "feature");
        assert_approx_eq!(f32, feature.x(), 40.0);
        assert_approx_eq!(f32, feature.y(), 30.0);
        assert_approx_eq!(f32, layout.get("C0").unwrap().y(), 90.0);
        assert_eq!(layout.lane_count(), 2);
    }

    #[test]
    fn test_labeled_merge_keeps_primary_parent_on_same_branch() {
        let commits = vec![
            Commit::new("m", ["a", "b"]).with_branch_names(["main"]),
            Commit::new("a", Vec::<String>::new()).with_branch_names(["main"]),
            Commit::new("b", Vec::<String>::new()).with_branch_names(["feature"]),
        ];
        let graph = CommitGraph::new(&commits).unwrap();

        assert_eq!(continuation_parent(&commits[0], &graph), 0);
        assert_eq!(columns(&run(&commits)), vec![0, 0, 1]);
    }

    #[test]
    fn test_labeled_merge_follows_its_own_branch() {
        let commits = vec![
            Commit::new("m", ["topic", "base"]).with_branch_names(["main"]),
            Commit::new("topic", Vec::<String>::new()).with_branch_names(["topic"]),
            Commit::new("base", Vec::<String>::new()),
        ];
        let graph = CommitGraph::new(&commits).unwrap();

        // `base` carries no label, so it is displayed under `main` too
        assert_eq!(continuation_parent(&commits[0], &graph), 1);
        assert_eq!(columns(&run(&commits)), vec![0, 1, 0]);
    }

    #[test]
    fn test_unlabeled_merge_keeps_primary_parent_in_lane() {
        let commits = vec![
            commit("m", &["p", "q"]),
            commit("p", &["r"]),
            commit("q", &["r"]),
            commit("r", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 0, 1, 0]);
    }

    #[test]
    fn test_root_frees_its_lane() {
        // Two unrelated histories: the second reuses the lane of the first root
        let commits = vec![
            commit("a1", &["a0"]),
            commit("a0", &[]),
            commit("b1", &["b0"]),
            commit("b0", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 0, 0, 0]);
        assert_eq!(layout.lane_count(), 1);
    }

    #[test]
    fn test_parent_outside_input_frees_lane() {
        let commits = vec![commit("b", &["outside"]), commit("a", &["gone"])];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 0]);
        assert_eq!(layout.children("outside"), ["b"]);
    }

    #[test]
    fn test_merge_parent_outside_input_opens_no_line() {
        let commits = vec![
            commit("m", &["p", "outside"]),
            commit("x", &["p"]),
            commit("p", &[]),
        ];

        let layout = run(&commits);

        // `x` takes lane 1 because lane 0 carries the line to `p`
        assert_eq!(columns(&layout), vec![0, 1, 0]);
        assert_eq!(layout.lane_count(), 2);
    }

    #[test]
    fn test_octopus_merge_fans_out() {
        let commits = vec![
            commit("m", &["a", "b", "c"]),
            commit("c", &["base"]),
            commit("b", &["base"]),
            commit("a", &["base"]),
            commit("base", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 2, 1, 0, 0]);
        assert_eq!(layout.lane_count(), 3);
    }

    #[test]
    fn test_shared_parent_is_reserved_once() {
        let commits = vec![
            commit("m1", &["x", "side"]),
            commit("m2", &["y", "side"]),
            commit("x", &["side"]),
            commit("y", &["side"]),
            commit("side", &[]),
        ];

        let layout = run(&commits);

        // m1 opens lane 1 for `side`; m2 finds it already expected
        assert_eq!(columns(&layout), vec![0, 2, 0, 2, 0]);
        assert_eq!(layout.lane_count(), 3);
    }

    #[test]
    fn test_merge_of_already_drawn_parent_opens_no_line() {
        // Input not in topological order: `p` is drawn before the merge
        let commits = vec![
            commit("top", &["p"]),
            commit("p", &[]),
            commit("m", &["q", "p"]),
            commit("q", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 0, 0, 0]);
        assert_eq!(layout.lane_count(), 1);
    }

    #[test]
    fn test_freed_hole_is_reused_left_most() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("b", &[]),
            commit("n", &["a", "c"]),
            commit("a", &[]),
            commit("c", &[]),
        ];

        let layout = run(&commits);

        // `b` ends lane 1, which `n` is then drawn in
        assert_eq!(columns(&layout), vec![0, 1, 1, 0, 2]);
        assert_eq!(layout.lane_count(), 3);
    }

    #[test]
    fn test_merge_line_opened_next_to_stale_lane() {
        // Both `a` and `b` carry a line down to `c`; the second one is only
        // released after `c` has opened its line to `q`
        let commits = vec![
            commit("a", &["c"]),
            commit("b", &["c"]),
            commit("c", &["p", "q"]),
            commit("p", &[]),
            commit("q", &[]),
        ];

        let layout = run(&commits);

        assert_eq!(columns(&layout), vec![0, 1, 0, 0, 2]);
        assert_eq!(layout.lane_count(), 3);
    }

    #[test]
    fn test_invalid_spacing_is_rejected() {
        let commits = vec![commit("a", &[])];

        let err = EngineBuilder::new()
            .with_item_spacing(-5.0)
            .build(&commits)
            .unwrap_err();

        assert!(matches!(err, LanegraphError::Layout(_)));
    }

    #[test]
    fn test_duplicate_hash_is_rejected() {
        let commits = vec![commit("a", &[]), commit("a", &[])];

        let err = layout(&commits, Spacing::default()).unwrap_err();
        assert!(matches!(err, LanegraphError::Validation(_)));
    }

    #[test]
    fn test_input_is_not_reordered() {
        let commits = vec![
            commit("a", &[]),
            commit("c", &["a"]),
            commit("b", &["c"]),
        ];

        let layout = run(&commits);

        let hashes: Vec<&str> = layout.iter().map(|(hash, _)| hash).collect();
        assert_eq!(hashes, vec!["a", "c", "b"]);
        let rows: Vec<usize> = layout.iter().map(|(_, p)| p.row()).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }
}
