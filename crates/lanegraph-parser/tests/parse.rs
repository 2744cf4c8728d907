use lanegraph_core::commit::CommitType;
use lanegraph_parser::{
    Span,
    error::{ErrorCode, Severity},
    parse,
};

#[test]
fn test_linear_history() {
    let source = "\
        3a1f|2b7c|HEAD -> main, origin/main
        2b7c|1c9d|
        1c9d||tag: v0.1
    ";

    let commits = parse(source).expect("Failed to parse");

    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0].hash(), "3a1f");
    assert_eq!(commits[0].branch_names(), ["main", "origin/main"]);
    assert_eq!(commits[0].commit_type(), CommitType::Checkout);
    assert_eq!(commits[1].primary_parent(), Some("1c9d"));
    assert_eq!(commits[1].display_branch(), "main");
    assert!(commits[2].is_root());
    assert!(commits[2].branch_names().is_empty());
}

#[test]
fn test_merge_history() {
    let source = r#"
# git log --topo-order --format='%H|%P|%D'
e4|d3 c2|HEAD -> main
c2|b1|feature
d3|b1|
b1||
"#;

    let commits = parse(source).expect("Failed to parse");

    assert_eq!(commits.len(), 4);

    let merge = &commits[0];
    assert!(merge.is_merge());
    assert_eq!(merge.commit_type(), CommitType::Merge);
    assert_eq!(merge.parent_hashes(), ["d3", "c2"]);

    assert_eq!(commits[1].display_branch(), "feature");
    assert_eq!(commits[1].commit_type(), CommitType::Normal);
}

#[test]
fn test_parenthesised_decorations() {
    let commits = parse("ab|| (HEAD -> dev, tag: v2)\n").expect("Failed to parse");

    assert_eq!(commits[0].branch_names(), ["dev"]);
}

#[test]
fn test_parents_outside_the_dump_are_kept() {
    let commits = parse("ab|ffff|\n").expect("Failed to parse");

    assert_eq!(commits[0].parent_hashes(), ["ffff"]);
}

#[test]
fn test_empty_input() {
    let commits = parse("").expect("Failed to parse");
    assert!(commits.is_empty());

    let commits = parse("\n# nothing here\n\n").expect("Failed to parse");
    assert!(commits.is_empty());
}

#[test]
fn test_all_errors_reported() {
    let source = "ab|cd|\nzz|ab|\nab cd\ncd|ab|\ncd|\n";

    let err = parse(source).expect_err("Expected parse errors");

    let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E100, ErrorCode::E101]);
    assert!(err.to_string().contains("(+1 more)"));
}

#[test]
fn test_validation_errors() {
    let source = "ab|cd|\ncd|cd|\nab||\n";

    let err = parse(source).expect_err("Expected validation errors");

    let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E201, ErrorCode::E200]);
}

#[test]
fn test_repeated_parent_is_dropped() {
    let commits = parse("ef|ab cd ab|main\nab||\ncd||\n").expect("Failed to parse");

    assert_eq!(commits[0].parent_hashes(), ["ab", "cd"]);
    assert!(commits[0].is_merge());
}

#[test]
fn test_warnings_accompany_errors() {
    let source = "ab|cd cd|\ncd||\nab||\n";

    let err = parse(source).expect_err("Expected validation errors");

    let found: Vec<_> = err
        .diagnostics()
        .iter()
        .map(|d| (d.code(), d.severity()))
        .collect();
    assert_eq!(
        found,
        vec![
            (ErrorCode::W200, Severity::Warning),
            (ErrorCode::E200, Severity::Error),
        ]
    );
    assert_eq!(err.diagnostics()[0].labels()[0].span(), Span::new(6..8));
    assert!(err.to_string().starts_with("error[E200]"));
}
