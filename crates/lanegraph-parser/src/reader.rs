//! Line reader for `git log --format='%H|%P|%D'` dumps.
//!
//! Each non-blank line describes one commit:
//!
//! ```text
//! <hash>|<parent hash> <parent hash> ...|<ref>, <ref>, ...
//! ```
//!
//! The decoration field is optional. Blank lines and lines starting with `#`
//! are skipped. Reading recovers at the next line after an error, so every
//! broken line of a dump is reported.

use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, cut_err, eof, opt, preceded, separated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{take_till, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
};

/// Rich diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineDiagnostic {
    code: ErrorCode,
    message: &'static str,
    label: &'static str,
    help: Option<&'static str>,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LineDiagnostic>>;

/// One commit line as written in the dump.
#[derive(Debug, Clone)]
pub(crate) struct RawCommit<'a> {
    pub hash: Spanned<&'a str>,
    pub parents: Vec<Spanned<&'a str>>,
    pub decorations: Option<&'a str>,
}

const HASH_EXPECTED: LineDiagnostic = LineDiagnostic {
    code: ErrorCode::E100,
    message: "expected a commit hash",
    label: "not a hexadecimal hash",
    help: Some("produce the dump with `git log --format='%H|%P|%D'`"),
};

const SEPARATOR_EXPECTED: LineDiagnostic = LineDiagnostic {
    code: ErrorCode::E101,
    message: "missing `|` after the commit hash",
    label: "expected `|` here",
    help: Some("separate the hash, the parents and the refs with `|`"),
};

const TRAILING_INPUT: LineDiagnostic = LineDiagnostic {
    code: ErrorCode::E100,
    message: "unexpected character in parent hashes",
    label: "not part of a hexadecimal hash",
    help: Some("parent hashes are separated by single spaces"),
};

/// Parse a hexadecimal hash, keeping its span.
fn hash<'a>(input: &mut Input<'a>) -> IResult<Spanned<&'a str>> {
    take_while(1.., |c: char| c.is_ascii_hexdigit())
        .with_span()
        .map(|(hash, range)| Spanned::new(hash, Span::new(range)))
        .parse_next(input)
}

/// Parse optional spaces or tabs.
fn spaces<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    space0.parse_next(input)
}

/// Parse `|` with optional surrounding spaces.
fn separator<'a>(input: &mut Input<'a>) -> IResult<()> {
    (space0, '|', space0).void().parse_next(input)
}

/// Parse the end of a line (or of the input).
fn line_end<'a>(input: &mut Input<'a>) -> IResult<()> {
    alt(("\r\n".void(), "\n".void(), eof.void())).parse_next(input)
}

/// Parse the space separated parent hashes; there may be none.
fn parents<'a>(input: &mut Input<'a>) -> IResult<Vec<Spanned<&'a str>>> {
    separated(0.., hash, space1).parse_next(input)
}

/// Parse the raw decoration field up to the end of the line.
fn decorations<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_till(0.., ['\r', '\n']).parse_next(input)
}

/// Parse a full commit line including its line ending.
fn commit_line<'a>(input: &mut Input<'a>) -> IResult<RawCommit<'a>> {
    spaces.parse_next(input)?;
    let hash = hash.context(HASH_EXPECTED).parse_next(input)?;
    cut_err(separator)
        .context(SEPARATOR_EXPECTED)
        .parse_next(input)?;
    let parents = parents.parse_next(input)?;
    spaces.parse_next(input)?;
    let decorations = opt(preceded(separator, decorations)).parse_next(input)?;
    cut_err(line_end)
        .context(TRAILING_INPUT)
        .parse_next(input)?;

    Ok(RawCommit {
        hash,
        parents,
        decorations,
    })
}

/// Parse a line that carries no commit: blank or a `#` comment.
fn skipped_line<'a>(input: &mut Input<'a>) -> IResult<()> {
    preceded(space0, alt((line_end, ('#', take_till(0.., '\n'), line_end).void())))
        .parse_next(input)
}

/// Stateful reader collecting commits and diagnostics.
struct Reader<'a> {
    commits: Vec<RawCommit<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Reader<'a> {
    fn new() -> Self {
        Self {
            commits: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn read(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            if skipped_line.parse_next(&mut input).is_ok() {
                continue;
            }
            input.reset(&checkpoint);

            match commit_line(&mut input) {
                Ok(commit) => self.commits.push(commit),
                Err(err) => {
                    let error_pos = input.current_token_start();
                    let remaining = input.eof_offset();
                    self.diagnostics
                        .emit(Self::convert_err_mode(err, error_pos, &input));
                    Self::skip_line(&mut input);

                    // Always make progress, even on a lone `\r`
                    if input.eof_offset() == remaining && !input.is_empty() {
                        let _ = input.next_token();
                    }
                }
            }
        }
    }

    /// Skip the rest of the current line including its line ending.
    fn skip_line(input: &mut Input<'a>) {
        let _: IResult<()> = (take_till(0.., '\n'), opt('\n')).void().parse_next(input);
    }

    fn finish(self) -> Result<Vec<RawCommit<'a>>, ParseError> {
        self.diagnostics.finish()?;
        Ok(self.commits)
    }

    /// Convert a winnow error into a diagnostic pointing at `error_pos`.
    ///
    /// The span covers the offending character (or is empty at end of input).
    fn convert_err_mode(
        err: ErrMode<ContextError<LineDiagnostic>>,
        error_pos: usize,
        input: &Input<'a>,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        let width = input
            .chars()
            .next()
            .filter(|c| *c != '\n' && *c != '\r')
            .map_or(0, char::len_utf8);
        let span = Span::new(error_pos..error_pos + width);

        let info = context_error
            .context()
            .next()
            .cloned()
            .unwrap_or(HASH_EXPECTED);

        let mut diagnostic = Diagnostic::new(info.code, info.message).with_label(span, info.label);
        if let Some(help) = info.help {
            diagnostic = diagnostic.with_help(help);
        }
        diagnostic
    }
}

/// Read every commit line of `source`.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per malformed line.
pub(crate) fn read_commits(source: &str) -> Result<Vec<RawCommit<'_>>, ParseError> {
    let mut reader = Reader::new();
    reader.read(LocatingSlice::new(source));
    reader.finish()
}
