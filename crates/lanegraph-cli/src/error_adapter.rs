//! miette rendering of [`CliError`].
//!
//! Every error becomes one or more [`Report`]s:
//!
//! - parser diagnostics give one report each, labeled against the git log
//!   dump and keeping their severity;
//! - a malformed config file points into its TOML source;
//! - anything else is a single coded message followed by its cause chain.

use std::{error::Error, fmt, ops::Range};

use miette::{Diagnostic, LabeledSpan, Severity, SourceCode};

use lanegraph::LanegraphError;
use lanegraph_parser::error::{Diagnostic as ParseDiagnostic, Label, Severity as ParseSeverity};

use crate::{config::ConfigError, error::CliError};

/// One problem, ready for a miette report handler.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    severity: Severity,
    help: Option<String>,
    src: Option<&'a str>,
    labels: Vec<LabeledSpan>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Report<'a> {
    fn new(message: impl Into<String>, code: &str) -> Self {
        Self {
            message: message.into(),
            code: Some(code.to_string()),
            severity: Severity::Error,
            help: None,
            src: None,
            labels: Vec::new(),
            cause: None,
        }
    }

    fn from_diagnostic(diag: &ParseDiagnostic, src: &'a str) -> Self {
        let severity = match diag.severity() {
            ParseSeverity::Error => Severity::Error,
            ParseSeverity::Warning => Severity::Warning,
        };
        Self {
            message: diag.message().to_string(),
            code: Some(diag.code().to_string()),
            severity,
            help: diag.help().map(str::to_string),
            src: Some(src),
            labels: diag.labels().iter().map(labeled_span).collect(),
            cause: None,
        }
    }

    fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn with_label(mut self, src: &'a str, span: Range<usize>, label: &str) -> Self {
        self.src = Some(src);
        self.labels
            .push(LabeledSpan::new_primary_with_span(Some(label.to_string()), span));
        self
    }

    fn caused_by(mut self, cause: &'a (dyn Error + 'static)) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Report<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
    }
}

impl Diagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let span = (label.span().start(), label.span().len());
    let message = Some(label.message().to_string());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

/// Split `err` into the reports shown to the user.
pub fn reports(err: &CliError) -> Vec<Report<'_>> {
    match err {
        CliError::Config(config_err) => vec![config_report(config_err)],
        CliError::Input { source, .. } => vec![
            Report::new(err.to_string(), "lanegraph::input")
                .caused_by(source)
                .with_help("write one with `git log --topo-order --format='%H|%P|%D'`"),
        ],
        CliError::Lanegraph(lanegraph_err) => library_reports(lanegraph_err),
        CliError::Render(source) => {
            vec![Report::new(err.to_string(), "lanegraph::render").caused_by(source)]
        }
        CliError::Output { source, .. } => {
            vec![Report::new(err.to_string(), "lanegraph::output").caused_by(source)]
        }
    }
}

fn library_reports(err: &LanegraphError) -> Vec<Report<'_>> {
    match err {
        LanegraphError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, src))
            .collect(),
        LanegraphError::Validation(message) => {
            vec![Report::new(message.as_str(), "lanegraph::validation")]
        }
        LanegraphError::Layout(message) => vec![Report::new(message.as_str(), "lanegraph::layout")],
    }
}

fn config_report(err: &ConfigError) -> Report<'_> {
    let report = Report::new(err.to_string(), "lanegraph::config");
    match err {
        ConfigError::Read { source, .. } => report.caused_by(source),
        ConfigError::Syntax {
            src, message, span, ..
        } => {
            let report = report.with_help("known sections are [layout] and [style]");
            match span {
                Some(span) => report.with_label(src, span.clone(), message),
                None => report,
            }
        }
        ConfigError::Invalid { section, .. } => match *section {
            "style" => report.with_help("saturation and lightness are percentages from 0 to 100"),
            _ => report.with_help("distances must be finite and not negative"),
        },
    }
}
