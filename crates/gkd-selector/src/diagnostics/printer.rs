//! Builder-pattern printer for rendering a syntax error against its source.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};

use super::{ParseError, Span, SyntaxError};

/// Builder for rendering a [`SyntaxError`] with various options.
pub struct ErrorPrinter<'e, 's> {
    error: &'e SyntaxError,
    source: Option<&'s str>,
    path: Option<&'s str>,
    line_start: usize,
    colored: bool,
}

impl<'e, 's> ErrorPrinter<'e, 's> {
    pub fn new(error: &'e SyntaxError) -> Self {
        Self {
            error,
            source: None,
            path: None,
            line_start: 1,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    /// Line number shown for the source, for selectors read from a larger file.
    pub fn line_start(mut self, line: usize) -> Self {
        self.line_start = line;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "error at {}: {}", self.error.span(), self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.error.message();
        let range = adjust_range(self.error.span(), source.len());

        let mut snippet = Snippet::source(source)
            .line_start(self.line_start)
            .annotation(AnnotationKind::Primary.span(range.clone()).label(&message));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let fix = suggest_fix(self.error, source);
        let mut report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];

        if let Some(fix) = &fix {
            report.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(source)
                        .line_start(self.line_start)
                        .patch(Patch::new(range, &fix.replacement)),
                ),
            );
        }

        write!(w, "{}", renderer.render(&report))
    }
}

/// Replacement text offered alongside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fix {
    pub replacement: String,
    pub description: String,
}

/// Literal-type mismatches have an obvious rewrite: quote a bare number for
/// string operators, or unquote a numeric string for ordering operators.
pub(crate) fn suggest_fix(error: &SyntaxError, source: &str) -> Option<Fix> {
    let SyntaxError::Parse(ParseError::IncompatibleLiteral { span, operator, .. }) = error else {
        return None;
    };
    let text = source.get(span.range())?;

    match *operator {
        "^=" | "*=" | "$=" if text.parse::<f64>().is_ok() => Some(Fix {
            replacement: format!("'{text}'"),
            description: "quote the value to compare it as text".to_string(),
        }),
        ">" | ">=" | "<" | "<=" => {
            let inner = text.get(1..text.len().checked_sub(1)?)?;
            inner.parse::<f64>().ok()?;
            Some(Fix {
                replacement: inner.to_string(),
                description: "remove the quotes to compare it as a number".to_string(),
            })
        }
        _ => None,
    }
}

fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    if span.is_empty() {
        return span.start..(span.start + 1).min(limit);
    }

    span.start..span.end
}
