//! Tracing infrastructure for debugging selector matches.
//!
//! The tracer is a zero-cost abstraction: with [`NoopTracer`] every hook is an
//! `#[inline(always)]` empty function and the calls disappear. [`PrintTracer`]
//! turns the same hooks into readable lines.
//!
//! Stage indices passed to the hooks are 0-based positions in the selector.

use crate::Colors;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Accepted candidates and produced matches.
    #[default]
    Default,
    /// Also rejected candidates and backtracking (-v).
    Verbose,
    /// Also every candidate visited, before any test (-vv).
    VeryVerbose,
}

/// Instrumentation hooks called by the matching engine.
pub trait Tracer<T> {
    /// A candidate was pulled from the walk feeding `stage`.
    fn trace_visit(&mut self, stage: usize, node: &T);

    /// The candidate failed the stage's name or filter test.
    fn trace_reject(&mut self, stage: usize, node: &T);

    /// The candidate passed and now feeds the next stage.
    fn trace_accept(&mut self, stage: usize, node: &T);

    /// The walk feeding `stage` ran out of candidates.
    fn trace_backtrack(&mut self, stage: usize);

    /// Every stage accepted a node; `track` holds one node per stage.
    fn trace_match(&mut self, track: &[T]);
}

impl<T, R: Tracer<T> + ?Sized> Tracer<T> for &mut R {
    #[inline(always)]
    fn trace_visit(&mut self, stage: usize, node: &T) {
        (**self).trace_visit(stage, node);
    }

    #[inline(always)]
    fn trace_reject(&mut self, stage: usize, node: &T) {
        (**self).trace_reject(stage, node);
    }

    #[inline(always)]
    fn trace_accept(&mut self, stage: usize, node: &T) {
        (**self).trace_accept(stage, node);
    }

    #[inline(always)]
    fn trace_backtrack(&mut self, stage: usize) {
        (**self).trace_backtrack(stage);
    }

    #[inline(always)]
    fn trace_match(&mut self, track: &[T]) {
        (**self).trace_match(track);
    }
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl<T> Tracer<T> for NoopTracer {
    #[inline(always)]
    fn trace_visit(&mut self, _stage: usize, _node: &T) {}

    #[inline(always)]
    fn trace_reject(&mut self, _stage: usize, _node: &T) {}

    #[inline(always)]
    fn trace_accept(&mut self, _stage: usize, _node: &T) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _stage: usize) {}

    #[inline(always)]
    fn trace_match(&mut self, _track: &[T]) {}
}

/// Display symbols, one per hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symbol {
    Visit,
    Reject,
    Accept,
    Backtrack,
}

impl Symbol {
    fn glyph(self) -> &'static str {
        match self {
            Symbol::Visit => "·",
            Symbol::Reject => "✗",
            Symbol::Accept => "✓",
            Symbol::Backtrack => "↩",
        }
    }
}

/// Tracer that collects a human-readable log of a match.
pub struct PrintTracer<'l, T> {
    /// Renders a node for display.
    label: Box<dyn Fn(&T) -> String + 'l>,
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
}

impl<'l, T> PrintTracer<'l, T> {
    pub fn new(label: impl Fn(&T) -> String + 'l, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            label: Box::new(label),
            verbosity,
            colors,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn add_line(&mut self, stage: usize, symbol: Symbol, content: &str) {
        let c = self.colors;
        let color = match symbol {
            Symbol::Visit | Symbol::Reject => c.dim,
            Symbol::Accept => c.green,
            Symbol::Backtrack => c.blue,
        };
        let line = format!("  {stage:>2} {color}{}{} {content}", symbol.glyph(), c.reset);
        self.lines.push(line.trim_end().to_string());
    }
}

impl<T> Tracer<T> for PrintTracer<'_, T> {
    fn trace_visit(&mut self, stage: usize, node: &T) {
        if self.verbosity == Verbosity::VeryVerbose {
            let label = (self.label)(node);
            self.add_line(stage, Symbol::Visit, &label);
        }
    }

    fn trace_reject(&mut self, stage: usize, node: &T) {
        if self.verbosity != Verbosity::Default {
            let label = (self.label)(node);
            self.add_line(stage, Symbol::Reject, &label);
        }
    }

    fn trace_accept(&mut self, stage: usize, node: &T) {
        let label = (self.label)(node);
        self.add_line(stage, Symbol::Accept, &label);
    }

    fn trace_backtrack(&mut self, stage: usize) {
        if self.verbosity != Verbosity::Default {
            self.add_line(stage, Symbol::Backtrack, "");
        }
    }

    fn trace_match(&mut self, track: &[T]) {
        let labels: Vec<String> = track.iter().map(|node| (self.label)(node)).collect();
        let c = self.colors;
        self.lines
            .push(format!("  {}●{} {}", c.green, c.reset, labels.join(" → ")));
    }
}
