//! Compiled selector and its matching entry points.

use std::fmt;
use std::str::FromStr;

use crate::diagnostics::SyntaxError;
use crate::engine::{Adapter, Matches, NoopTracer, Origin, Tracer, Tracks, Walker};
use crate::parser::ast::{CompareOperator, Expression, Literal, Stage};
use crate::parser::render::dump;
use crate::parser::{DEFAULT_RECURSION_LIMIT, parse_with_limit};
use crate::quick_find::{QuickFindHint, quick_find_hint};

/// Immutable, compiled selector.
///
/// Built once and shared freely; every match call keeps its own state.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    stages: Vec<Stage>,
    tracked_stages: Vec<usize>,
    track_index: usize,
    quick_find: Option<QuickFindHint>,
    anchored: bool,
}

impl Selector {
    pub fn compile(source: &str) -> Result<Self, SyntaxError> {
        Self::builder(source).compile()
    }

    pub fn builder(source: &str) -> SelectorBuilder<'_> {
        SelectorBuilder::new(source)
    }

    /// True when `source` compiles; the error itself is discarded.
    pub fn check(source: &str) -> bool {
        Self::compile(source).is_ok()
    }

    fn from_stages(stages: Vec<Stage>) -> Self {
        let tracked_stages: Vec<usize> = stages
            .iter()
            .enumerate()
            .filter(|(_, stage)| stage.attributes.tracked)
            .map(|(i, _)| i)
            .collect();
        let track_index = tracked_stages
            .first()
            .copied()
            .unwrap_or(stages.len().saturating_sub(1));
        let quick_find = stages.first().and_then(quick_find_hint);
        let anchored = stages.first().is_some_and(is_anchored_stage);

        Self {
            stages,
            tracked_stages,
            track_index,
            quick_find,
            anchored,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Indices of stages marked with `@`, ascending.
    pub fn tracked_stages(&self) -> &[usize] {
        &self.tracked_stages
    }

    /// Stage whose node is reported: the first tracked stage, else the last.
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    pub fn quick_find(&self) -> Option<&QuickFindHint> {
        self.quick_find.as_ref()
    }

    /// Anchored selectors only try the context node for the first stage.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    fn origin(&self) -> Origin {
        if self.anchored {
            Origin::Context
        } else {
            Origin::Subtree
        }
    }

    pub fn match_first<T, A>(&self, context: &T, adapter: &A) -> Option<T>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
    {
        self.match_all(context, adapter).next()
    }

    pub fn match_all<'s, 'a, T, A>(
        &'s self,
        context: &T,
        adapter: &'a A,
    ) -> Matches<'s, 'a, T, A, NoopTracer>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
    {
        self.match_all_traced(context, adapter, NoopTracer)
    }

    pub fn match_tracks<T, A>(&self, context: &T, adapter: &A) -> Option<Vec<T>>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
    {
        self.match_all_tracks(context, adapter).next()
    }

    pub fn match_all_tracks<'s, 'a, T, A>(
        &'s self,
        context: &T,
        adapter: &'a A,
    ) -> Tracks<'s, 'a, T, A, NoopTracer>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
    {
        self.match_all_tracks_traced(context, adapter, NoopTracer)
    }

    /// Like [`Selector::match_all`], reporting engine events to `tracer`.
    ///
    /// Pass `&mut tracer` to keep ownership of the tracer.
    pub fn match_all_traced<'s, 'a, T, A, R>(
        &'s self,
        context: &T,
        adapter: &'a A,
        tracer: R,
    ) -> Matches<'s, 'a, T, A, R>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
        R: Tracer<T>,
    {
        let walker = Walker::new(&self.stages, context, self.origin(), adapter, tracer);
        Matches::new(walker, self.track_index)
    }

    pub fn match_all_tracks_traced<'s, 'a, T, A, R>(
        &'s self,
        context: &T,
        adapter: &'a A,
        tracer: R,
    ) -> Tracks<'s, 'a, T, A, R>
    where
        T: Clone + PartialEq,
        A: Adapter<T> + ?Sized,
        R: Tracer<T>,
    {
        Tracks::new(Walker::new(
            &self.stages,
            context,
            self.origin(),
            adapter,
            tracer,
        ))
    }

    /// Indented listing of stages followed by derived metadata.
    pub fn dump(&self) -> String {
        let mut out = dump(&self.stages);
        out.push_str(&format!("TrackIndex {}\n", self.track_index));
        if let Some(hint) = &self.quick_find {
            out.push_str(&format!(
                "QuickFind {} {} {}\n",
                hint.attribute_name(),
                hint.operator,
                Literal::Str(hint.value.clone())
            ));
        }
        if self.anchored {
            out.push_str("Anchored\n");
        }
        out
    }
}

/// First expression of the first stage is exactly `depth=0`.
fn is_anchored_stage(stage: &Stage) -> bool {
    matches!(
        stage.attributes.expressions.first(),
        Some(Expression::Binary(binary))
            if binary.name == "depth"
                && binary.operator == CompareOperator::Equal
                && binary.value == Literal::Int(0)
    )
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = SyntaxError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::compile(source)
    }
}

impl TryFrom<&str> for Selector {
    type Error = SyntaxError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::compile(source)
    }
}

/// Builder for compiling a selector with non-default limits.
pub struct SelectorBuilder<'src> {
    source: &'src str,
    recursion_limit: u32,
}

impl<'src> SelectorBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Maximum parenthesis nesting inside filters.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn compile(self) -> Result<Selector, SyntaxError> {
        let stages = parse_with_limit(self.source, self.recursion_limit)?;
        Ok(Selector::from_stages(stages))
    }
}

/// Compiles `source` into a [`Selector`].
pub fn compile(source: &str) -> Result<Selector, SyntaxError> {
    Selector::compile(source)
}

/// True when `source` is a valid selector.
pub fn check(source: &str) -> bool {
    Selector::check(source)
}
