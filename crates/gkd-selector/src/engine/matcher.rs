//! Depth-first, pull-based matching over a stage chain.
//!
//! The walker keeps one [`Frame`] per stage that currently has a candidate
//! stream open. Pulling advances the deepest frame; an accepted node opens a
//! frame for the next stage, an exhausted frame is popped so its parent can
//! advance. Nothing is computed until the caller asks for the next result.

use super::adapter::Adapter;
use super::trace::Tracer;
use super::walk::{Frame, Walk};
use crate::parser::ast::{Combinator, Stage};

/// Where stage 0 takes its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Only the context node itself.
    Context,
    /// The context node and all of its descendants, in pre-order.
    Subtree,
}

pub(crate) struct Walker<'s, 'a, T, A: ?Sized, R> {
    stages: &'s [Stage],
    adapter: &'a A,
    frames: Vec<Frame<T>>,
    /// Node accepted at each stage below the deepest frame.
    track: Vec<T>,
    tracer: R,
}

impl<'s, 'a, T, A, R> Walker<'s, 'a, T, A, R>
where
    T: Clone + PartialEq,
    A: Adapter<T> + ?Sized,
    R: Tracer<T>,
{
    pub fn new(stages: &'s [Stage], context: &T, origin: Origin, adapter: &'a A, tracer: R) -> Self {
        let walk = match origin {
            Origin::Context => Walk::single(context.clone()),
            Origin::Subtree => Walk::subtree(context.clone()),
        };
        let frames = if stages.is_empty() {
            Vec::new()
        } else {
            vec![Frame::new(walk)]
        };

        Self {
            stages,
            adapter,
            frames,
            track: Vec::with_capacity(stages.len()),
            tracer,
        }
    }

    /// Next complete track, one node per stage.
    pub fn next_track(&mut self) -> Option<Vec<T>> {
        let stages = self.stages;

        loop {
            let depth = self.frames.len().checked_sub(1)?;
            let frame = &mut self.frames[depth];

            let Some(node) = frame.next_accepted(depth, &stages[depth], self.adapter, &mut self.tracer)
            else {
                self.frames.pop();
                self.tracer.trace_backtrack(depth);
                continue;
            };

            self.tracer.trace_accept(depth, &node);
            self.track.truncate(depth);

            let Some(next) = stages.get(depth + 1) else {
                self.track.push(node);
                self.tracer.trace_match(&self.track);
                return Some(self.track.clone());
            };

            // Stages after the first always carry a connector.
            let combinator = next
                .connector
                .as_ref()
                .map_or(Combinator::Descendant, |c| c.combinator);
            self.frames
                .push(Frame::new(Walk::along(combinator, &node, self.adapter)));
            self.track.push(node);
        }
    }
}

/// Lazy sequence of reported nodes (the node at the track index).
///
/// A node reachable through several paths is reported once. Node handles only
/// promise `PartialEq`, so the seen-list is scanned linearly: reporting k nodes
/// costs O(k²) comparisons. Single-stage selectors skip the list entirely.
pub struct Matches<'s, 'a, T, A: ?Sized, R> {
    walker: Walker<'s, 'a, T, A, R>,
    track_index: usize,
    reported: Option<Vec<T>>,
}

impl<'s, 'a, T, A, R> Matches<'s, 'a, T, A, R>
where
    T: Clone + PartialEq,
    A: Adapter<T> + ?Sized,
    R: Tracer<T>,
{
    pub(crate) fn new(walker: Walker<'s, 'a, T, A, R>, track_index: usize) -> Self {
        // A single stage visits each node at most once.
        let reported = (walker.stages.len() > 1).then(Vec::new);
        Self {
            walker,
            track_index,
            reported,
        }
    }
}

impl<T, A, R> Iterator for Matches<'_, '_, T, A, R>
where
    T: Clone + PartialEq,
    A: Adapter<T> + ?Sized,
    R: Tracer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let mut track = self.walker.next_track()?;
            let node = track.swap_remove(self.track_index);

            if let Some(reported) = &mut self.reported {
                if reported.contains(&node) {
                    continue;
                }
                reported.push(node.clone());
            }
            return Some(node);
        }
    }
}

/// Lazy sequence of complete tracks, one per distinct path.
pub struct Tracks<'s, 'a, T, A: ?Sized, R> {
    walker: Walker<'s, 'a, T, A, R>,
}

impl<'s, 'a, T, A, R> Tracks<'s, 'a, T, A, R>
where
    T: Clone + PartialEq,
    A: Adapter<T> + ?Sized,
    R: Tracer<T>,
{
    pub(crate) fn new(walker: Walker<'s, 'a, T, A, R>) -> Self {
        Self { walker }
    }
}

impl<T, A, R> Iterator for Tracks<'_, '_, T, A, R>
where
    T: Clone + PartialEq,
    A: Adapter<T> + ?Sized,
    R: Tracer<T>,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        self.walker.next_track()
    }
}
