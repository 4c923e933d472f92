//! Candidate streams along one combinator axis.

use std::vec;

use super::adapter::Adapter;
use super::eval::accepts;
use super::trace::Tracer;
use crate::parser::ast::{Combinator, Counting, Stage};

/// Lazily walks one axis of the host tree.
pub(crate) enum Walk<T> {
    /// Children or following siblings, fetched in one call.
    Flat(vec::IntoIter<T>),
    /// Ancestors, nearest first.
    Up(Option<T>),
    /// Pre-order traversal; one child iterator per open level.
    Down(Vec<vec::IntoIter<T>>),
}

impl<T: Clone + PartialEq> Walk<T> {
    /// Pre-order walk of `root`'s subtree, `root` included.
    pub fn subtree(root: T) -> Self {
        Walk::Down(vec![vec![root].into_iter()])
    }

    pub fn single(node: T) -> Self {
        Walk::Flat(vec![node].into_iter())
    }

    /// Candidates reached from `node` through `combinator`.
    pub fn along<A>(combinator: Combinator, node: &T, adapter: &A) -> Self
    where
        A: Adapter<T> + ?Sized,
    {
        match combinator {
            Combinator::Child => Walk::Flat(adapter.children(node).into_iter()),
            Combinator::Descendant => Walk::Down(vec![adapter.children(node).into_iter()]),
            Combinator::NextSibling | Combinator::AnySubsequentSibling => {
                Walk::Flat(following_siblings(node, adapter).into_iter())
            }
            Combinator::ParentOf | Combinator::AncestorOf => Walk::Up(adapter.parent(node)),
        }
    }

    pub fn next<A>(&mut self, adapter: &A) -> Option<T>
    where
        A: Adapter<T> + ?Sized,
    {
        match self {
            Walk::Flat(nodes) => nodes.next(),
            Walk::Up(next) => {
                let node = next.take()?;
                *next = adapter.parent(&node);
                Some(node)
            }
            Walk::Down(stack) => loop {
                let level = stack.last_mut()?;
                match level.next() {
                    Some(node) => {
                        let children = adapter.children(&node);
                        if !children.is_empty() {
                            stack.push(children.into_iter());
                        }
                        return Some(node);
                    }
                    None => {
                        stack.pop();
                    }
                }
            },
        }
    }
}

fn following_siblings<T, A>(node: &T, adapter: &A) -> Vec<T>
where
    T: PartialEq,
    A: Adapter<T> + ?Sized,
{
    let Some(parent) = adapter.parent(node) else {
        return Vec::new();
    };
    let mut siblings = adapter.children(&parent);
    match siblings.iter().position(|s| s == node) {
        Some(index) => siblings.split_off(index + 1),
        None => Vec::new(),
    }
}

/// Candidate source for one stage plus its position counter.
pub(crate) struct Frame<T> {
    walk: Walk<T>,
    /// Positions consumed so far; see [`Counting`].
    seen: usize,
}

impl<T: Clone + PartialEq> Frame<T> {
    pub fn new(walk: Walk<T>) -> Self {
        Self { walk, seen: 0 }
    }

    /// Next node that passes `stage`'s quantifier and node test.
    pub fn next_accepted<A, R>(
        &mut self,
        index: usize,
        stage: &Stage,
        adapter: &A,
        tracer: &mut R,
    ) -> Option<T>
    where
        A: Adapter<T> + ?Sized,
        R: Tracer<T>,
    {
        let connector = stage.connector.as_ref();
        let quantifier = connector.and_then(|c| c.quantifier.as_ref());
        let counting = connector.map_or(Counting::Position, |c| c.combinator.counting());
        let limit = match (connector, quantifier) {
            (_, Some(q)) => q.upper_bound(),
            (Some(c), None) if c.combinator.nearest_only() => Some(1),
            _ => None,
        };

        loop {
            if limit.is_some_and(|bound| self.seen >= bound) {
                return None;
            }

            let node = self.walk.next(adapter)?;
            tracer.trace_visit(index, &node);

            if counting == Counting::Position {
                self.seen += 1;
                if quantifier.is_some_and(|q| !q.contains(self.seen)) {
                    continue;
                }
            }

            if !accepts(&stage.attributes, &node, adapter) {
                tracer.trace_reject(index, &node);
                continue;
            }

            if counting == Counting::Occurrence {
                self.seen += 1;
                if quantifier.is_some_and(|q| !q.contains(self.seen)) {
                    continue;
                }
            }

            return Some(node);
        }
    }
}
