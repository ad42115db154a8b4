// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip-culling render traversal.
//!
//! The [`Culler`] walks an arranged [`VisualTree`] depth-first, parents before
//! children and siblings in order. For each node it:
//!
//! 1. places the node under the inherited [`TraversalState`], giving its world
//!    transform and world-space bounding box;
//! 2. draws the node if that box overlaps the inherited clip by a positive
//!    area;
//! 3. derives the children's state, narrowing the clip when the node clips
//!    to its bounds;
//! 4. skips the children when the node was culled and nothing below it can
//!    become visible, that is when it clips or the inherited clip is empty.
//!
//! A culled node that does not clip still has its children visited: a child
//! may be offset or transformed back into view.
//!
//! Rotated and skewed nodes are tested with the axis-aligned envelope of
//! their transformed rectangle, which can draw a node that is not actually
//! visible but never skips one that is.

use core::ops::ControlFlow;

use kurbo::{Point, Rect};

use crate::clip::{ClipRegion, OVERLAP_EPSILON};
use crate::draw::{Draw, DrawContext};
use crate::state::TraversalState;
#[cfg(feature = "trace-rich")]
use crate::trace::{CullDecision, NodeVisitEvent};
use crate::trace::{InvalidGeometryEvent, TraversalBeginEvent, Tracer};
use crate::tree::{INVALID, NodeId, VisualTree};

pub use crate::trace::TraversalSummary;

/// Run-time traversal settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullConfig {
    /// Minimum per-axis overlap for a node to count as visible.
    pub overlap_epsilon: f64,
    /// Clip applied to every root, in world space.
    pub viewport: ClipRegion,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            overlap_epsilon: OVERLAP_EPSILON,
            viewport: ClipRegion::Unbounded,
        }
    }
}

impl CullConfig {
    /// Default settings clipped to a viewport rectangle.
    #[must_use]
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport: ClipRegion::from_rect(viewport),
            ..Self::default()
        }
    }
}

/// Drives render traversals.
///
/// A culler holds only its configuration and a pass counter; each call to
/// [`render`](Self::render) is independent.
#[derive(Clone, Debug, Default)]
pub struct Culler {
    config: CullConfig,
    pass_index: u64,
}

impl Culler {
    /// Creates a culler with the given settings.
    #[must_use]
    pub fn new(config: CullConfig) -> Self {
        Self {
            config,
            pass_index: 0,
        }
    }

    /// Returns the current settings.
    #[must_use]
    pub fn config(&self) -> &CullConfig {
        &self.config
    }

    /// Replaces the settings used by later passes.
    pub fn set_config(&mut self, config: CullConfig) {
        self.config = config;
    }

    /// Returns the index the next pass will carry.
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    /// Renders the subtree at `root`, starting from the identity transform
    /// and the configured viewport.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn render<D>(&mut self, tree: &VisualTree, root: NodeId, draw: &mut D) -> TraversalSummary
    where
        D: Draw + ?Sized,
    {
        let state = TraversalState::with_viewport(self.config.viewport);
        self.render_with_state(tree, root, state, draw, &mut Tracer::none())
    }

    /// Renders the subtree at `root` under an explicit inbound state,
    /// reporting to `tracer`.
    ///
    /// The configured viewport is intersected into `state.clip`.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn render_with_state<D>(
        &mut self,
        tree: &VisualTree,
        root: NodeId,
        state: TraversalState,
        draw: &mut D,
        tracer: &mut Tracer<'_>,
    ) -> TraversalSummary
    where
        D: Draw + ?Sized,
    {
        tree.validate(root);
        let pass_index = self.pass_index;
        self.pass_index += 1;

        let state = TraversalState {
            clip: state.clip.intersect(&self.config.viewport),
            ..state
        };
        tracer.traversal_begin(&TraversalBeginEvent {
            pass_index,
            root: root.index(),
            clip: state.clip,
        });

        let mut walk = Walk {
            tree,
            epsilon: self.config.overlap_epsilon,
            draw: &mut *draw,
            tracer: &mut *tracer,
            summary: TraversalSummary {
                pass_index,
                ..TraversalSummary::default()
            },
        };
        let flow = walk.visit(root.index(), state, 0);
        let mut summary = walk.summary;
        summary.cancelled = flow.is_break();

        tracer.traversal_summary(&summary);
        summary
    }
}

/// State of one pass that does not change per node.
struct Walk<'a, 't, D: ?Sized> {
    tree: &'a VisualTree,
    epsilon: f64,
    draw: &'a mut D,
    tracer: &'a mut Tracer<'t>,
    summary: TraversalSummary,
}

impl<D: Draw + ?Sized> Walk<'_, '_, D> {
    fn visit(&mut self, idx: u32, state: TraversalState, depth: u32) -> ControlFlow<()> {
        let node = self.tree.node_at(idx);
        let mut placement = state.place(&node);
        self.summary.visited += 1;

        let valid = match node.validate() {
            Ok(()) => true,
            Err(error) => {
                // Malformed geometry is never visible.
                let origin = placement.world_transform * Point::ZERO;
                placement.world_rect = Rect::from_origin_size(origin, (0.0, 0.0));
                self.summary.invalid += 1;
                self.tracer.invalid_geometry(&InvalidGeometryEvent {
                    pass_index: self.summary.pass_index,
                    node: idx,
                    error,
                });
                false
            }
        };

        let visible = valid && state.clip.overlaps_within(placement.world_rect, self.epsilon);
        let child_state = state.for_children(&placement, node.clip_to_bounds);
        let has_children = self.tree.first_child[idx as usize] != INVALID;
        let prune = !visible && (node.clip_to_bounds || state.clip.is_empty());

        #[cfg(feature = "trace-rich")]
        self.tracer.node_visit(&NodeVisitEvent {
            pass_index: self.summary.pass_index,
            node: idx,
            depth,
            world_rect: placement.world_rect,
            decision: if visible {
                CullDecision::Drawn
            } else if prune && has_children {
                CullDecision::Pruned
            } else {
                CullDecision::Culled
            },
        });

        if visible {
            self.summary.drawn += 1;
            self.draw.draw(&DrawContext {
                node: self.tree.handle(idx),
                content: node.content,
                depth,
                world_transform: placement.world_transform,
                world_rect: placement.world_rect,
                clip: child_state.clip,
            })?;
        } else {
            self.summary.culled += 1;
            if prune {
                if has_children {
                    self.summary.pruned += 1;
                }
                return ControlFlow::Continue(());
            }
        }

        let mut child = self.tree.first_child[idx as usize];
        while child != INVALID {
            self.visit(child, child_state, depth + 1)?;
            child = self.tree.next_sibling[child as usize];
        }
        ControlFlow::Continue(())
    }
}
