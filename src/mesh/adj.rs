//! Walking the half edges around a vertex.
//!
//! The outgoing half edges of a vertex `v` form a *fan*. Going from one
//! outgoing half edge `he` to its twin (which ends at `v`) and then to the
//! twin's `next` yields the next outgoing half edge, clock wise around `v`.
//!
//! For interior vertices, that walk eventually arrives at the half edge it
//! started at (the fan is *closed*). For vertices on the boundary, it hits a
//! half edge without twin. In that case we also walk from the start into the
//! other direction (via `prev.opposite`) to collect the remaining half edges.

use smallvec::SmallVec;

use crate::{
    error::TopologyError,
    handle::{FaceHandle, HalfEdgeHandle, VertexHandle},
};
use super::HalfEdgeMesh;


/// All outgoing half edges of one vertex, in walking order.
///
/// For an open fan (a vertex on the boundary), the first half edge is the
/// one whose `prev` has no twin and the last one is the one without twin
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fan {
    half_edges: SmallVec<[HalfEdgeHandle; 8]>,
    closed: bool,
}

impl Fan {
    /// The outgoing half edges.
    pub fn half_edges(&self) -> &[HalfEdgeHandle] {
        &self.half_edges
    }

    /// Whether the walk arrived back at its start. Empty fans (isolated
    /// vertices) are not closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    /// Returns all vertices adjacent to the center of the fan. This is the
    /// end of every outgoing half edge plus, for open fans, the start of the
    /// incoming boundary half edge.
    pub fn neighbors<'a>(
        &'a self,
        mesh: &'a HalfEdgeMesh,
    ) -> impl Iterator<Item = VertexHandle> + 'a {
        let incoming_boundary = match (self.closed, self.half_edges.first()) {
            (false, Some(&first)) => {
                let prev = mesh.half_edges[first].prev;
                Some(mesh.half_edges[prev].start)
            }
            _ => None,
        };

        self.half_edges.iter()
            .map(move |&he| mesh.endpoints(he)[1])
            .chain(incoming_boundary)
    }
}

impl HalfEdgeMesh {
    /// Walks around the given vertex and returns its fan.
    ///
    /// Fails if the walk detects broken connectivity: when a reached half edge
    /// doesn't start at `vertex` or when the walk doesn't terminate within as
    /// many steps as there are half edges.
    pub fn fan(&self, vertex: VertexHandle) -> Result<Fan, TopologyError> {
        let mut fan = Fan {
            half_edges: SmallVec::new(),
            closed: false,
        };

        let start = match self.check_vertex(vertex).first_half_edge.into_option() {
            Some(he) => he,
            None => return Ok(fan),
        };
        let max_steps = self.half_edges.num_elements() as usize;

        let mut he = start;
        loop {
            self.check_fan_step(vertex, he, fan.half_edges.len(), max_steps)?;
            fan.half_edges.push(he);

            match self.half_edges[he].opposite.into_option() {
                None => break,
                Some(twin) => {
                    he = self.half_edges[twin].next;
                    if he == start {
                        fan.closed = true;
                        break;
                    }
                }
            }
        }

        if !fan.closed {
            // We hit the boundary. The half edges "before" `start` are still
            // missing.
            let mut before = SmallVec::<[_; 8]>::new();
            let mut he = start;
            loop {
                let prev = self.half_edges[he].prev;
                let twin = match self.half_edges[prev].opposite.into_option() {
                    Some(twin) => twin,
                    None => break,
                };

                let steps = fan.half_edges.len() + before.len();
                self.check_fan_step(vertex, twin, steps, max_steps)?;
                before.push(twin);
                he = twin;
            }

            if !before.is_empty() {
                before.reverse();
                before.extend(fan.half_edges.drain(..));
                fan.half_edges = before;
            }
        }

        Ok(fan)
    }

    fn check_fan_step(
        &self,
        vertex: VertexHandle,
        he: HalfEdgeHandle,
        steps: usize,
        max_steps: usize,
    ) -> Result<(), TopologyError> {
        if steps >= max_steps {
            return Err(TopologyError::UnclosedFan { vertex, steps });
        }

        let actual_start = self.half_edges[he].start;
        if actual_start != vertex {
            return Err(TopologyError::FanMismatch { vertex, half_edge: he, actual_start });
        }

        Ok(())
    }

    /// Returns all half edges starting at `vertex`. See [`Fan`] for the order.
    pub fn outgoing_half_edges(
        &self,
        vertex: VertexHandle,
    ) -> Result<SmallVec<[HalfEdgeHandle; 8]>, TopologyError> {
        self.fan(vertex).map(|fan| fan.half_edges)
    }

    /// Returns all vertices connected to `vertex` by an edge.
    pub fn vertices_around_vertex(
        &self,
        vertex: VertexHandle,
    ) -> Result<SmallVec<[VertexHandle; 8]>, TopologyError> {
        let fan = self.fan(vertex)?;
        Ok(fan.neighbors(self).collect())
    }

    /// Returns all faces adjacent to `vertex`.
    pub fn faces_around_vertex(
        &self,
        vertex: VertexHandle,
    ) -> Result<SmallVec<[FaceHandle; 8]>, TopologyError> {
        let fan = self.fan(vertex)?;
        Ok(fan.half_edges.iter().map(|&he| self.half_edges[he].face).collect())
    }

    /// Number of edges incident to `vertex`.
    pub fn valence(&self, vertex: VertexHandle) -> Result<usize, TopologyError> {
        let fan = self.fan(vertex)?;
        Ok(fan.neighbors(self).count())
    }

    /// Returns whether `vertex` is not completely surrounded by faces. This
    /// is `true` for isolated vertices.
    pub fn is_boundary_vertex(&self, vertex: VertexHandle) -> Result<bool, TopologyError> {
        self.fan(vertex).map(|fan| !fan.closed)
    }

    /// Returns the half edge from `from` to `to` if it exists.
    pub fn half_edge_between(
        &self,
        from: VertexHandle,
        to: VertexHandle,
    ) -> Result<Option<HalfEdgeHandle>, TopologyError> {
        let fan = self.fan(from)?;
        let he = fan.half_edges.iter()
            .cloned()
            .find(|&he| self.endpoints(he)[1] == to);

        Ok(he)
    }
}
