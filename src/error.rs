use failure::Fail;

use crate::handle::{FaceHandle, HalfEdgeHandle, VertexHandle};


/// The connectivity information of a mesh violates one of the invariants of
/// the half edge data structure.
///
/// This never happens for meshes that were only modified through the methods
/// of [`HalfEdgeMesh`][crate::HalfEdgeMesh]. It indicates a bug (or memory
/// corruption), not bad user input. Construction from malformed input does
/// *not* produce this error: bad faces are skipped and logged instead. The
/// exception is [`IncompleteFan`][TopologyError::IncompleteFan], which
/// `check_integrity` also reports for input that is not manifold around a
/// vertex.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum TopologyError {
    /// Walking around the vertex took more steps than there are half edges in
    /// the mesh, so the walk is cycling without ever reaching its start.
    #[fail(
        display = "fan around {:?} does not close: still walking after {} steps",
        vertex,
        steps
    )]
    UnclosedFan {
        vertex: VertexHandle,
        steps: usize,
    },

    /// A half edge reached while walking around `vertex` does not start at
    /// `vertex`.
    #[fail(
        display = "{:?} was reached while walking around {:?}, but starts at {:?}",
        half_edge,
        vertex,
        actual_start
    )]
    FanMismatch {
        vertex: VertexHandle,
        half_edge: HalfEdgeHandle,
        actual_start: VertexHandle,
    },

    /// The `next`/`prev` links of a face do not form a closed cycle of three
    /// half edges all referring to that face.
    #[fail(display = "the half edges of {:?} do not form a closed triangle loop", face)]
    BrokenFaceLoop {
        face: FaceHandle,
    },

    /// `half_edge.opposite` is `opposite`, but not the other way around (or
    /// both run in the same direction).
    #[fail(
        display = "opposite of {:?} is {:?}, but they are not twins of one another",
        half_edge,
        opposite
    )]
    AsymmetricOpposite {
        half_edge: HalfEdgeHandle,
        opposite: HalfEdgeHandle,
    },

    /// A live half edge has an opposite that belongs to a removed face.
    #[fail(
        display = "opposite {:?} of live {:?} belongs to a removed face",
        opposite,
        half_edge
    )]
    OppositeInRemovedFace {
        half_edge: HalfEdgeHandle,
        opposite: HalfEdgeHandle,
    },

    /// The `first_half_edge` of a live vertex does not start at that vertex
    /// or lies in a removed face.
    #[fail(display = "first half edge {:?} of {:?} is invalid", half_edge, vertex)]
    BadFirstHalfEdge {
        vertex: VertexHandle,
        half_edge: HalfEdgeHandle,
    },

    /// A half edge of a live face starts at a removed vertex.
    #[fail(display = "{:?} of a live face starts at removed {:?}", half_edge, vertex)]
    RemovedVertexInUse {
        vertex: VertexHandle,
        half_edge: HalfEdgeHandle,
    },

    /// A live half edge starting at `vertex` is not reached when walking
    /// around `vertex`. This happens if the faces around `vertex` are not
    /// connected via twins, e.g. two fans touching only at `vertex`.
    #[fail(display = "{:?} starts at {:?}, but is not part of its fan", half_edge, vertex)]
    IncompleteFan {
        vertex: VertexHandle,
        half_edge: HalfEdgeHandle,
    },
}
