//! A half edge data structure for triangle meshes, with edge split and edge
//! collapse.
//!
//! The main type is [`HalfEdgeMesh`]. It stores a (possibly open) manifold
//! triangle mesh as a set of directed half edges: each triangle owns three
//! half edges forming a loop and half edges of neighboring triangles are
//! linked as twins. This makes local navigation cheap and allows local
//! editing operations like [`split_edge`][HalfEdgeMesh::split_edge] and
//! [`collapse_edge`][HalfEdgeMesh::collapse_edge], which are the building
//! blocks of remeshing algorithms.
//!
//! ```
//! use halfedge::shape::{Octahedron, Shape};
//!
//! let mut mesh = Octahedron::default().build();
//! assert_eq!(mesh.num_faces(), 8);
//!
//! // Split one edge: the two adjacent faces become four
//! let he = mesh.half_edges().next().unwrap();
//! let split = mesh.split_edge(he);
//! assert_eq!(mesh.num_faces(), 10);
//!
//! // And collapse it again, allowing edges of any length
//! let collapsed = mesh.collapse_edge(split.half_edges[1], f64::INFINITY).unwrap();
//! assert!(collapsed);
//! assert_eq!(mesh.num_faces(), 8);
//! mesh.check_integrity().unwrap();
//! ```
//!
//! Elements are referred to by [handles][handle]. Edits never invalidate
//! handles: removed elements are only flagged and skipped by all iterators
//! until [`purge_removed`][HalfEdgeMesh::purge_removed] is called.
//!
//! The crate logs problems in input data (via the `log` crate) and returns
//! [`TopologyError`] when it detects corrupted connectivity.

pub use cgmath;

#[macro_use]
mod macros;

pub mod error;
pub mod handle;
pub mod map;
mod mesh;
pub mod refs;
pub mod shape;

pub use self::{
    error::TopologyError,
    handle::{FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    mesh::{
        BuildReport, Face, Fan, HalfEdge, HalfEdgeMesh, PurgeStats, SplitEdgeResult, Vertex,
    },
};


/// Reexports the most commonly used types and traits.
pub mod prelude {
    pub use crate::{
        handle::{hsize, FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
        mesh::HalfEdgeMesh,
        shape::Shape,
    };
}
