//! Types for references to elements within a mesh.

use std::fmt;

use cgmath::{prelude::*, Point3};
use smallvec::SmallVec;

use crate::{
    error::TopologyError,
    handle::{FaceHandle, Handle, HalfEdgeHandle, VertexHandle},
    mesh::HalfEdgeMesh,
};


/// A reference to an element within a mesh.
///
/// This is just a handle paired with a reference to the mesh associated with
/// that handle. It allows to navigate the mesh without repeatedly passing
/// handles to the mesh:
///
/// ```
/// use halfedge::shape::{Shape, Tetrahedron};
///
/// let mesh = Tetrahedron::default().build();
/// let face = mesh.faces().next().unwrap();
/// let he = mesh.face_ref(face).half_edge();
///
/// // Going around the face three times arrives at the start again
/// assert_eq!(he.next().next().next().handle(), he.handle());
/// assert_eq!(he.twin().unwrap().twin().unwrap().handle(), he.handle());
/// ```
pub struct ElementRef<'a, HandleT: Handle> {
    handle: HandleT,
    mesh: &'a HalfEdgeMesh,
}

/// A reference to a vertex within a mesh. See [`ElementRef`].
pub type VertexRef<'a> = ElementRef<'a, VertexHandle>;

/// A reference to a face within a mesh. See [`ElementRef`].
pub type FaceRef<'a> = ElementRef<'a, FaceHandle>;

/// A reference to a half edge within a mesh. See [`ElementRef`].
pub type HalfEdgeRef<'a> = ElementRef<'a, HalfEdgeHandle>;


impl<'a, HandleT: Handle> ElementRef<'a, HandleT> {
    pub fn new(mesh: &'a HalfEdgeMesh, handle: HandleT) -> Self {
        Self { mesh, handle }
    }

    /// Returns the stored handle.
    pub fn handle(&self) -> HandleT {
        self.handle
    }

    /// Returns a reference to the linked mesh.
    pub fn mesh(&self) -> &'a HalfEdgeMesh {
        self.mesh
    }
}

impl<'a, HandleT: Handle> Clone for ElementRef<'a, HandleT> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            mesh: self.mesh,
        }
    }
}

impl<'a, HandleT: Handle> Copy for ElementRef<'a, HandleT> {}

impl<'a, HandleT: Handle> fmt::Debug for ElementRef<'a, HandleT> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ElementRef({:?})", self.handle)
    }
}

// ===========================================================================
// ===== With VertexHandle
// ===========================================================================
impl<'a> VertexRef<'a> {
    pub fn position(&self) -> Point3<f64> {
        self.mesh[self.handle].position()
    }

    pub fn is_removed(&self) -> bool {
        self.mesh[self.handle].is_removed()
    }

    /// Returns an arbitrary outgoing half edge or `None` if the vertex is
    /// isolated.
    pub fn first_half_edge(&self) -> Option<HalfEdgeRef<'a>> {
        self.mesh[self.handle].first_half_edge().map(|he| ElementRef::new(self.mesh, he))
    }

    /// Returns all vertices connected to this one by an edge.
    pub fn adjacent_vertices(&self) -> Result<SmallVec<[VertexRef<'a>; 8]>, TopologyError> {
        let mesh = self.mesh;
        let vertices = mesh.vertices_around_vertex(self.handle)?;
        Ok(vertices.into_iter().map(|v| ElementRef::new(mesh, v)).collect())
    }

    /// Returns all faces adjacent to this vertex.
    pub fn adjacent_faces(&self) -> Result<SmallVec<[FaceRef<'a>; 8]>, TopologyError> {
        let mesh = self.mesh;
        let faces = mesh.faces_around_vertex(self.handle)?;
        Ok(faces.into_iter().map(|f| ElementRef::new(mesh, f)).collect())
    }

    /// Returns all half edges starting at this vertex.
    pub fn outgoing_half_edges(&self) -> Result<SmallVec<[HalfEdgeRef<'a>; 8]>, TopologyError> {
        let mesh = self.mesh;
        let half_edges = mesh.outgoing_half_edges(self.handle)?;
        Ok(half_edges.into_iter().map(|he| ElementRef::new(mesh, he)).collect())
    }

    pub fn is_boundary(&self) -> Result<bool, TopologyError> {
        self.mesh.is_boundary_vertex(self.handle)
    }
}

// ===========================================================================
// ===== With FaceHandle
// ===========================================================================
impl<'a> FaceRef<'a> {
    /// Returns the representative half edge of this face.
    pub fn half_edge(&self) -> HalfEdgeRef<'a> {
        ElementRef::new(self.mesh, self.mesh[self.handle].half_edge())
    }

    pub fn half_edges(&self) -> [HalfEdgeRef<'a>; 3] {
        let [a, b, c] = self.mesh.half_edges_of_face(self.handle);
        [
            ElementRef::new(self.mesh, a),
            ElementRef::new(self.mesh, b),
            ElementRef::new(self.mesh, c),
        ]
    }

    /// Returns the three vertices of this face in counter clock wise order.
    pub fn vertices(&self) -> [VertexRef<'a>; 3] {
        let [a, b, c] = self.mesh.vertices_of_face(self.handle);
        [
            ElementRef::new(self.mesh, a),
            ElementRef::new(self.mesh, b),
            ElementRef::new(self.mesh, c),
        ]
    }

    pub fn is_removed(&self) -> bool {
        self.mesh[self.handle].is_removed()
    }

    /// Returns the average of the three vertex positions.
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = self.vertices();
        Point3::centroid(&[a.position(), b.position(), c.position()])
    }

    /// Returns the area of the triangle.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices();
        let (a, b, c) = (a.position(), b.position(), c.position());
        (b - a).cross(c - a).magnitude() / 2.0
    }
}

// ===========================================================================
// ===== With HalfEdgeHandle
// ===========================================================================
impl<'a> HalfEdgeRef<'a> {
    pub fn start(&self) -> VertexRef<'a> {
        ElementRef::new(self.mesh, self.mesh[self.handle].start())
    }

    pub fn end(&self) -> VertexRef<'a> {
        self.next().start()
    }

    /// The face left of this half edge.
    pub fn face(&self) -> FaceRef<'a> {
        ElementRef::new(self.mesh, self.mesh[self.handle].face())
    }

    pub fn next(&self) -> HalfEdgeRef<'a> {
        ElementRef::new(self.mesh, self.mesh[self.handle].next())
    }

    pub fn prev(&self) -> HalfEdgeRef<'a> {
        ElementRef::new(self.mesh, self.mesh[self.handle].prev())
    }

    /// Returns the half edge running in the other direction or `None` if
    /// this is a boundary half edge.
    pub fn twin(&self) -> Option<HalfEdgeRef<'a>> {
        self.mesh[self.handle].opposite().map(|he| ElementRef::new(self.mesh, he))
    }

    pub fn is_boundary(&self) -> bool {
        self.mesh.is_boundary_half_edge(self.handle)
    }

    /// Returns the euclidean distance between start and end vertex.
    pub fn length(&self) -> f64 {
        self.start().position().distance(self.end().position())
    }
}
