//! Everything related to the [`HalfEdgeMesh`].

// # Some notes for developers about this implementation
//
// - Nothing is deallocated while editing. Removing a face (and thereby its
//   half edges) or a vertex only sets the `removed` flag. All handles thus
//   stay valid until `purge_removed` is called, which is the only place where
//   elements are physically dropped.
// - Twins are stored explicitly in `opposite` and are not necessarily
//   adjacent in the half edge arena. Splitting creates half edges whose twin
//   is only known after the second face was split, and construction pairs
//   half edges only after all faces were added.
// - The "half edges of a removed face" are considered removed as well. A
//   live half edge never has a removed twin.

use std::fmt;

use cgmath::{prelude::*, Point3, Vector3};
use fxhash::FxHashMap;
use log::{debug, warn};
use optional::Optioned as Opt;

use crate::{
    handle::{hsize, Handle, FaceHandle, HalfEdgeHandle, VertexHandle},
    map::VecMap,
    refs::{FaceRef, HalfEdgeRef, VertexRef},
};


mod adj;
mod check;
mod edit;

pub use self::{
    adj::Fan,
    edit::SplitEdgeResult,
};



// ===============================================================================================
// ===== Definition of types stored inside the data structure
// ===============================================================================================

/// A half edge mesh storing triangles.
///
/// Each triangle is represented by three directed half edges forming a loop
/// (counter clock wise). Half edges of neighboring triangles sharing an edge
/// are linked as `opposite`s of one another. Half edges without an opposite
/// are on the boundary of the mesh.
///
/// Meshes are created from arrays of positions and index triples via
/// [`from_arrays`][HalfEdgeMesh::from_arrays] and can then be modified via
/// [`split_edge`][HalfEdgeMesh::split_edge] and
/// [`collapse_edge`][HalfEdgeMesh::collapse_edge].
///
///
/// # Removed elements
///
/// Edits never free memory. Instead, faces and vertices that disappear are
/// flagged as *removed*. All iterators and counting methods skip removed
/// elements. The handles of removed elements can still be used to query
/// their (stale) data, but they must not be passed to editing methods.
///
/// After collapsing an edge, the vertex that got merged into the other one is
/// flagged removed. Vertices that lose all their faces (for example the tip
/// of a removed boundary triangle) are *not* flagged, but become isolated:
/// their `first_half_edge` is `None`.
///
/// To actually free the memory of removed elements, call
/// [`purge_removed`][HalfEdgeMesh::purge_removed]. Handles of live elements
/// stay valid across that call.
#[derive(Clone)]
pub struct HalfEdgeMesh {
    vertices: VecMap<VertexHandle, Vertex>,
    faces: VecMap<FaceHandle, Face>,
    half_edges: VecMap<HalfEdgeHandle, HalfEdge>,
    debug_counters: DebugCounters,
}

/// Counters for the debug indices of new elements. Each counter holds the
/// index of the last element of that kind that was created.
#[derive(Clone, Copy, Default)]
struct DebugCounters {
    vertex: u64,
    face: u64,
    half_edge: u64,
}

/// Data stored per vertex.
#[derive(Clone, Copy, PartialEq)]
pub struct Vertex {
    position: Point3<f64>,

    /// Handle of one outgoing half edge. `None` if the vertex is isolated.
    first_half_edge: Opt<HalfEdgeHandle>,

    removed: bool,
    debug_index: u64,
}

/// Data stored per face.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Handle of one (arbitrary) half edge of the face.
    half_edge: HalfEdgeHandle,

    removed: bool,
    debug_index: u64,
}

/// Data stored per half edge.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// The vertex this half edge starts at.
    start: VertexHandle,

    /// The face to the left of this half edge.
    face: FaceHandle,

    /// The next and previous half edges around `face` (counter clock wise).
    next: HalfEdgeHandle,
    prev: HalfEdgeHandle,

    /// The twin half edge of the neighboring face or `None` on the boundary.
    opposite: Opt<HalfEdgeHandle>,

    debug_index: u64,
}

impl Vertex {
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// An arbitrary half edge starting at this vertex or `None` if the vertex
    /// is isolated.
    pub fn first_half_edge(&self) -> Option<HalfEdgeHandle> {
        self.first_half_edge.into_option()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Index for diagnostic purposes. Unique per mesh, starting at 1.
    pub fn debug_index(&self) -> u64 {
        self.debug_index
    }
}

impl Face {
    /// One (arbitrary) of the three half edges of this face.
    pub fn half_edge(&self) -> HalfEdgeHandle {
        self.half_edge
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn debug_index(&self) -> u64 {
        self.debug_index
    }
}

impl HalfEdge {
    pub fn start(&self) -> VertexHandle {
        self.start
    }

    pub fn face(&self) -> FaceHandle {
        self.face
    }

    pub fn next(&self) -> HalfEdgeHandle {
        self.next
    }

    pub fn prev(&self) -> HalfEdgeHandle {
        self.prev
    }

    pub fn opposite(&self) -> Option<HalfEdgeHandle> {
        self.opposite.into_option()
    }

    pub fn debug_index(&self) -> u64 {
        self.debug_index
    }
}

impl fmt::Debug for HalfEdgeMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HalfEdgeMesh")
            .field("vertices", &self.vertices)
            .field("faces", &self.faces)
            .field("half_edges", &self.half_edges)
            .finish()
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex #{} {{ position: [{}, {}, {}], first: {:?}{} }}",
            self.debug_index,
            self.position.x,
            self.position.y,
            self.position.z,
            self.first_half_edge,
            if self.removed { ", removed" } else { "" },
        )
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Face #{} {{ half_edge: {:?}{} }}",
            self.debug_index,
            self.half_edge,
            if self.removed { ", removed" } else { "" },
        )
    }
}

impl fmt::Debug for HalfEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HalfEdge #{} {{ start: {:5} face: {:5} next: {:6} prev: {:6} opposite: {:?} }}",
            self.debug_index,
            format!("{:?},", self.start),
            format!("{:?},", self.face),
            format!("{:?},", self.next),
            format!("{:?},", self.prev),
            self.opposite,
        )
    }
}


// ===============================================================================================
// ===== Construction
// ===============================================================================================

/// Statistics about the input given to [`HalfEdgeMesh::from_arrays_with_report`].
///
/// All problems counted here are also logged as warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of input faces that were not added to the mesh because they
    /// are not triangles, reference non-existing vertices or reference the
    /// same vertex more than once.
    pub skipped_faces: usize,

    /// Number of half edges that run between the same ordered pair of
    /// vertices as an earlier half edge. Those are added to their face but
    /// never get an opposite.
    pub duplicate_half_edges: usize,

    /// Number of half edges without an opposite after construction.
    pub boundary_half_edges: usize,
}

/// Key for the ordered pair of input vertex indices of a half edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct HalfEdgeKey {
    from: usize,
    to: usize,
}

impl HalfEdgeKey {
    fn new(from: usize, to: usize) -> Self {
        HalfEdgeKey { from, to }
    }

    /// The key of the half edge in the opposite direction.
    fn swapped(self) -> Self {
        HalfEdgeKey { from: self.to, to: self.from }
    }
}

impl HalfEdgeMesh {
    /// Creates an empty mesh.
    pub fn empty() -> Self {
        Self {
            vertices: VecMap::new(),
            faces: VecMap::new(),
            half_edges: VecMap::new(),
            debug_counters: DebugCounters::default(),
        }
    }

    /// Creates a mesh from vertex positions and faces given as lists of
    /// indices into `positions`.
    ///
    /// Faces have to be triangles specified in counter clock wise order.
    /// Every position is turned into one vertex: the vertex created for
    /// `positions[i]` has the handle index `i`.
    ///
    /// Malformed input does not make this function fail. Faces that are not
    /// triangles or that reference invalid vertex indices are skipped. If two
    /// half edges run between the same ordered pair of vertices (which means
    /// the input is not a consistently oriented manifold), the second one is
    /// not paired with any opposite. All of these problems are logged as
    /// warnings. Use [`from_arrays_with_report`][Self::from_arrays_with_report]
    /// to inspect them programmatically.
    ///
    /// ```
    /// use halfedge::{HalfEdgeMesh, cgmath::Point3};
    ///
    /// let mesh = HalfEdgeMesh::from_arrays(
    ///     &[
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     &[[0usize, 1, 2]],
    /// );
    ///
    /// assert_eq!(mesh.num_vertices(), 3);
    /// assert_eq!(mesh.num_faces(), 1);
    /// ```
    pub fn from_arrays<F: AsRef<[usize]>>(positions: &[Point3<f64>], faces: &[F]) -> Self {
        Self::from_arrays_with_report(positions, faces).0
    }

    /// Like [`from_arrays`][Self::from_arrays], but additionally returns
    /// statistics about problems in the input.
    pub fn from_arrays_with_report<F: AsRef<[usize]>>(
        positions: &[Point3<f64>],
        faces: &[F],
    ) -> (Self, BuildReport) {
        let mut mesh = Self::empty();
        let mut report = BuildReport::default();

        mesh.vertices.reserve(positions.len());
        mesh.faces.reserve(faces.len());
        mesh.half_edges.reserve(faces.len() * 3);

        let vertices = positions.iter()
            .map(|&pos| mesh.new_vertex(pos))
            .collect::<Vec<_>>();

        // Maps the ordered pair of vertex indices of each half edge to that
        // half edge. Used to find twins after all faces have been added.
        let mut half_edge_map = FxHashMap::default();
        half_edge_map.reserve(faces.len() * 3);

        for (face_idx, indices) in faces.iter().enumerate() {
            let indices = indices.as_ref();
            if !check_input_face(face_idx, indices, vertices.len()) {
                report.skipped_faces += 1;
                continue;
            }

            // The representative half edge is overwritten below.
            let face = mesh.new_face(HalfEdgeHandle::new(0));

            let mut triangle = [HalfEdgeHandle::new(0); 3];
            for i in 0..3 {
                let from = indices[i];
                let to = indices[(i + 1) % 3];
                let vertex = vertices[from];

                let he = mesh.new_half_edge(vertex, face);
                if mesh.vertices[vertex].first_half_edge.is_none() {
                    mesh.vertices[vertex].first_half_edge = Opt::some(he);
                }
                triangle[i] = he;

                let key = HalfEdgeKey::new(from, to);
                if half_edge_map.contains_key(&key) {
                    warn!(
                        "found repeated half edge {} -> {} (in face #{}), it won't be paired",
                        from,
                        to,
                        face_idx,
                    );
                    report.duplicate_half_edges += 1;
                } else {
                    half_edge_map.insert(key, he);
                }
            }

            mesh.faces[face].half_edge = triangle[0];
            mesh.link_face_half_edges(triangle);
        }

        // Pair all half edges with their twins. Each pair is visited twice,
        // which doesn't matter.
        for (&key, &he) in &half_edge_map {
            if let Some(&twin) = half_edge_map.get(&key.swapped()) {
                mesh.link_half_edge_pair(Opt::some(he), Opt::some(twin));
            }
        }

        report.boundary_half_edges = mesh.half_edges()
            .filter(|&he| mesh.half_edges[he].opposite.is_none())
            .count();

        debug!(
            "built half edge mesh: {} vertices, {} faces, {} half edges ({} boundary), \
                {} input faces skipped",
            mesh.num_vertices(),
            mesh.num_faces(),
            mesh.num_half_edges(),
            report.boundary_half_edges,
            report.skipped_faces,
        );

        (mesh, report)
    }
}

/// Checks whether the given input face can be added and logs a warning if
/// not.
fn check_input_face(face_idx: usize, indices: &[usize], num_vertices: usize) -> bool {
    if indices.len() != 3 {
        warn!(
            "found non-triangle face #{} with {} vertices, skipping it",
            face_idx,
            indices.len(),
        );
        return false;
    }

    if let Some(&idx) = indices.iter().find(|&&idx| idx >= num_vertices) {
        warn!(
            "face #{} references vertex {}, but there are only {} vertices, skipping it",
            face_idx,
            idx,
            num_vertices,
        );
        return false;
    }

    if indices[0] == indices[1] || indices[1] == indices[2] || indices[0] == indices[2] {
        warn!(
            "face #{} references the same vertex twice ({:?}), skipping it",
            face_idx,
            indices,
        );
        return false;
    }

    true
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::empty()
    }
}


// ===============================================================================================
// ===== Internal helper methods
// ===============================================================================================

impl HalfEdgeMesh {
    fn new_vertex(&mut self, position: Point3<f64>) -> VertexHandle {
        self.debug_counters.vertex += 1;
        self.vertices.push(Vertex {
            position,
            first_half_edge: Opt::none(),
            removed: false,
            debug_index: self.debug_counters.vertex,
        })
    }

    fn new_face(&mut self, half_edge: HalfEdgeHandle) -> FaceHandle {
        self.debug_counters.face += 1;
        self.faces.push(Face {
            half_edge,
            removed: false,
            debug_index: self.debug_counters.face,
        })
    }

    /// Adds a new half edge without opposite. Its `next` and `prev` handles
    /// point to itself and have to be overwritten by the caller.
    fn new_half_edge(&mut self, start: VertexHandle, face: FaceHandle) -> HalfEdgeHandle {
        self.debug_counters.half_edge += 1;
        let this = self.half_edges.next_push_handle();
        self.half_edges.push(HalfEdge {
            start,
            face,
            next: this,
            prev: this,
            opposite: Opt::none(),
            debug_index: self.debug_counters.half_edge,
        })
    }

    /// Links the given half edges in a cycle via `next` and `prev`.
    fn link_face_half_edges(&mut self, half_edges: [HalfEdgeHandle; 3]) {
        for i in 0..3 {
            let curr = half_edges[i];
            let next = half_edges[(i + 1) % 3];
            self.half_edges[curr].next = next;
            self.half_edges[next].prev = curr;
        }
    }

    /// Makes `first` and `second` twins of one another. If one of them is
    /// `None`, the other one becomes a boundary half edge.
    fn link_half_edge_pair(&mut self, first: Opt<HalfEdgeHandle>, second: Opt<HalfEdgeHandle>) {
        if let Some(first) = first.into_option() {
            self.half_edges[first].opposite = second;
        }
        if let Some(second) = second.into_option() {
            self.half_edges[second].opposite = first;
        }
    }

    /// Returns whether `he` exists and belongs to a face that is not removed.
    fn is_live_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self.half_edges.get(he)
            .and_then(|he| self.faces.get(he.face))
            .map_or(false, |face| !face.removed)
    }

    /// Makes sure the given handle points to a live half edge. If that's not
    /// the case, this method panics.
    fn check_live_half_edge(&self, he: HalfEdgeHandle) {
        if !self.half_edges.contains_handle(he) {
            panic!(
                "{:?} was passed to a half edge mesh, but this half edge does not exist in \
                    this mesh",
                he,
            );
        }
        if !self.is_live_half_edge(he) {
            panic!(
                "{:?} was passed to a half edge mesh, but this half edge belongs to a removed face",
                he,
            );
        }
    }

    /// Makes sure the given handle points to an existing vertex. If that's
    /// not the case, this method panics.
    fn check_vertex(&self, v: VertexHandle) -> &Vertex {
        match self.vertices.get(v) {
            Some(vertex) => vertex,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this vertex does not exist in this mesh",
                v,
            ),
        }
    }

    /// Makes sure the given handle points to an existing half edge (of a live
    /// or removed face). If that's not the case, this method panics.
    fn check_half_edge(&self, he: HalfEdgeHandle) -> &HalfEdge {
        match self.half_edges.get(he) {
            Some(half_edge) => half_edge,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this half edge does not exist in \
                    this mesh",
                he,
            ),
        }
    }

    /// Makes sure the given handle points to an existing face. If that's not
    /// the case, this method panics.
    fn check_face(&self, f: FaceHandle) -> &Face {
        match self.faces.get(f) {
            Some(face) => face,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this face does not exist in this mesh",
                f,
            ),
        }
    }

    /// The vector from the start to the end of `he`.
    fn edge_vector(&self, he: HalfEdgeHandle) -> Vector3<f64> {
        let [from, to] = self.endpoints(he);
        self.vertices[to].position - self.vertices[from].position
    }
}

/// Returns the midpoint `(a + b) * 0.5`.
fn midpoint(a: Point3<f64>, b: Point3<f64>) -> Point3<f64> {
    Point3::from_vec((a.to_vec() + b.to_vec()) * 0.5)
}

/// Returns the next handle after `current` (or the first one if `current` is
/// `None`) in `map` that exists and is not removed.
fn next_live_from<H: Handle, T>(
    map: &VecMap<H, T>,
    current: Option<H>,
    is_removed: impl Fn(&T) -> bool,
) -> Option<H> {
    let mut candidate = match current {
        None => H::new(0),
        Some(h) => H::new(h.idx() + 1),
    };

    loop {
        let h = map.first_handle_from(candidate)?;
        if !is_removed(&map[h]) {
            return Some(h);
        }
        candidate = H::new(h.idx() + 1);
    }
}


// ===============================================================================================
// ===== Element access and iteration
// ===============================================================================================

impl HalfEdgeMesh {
    /// Number of vertices that are not removed (including isolated ones).
    pub fn num_vertices(&self) -> hsize {
        self.vertices().count() as hsize
    }

    /// Number of faces that are not removed.
    pub fn num_faces(&self) -> hsize {
        self.faces().count() as hsize
    }

    /// Number of half edges of faces that are not removed.
    pub fn num_half_edges(&self) -> hsize {
        self.num_faces() * 3
    }

    /// Returns whether the mesh contains the vertex and it's not removed.
    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.get(v).map_or(false, |v| !v.removed)
    }

    /// Returns whether the mesh contains the face and it's not removed.
    pub fn contains_face(&self, f: FaceHandle) -> bool {
        self.faces.get(f).map_or(false, |f| !f.removed)
    }

    /// Returns whether the mesh contains the half edge and its face is not
    /// removed.
    pub fn contains_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self.is_live_half_edge(he)
    }

    /// Iterator over the handles of all vertices that are not removed, in
    /// order of creation.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles().filter(move |&v| !self.vertices[v].removed)
    }

    /// Iterator over the handles of all faces that are not removed, in order
    /// of creation.
    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles().filter(move |&f| !self.faces[f].removed)
    }

    /// Iterator over the handles of all half edges of faces that are not
    /// removed, in order of creation.
    pub fn half_edges(&self) -> impl Iterator<Item = HalfEdgeHandle> + '_ {
        self.half_edges.handles().filter(move |&he| self.is_live_half_edge(he))
    }

    /// Returns the first vertex after `current` that is not removed. Pass
    /// `None` to get the very first one.
    ///
    /// Unlike [`vertices`][Self::vertices], this does not borrow the mesh
    /// across calls, so the mesh can be modified between two calls. Vertices
    /// added in the meantime will be visited, too.
    pub fn next_vertex_from(&self, current: Option<VertexHandle>) -> Option<VertexHandle> {
        next_live_from(&self.vertices, current, |v| v.removed)
    }

    /// Returns the first face after `current` that is not removed. Pass
    /// `None` to get the very first one.
    ///
    /// This is the tool to use for editing passes over the whole mesh:
    ///
    /// ```
    /// use halfedge::shape::{Octahedron, Shape};
    ///
    /// let mut mesh = Octahedron::default().build();
    /// let threshold = 1.3;
    ///
    /// let mut cursor = mesh.next_face_from(None);
    /// while let Some(face) = cursor {
    ///     let he = mesh[face].half_edge();
    ///     if mesh.half_edge_ref(he).length() > threshold {
    ///         mesh.split_edge(he);
    ///     }
    ///     cursor = mesh.next_face_from(Some(face));
    /// }
    ///
    /// assert!(mesh.num_faces() > 8);
    /// ```
    pub fn next_face_from(&self, current: Option<FaceHandle>) -> Option<FaceHandle> {
        next_live_from(&self.faces, current, |f| f.removed)
    }

    /// Returns the position of the given vertex.
    pub fn position(&self, v: VertexHandle) -> Point3<f64> {
        self.check_vertex(v).position
    }

    /// Overwrites the position of the given vertex.
    pub fn set_position(&mut self, v: VertexHandle, position: Point3<f64>) {
        self.check_vertex(v);
        self.vertices[v].position = position;
    }

    /// Returns whether the given vertex was removed.
    pub fn is_vertex_removed(&self, v: VertexHandle) -> bool {
        self.check_vertex(v).removed
    }

    /// Returns whether the given face was removed.
    pub fn is_face_removed(&self, f: FaceHandle) -> bool {
        self.check_face(f).removed
    }

    /// Returns the three half edges of the face, starting with its
    /// representative half edge and following the `next` links.
    pub fn half_edges_of_face(&self, f: FaceHandle) -> [HalfEdgeHandle; 3] {
        let he0 = self.check_face(f).half_edge;
        let he1 = self.half_edges[he0].next;
        let he2 = self.half_edges[he1].next;
        [he0, he1, he2]
    }

    /// Returns the three vertices of the face in counter clock wise order.
    pub fn vertices_of_face(&self, f: FaceHandle) -> [VertexHandle; 3] {
        let [he0, he1, he2] = self.half_edges_of_face(f);
        [
            self.half_edges[he0].start,
            self.half_edges[he1].start,
            self.half_edges[he2].start,
        ]
    }

    /// Returns the start and end vertex of the given half edge.
    pub fn endpoints(&self, he: HalfEdgeHandle) -> [VertexHandle; 2] {
        let he = &self.half_edges[he];
        [he.start, self.half_edges[he.next].start]
    }

    /// Returns whether the half edge has no opposite.
    pub fn is_boundary_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self.half_edges[he].opposite.is_none()
    }

    pub fn vertex_ref(&self, v: VertexHandle) -> VertexRef<'_> {
        self.check_vertex(v);
        VertexRef::new(self, v)
    }

    pub fn face_ref(&self, f: FaceHandle) -> FaceRef<'_> {
        self.check_face(f);
        FaceRef::new(self, f)
    }

    pub fn half_edge_ref(&self, he: HalfEdgeHandle) -> HalfEdgeRef<'_> {
        self.check_half_edge(he);
        HalfEdgeRef::new(self, he)
    }


    /// Returns the average length of all half edges of all live faces.
    ///
    /// Each edge between two faces is counted twice (once per half edge),
    /// boundary edges only once. Returns 0 for a mesh without faces.
    ///
    /// This is typically used to derive thresholds for editing passes from
    /// the scale of the mesh.
    pub fn average_edge_length(&self) -> f64 {
        let mut total_length = 0.0;
        let mut half_edge_count = 0usize;
        for f in self.faces() {
            for &he in &self.half_edges_of_face(f) {
                total_length += self.edge_vector(he).magnitude();
                half_edge_count += 1;
            }
        }

        if half_edge_count == 0 {
            return 0.0;
        }
        total_length / half_edge_count as f64
    }
}

macro_rules! impl_index {
    ($handle:ident, $field:ident, $out:ident) => {
        impl std::ops::Index<$handle> for HalfEdgeMesh {
            type Output = $out;

            /// Panics if the handle does not point to an element of this mesh.
            /// Removed elements can still be accessed.
            #[inline(always)]
            fn index(&self, idx: $handle) -> &Self::Output {
                &self.$field[idx]
            }
        }
    }
}

impl_index!(VertexHandle, vertices, Vertex);
impl_index!(FaceHandle, faces, Face);
impl_index!(HalfEdgeHandle, half_edges, HalfEdge);


// ===============================================================================================
// ===== Purging removed elements
// ===============================================================================================

/// The number of elements [`HalfEdgeMesh::purge_removed`] dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeStats {
    pub vertices: usize,
    pub faces: usize,
    pub half_edges: usize,
}

impl HalfEdgeMesh {
    /// Frees all removed elements: removed vertices, removed faces and the
    /// half edges of removed faces.
    ///
    /// Handles of all other elements stay valid. Handles of purged elements
    /// become invalid: using them to access the mesh panics. Call this only
    /// between editing passes, when nothing holds handles to removed
    /// elements anymore.
    pub fn purge_removed(&mut self) -> PurgeStats {
        let half_edges = self.half_edges.handles()
            .filter(|&he| !self.is_live_half_edge(he))
            .collect::<Vec<_>>();
        let faces = self.faces.handles()
            .filter(|&f| self.faces[f].removed)
            .collect::<Vec<_>>();
        let vertices = self.vertices.handles()
            .filter(|&v| self.vertices[v].removed)
            .collect::<Vec<_>>();

        for &he in &half_edges {
            self.half_edges.remove(he);
        }
        for &f in &faces {
            self.faces.remove(f);
        }
        for &v in &vertices {
            self.vertices.remove(v);
        }

        let stats = PurgeStats {
            vertices: vertices.len(),
            faces: faces.len(),
            half_edges: half_edges.len(),
        };
        debug!("purged removed elements from half edge mesh: {:?}", stats);

        stats
    }
}
