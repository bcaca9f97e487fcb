//! Topological editing operations: splitting and collapsing edges.

use cgmath::prelude::*;
use log::trace;
use optional::Optioned as Opt;
use smallvec::SmallVec;

use crate::{
    error::TopologyError,
    handle::{FaceHandle, HalfEdgeHandle, VertexHandle},
};
use super::{midpoint, Fan, HalfEdgeMesh};


/// The elements created by [`HalfEdgeMesh::split_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEdgeResult {
    /// The new vertex in the middle of the split edge.
    pub vertex: VertexHandle,

    /// The new face on the side of the half edge that was split.
    pub new_face: FaceHandle,

    /// The new face on the other side of the edge or `None` if the split
    /// half edge was a boundary half edge.
    pub new_opposite_face: Option<FaceHandle>,

    /// The two half edges that now make up the split half edge: the first
    /// one is the split half edge itself (now ending at `vertex`), the
    /// second one is new and runs from `vertex` to the old end.
    pub half_edges: [HalfEdgeHandle; 2],
}

/// Elements created by splitting one face.
struct FaceSplit {
    new_face: FaceHandle,

    /// The new half edge from the middle vertex to the end of the split half
    /// edge.
    mid_to_end: HalfEdgeHandle,
}

/// One of the (up to two) faces removed by an edge collapse, together with
/// the outer half edges that have to be linked once the face is gone.
#[derive(Debug, Clone, Copy)]
struct Wing {
    face: FaceHandle,

    /// The vertex of the face not on the collapsed edge.
    apex: VertexHandle,

    /// Twins of the `next` and `prev` half edges of the collapsed half edge.
    outer_next: Opt<HalfEdgeHandle>,
    outer_prev: Opt<HalfEdgeHandle>,
}

impl HalfEdgeMesh {
    /// Splits the given half edge (and its twin, if any) in the middle.
    ///
    /// A new vertex is inserted at the midpoint of the edge. Each face
    /// adjacent to the edge is split into two by connecting the new vertex
    /// with the vertex of the face opposite to the edge. All faces keep their
    /// orientation.
    ///
    /// ```text
    ///                (apex)                                   (apex)
    ///               ⟋     ↖                                 ⟋  ↑ |  ↖
    ///        prev  ⟋         ⟍  next                 prev  ⟋    | |     ⟍  next
    ///             ↙             ⟍                        ↙      | ↓        ⟍
    ///       (from) -------------> (to)      =>     (from) ----> (mid) ----> (to)
    ///                    he                                he         mid_to_end
    /// ```
    ///
    /// The given half edge is kept and now ends at the new vertex. Vertices
    /// and faces that existed before stay valid.
    ///
    /// Panics if `he` does not exist or belongs to a removed face.
    pub fn split_edge(&mut self, he: HalfEdgeHandle) -> SplitEdgeResult {
        self.check_live_half_edge(he);

        let [from, to] = self.endpoints(he);
        let opposite = self.half_edges[he].opposite.into_option();
        let mid = midpoint(self.vertices[from].position, self.vertices[to].position);
        let v_mid = self.new_vertex(mid);

        let face = self.half_edges[he].face;
        let left = self.split_face(face, he, v_mid);

        let new_opposite_face = match opposite {
            Some(opposite) => {
                let face = self.half_edges[opposite].face;
                let right = self.split_face(face, opposite, v_mid);

                // Now `he` runs `from -> mid` and `opposite` runs `to -> mid`.
                // Both need the new half edge of the other side as twin.
                self.link_half_edge_pair(Opt::some(he), Opt::some(right.mid_to_end));
                self.link_half_edge_pair(Opt::some(left.mid_to_end), Opt::some(opposite));

                Some(right.new_face)
            }
            None => None,
        };

        trace!("split {:?} ({:?} -> {:?}) at new {:?}", he, from, to, v_mid);

        SplitEdgeResult {
            vertex: v_mid,
            new_face: left.new_face,
            new_opposite_face,
            half_edges: [he, left.mid_to_end],
        }
    }

    /// Splits `old_face` into two by connecting `v_mid` (which is assumed to
    /// lie on `he`) with the opposite vertex.
    ///
    /// Afterwards, `he` ends at `v_mid` and `old_face` consists of `he.prev`,
    /// `he` and a new half edge `mid -> apex`. The new face consists of
    /// `apex -> mid`, `mid -> to` and the old `he.next`. The two inner half
    /// edges are twins, the new `mid -> to` has no twin yet.
    fn split_face(
        &mut self,
        old_face: FaceHandle,
        he: HalfEdgeHandle,
        v_mid: VertexHandle,
    ) -> FaceSplit {
        let next = self.half_edges[he].next;
        let prev = self.half_edges[he].prev;
        let v_apex = self.half_edges[prev].start;

        // The new face, right of the inner edge
        let new_face = self.new_face(next);
        let apex_to_mid = self.new_half_edge(v_apex, new_face);
        let mid_to_end = self.new_half_edge(v_mid, new_face);
        self.half_edges[next].face = new_face;
        self.link_face_half_edges([apex_to_mid, mid_to_end, next]);

        // The shrunk old face, left of the inner edge
        let mid_to_apex = self.new_half_edge(v_mid, old_face);
        self.link_face_half_edges([prev, he, mid_to_apex]);
        self.faces[old_face].half_edge = prev;

        self.link_half_edge_pair(Opt::some(apex_to_mid), Opt::some(mid_to_apex));
        self.vertices[v_mid].first_half_edge = Opt::some(mid_to_end);

        FaceSplit { new_face, mid_to_end }
    }

    /// Collapses the given half edge (and its twin, if any) into a single
    /// vertex at the midpoint of the edge.
    ///
    /// The collapse is only performed if no edge incident to the resulting
    /// vertex would be longer than `sqrt(max_edge_length_squared)`. This is
    /// checked before anything is modified: if the check fails, `Ok(false)`
    /// is returned and the mesh is unchanged.
    ///
    /// ```text
    ///                    (c)
    ///                  ⟋     ↖
    ///            p   ⟋          ⟍   n
    ///              ↙     left      ⟍
    ///          (a) -----------------> (b)
    ///              <-----------------
    ///              ⟍     right     ↗
    ///           on   ⟍           ⟋   op
    ///                  ↘       ⟋
    ///                    (d)
    /// ```
    ///
    /// When collapsing `a -> b`, vertex `b` is moved to the midpoint and takes
    /// over all edges of `a`. The faces `left` and `right` are removed, and
    /// the twins of `p` and `n` (and those of `on` and `op`) become twins of
    /// one another. Vertex `a` is removed. If `a -> b` is a boundary half
    /// edge, only `left` is removed.
    ///
    /// Vertices losing their last face (this can happen to `c` and `d` at the
    /// boundary) are not removed, but become isolated.
    ///
    /// Collapses that would make the mesh non-manifold are refused with
    /// `Ok(false)` as well, leaving the mesh unchanged. This is the case if
    /// `a` and `b` have a common neighbor other than `c` and `d`, or if
    /// `a -> b` is an interior edge but both `a` and `b` lie on the boundary.
    ///
    /// Returns an error if the connectivity around `a` or `b` is broken. In
    /// that case, the mesh is unchanged as well.
    ///
    /// Panics if `he` does not exist or belongs to a removed face.
    pub fn collapse_edge(
        &mut self,
        he: HalfEdgeHandle,
        max_edge_length_squared: f64,
    ) -> Result<bool, TopologyError> {
        self.check_live_half_edge(he);

        let [v_a, v_b] = self.endpoints(he);
        let collapse_to = midpoint(self.vertices[v_a].position, self.vertices[v_b].position);

        // ===================================================================
        // ===== Check the length of all edges after collapsing
        // ===================================================================
        let fan_a = self.fan(v_a)?;
        let fan_b = self.fan(v_b)?;
        let too_long = fan_a.neighbors(self)
            .chain(fan_b.neighbors(self))
            .any(|v| self.vertices[v].position.distance2(collapse_to) > max_edge_length_squared);

        if too_long {
            trace!(
                "not collapsing {:?} ({:?} -> {:?}): some edge would exceed the maximum length",
                he,
                v_a,
                v_b,
            );
            return Ok(false);
        }

        let opposite = self.half_edges[he].opposite.into_option();
        if !self.collapse_keeps_manifold(he, opposite, &fan_a, &fan_b) {
            trace!(
                "not collapsing {:?} ({:?} -> {:?}): the result would not be manifold",
                he,
                v_a,
                v_b,
            );
            return Ok(false);
        }


        // ===================================================================
        // ===== Collapse
        // ===================================================================
        // Everything involving old links has to be read before changing any.
        let wings = [Some(self.wing(he)), opposite.map(|o| self.wing(o))];

        self.vertices[v_b].position = collapse_to;
        for wing in wings.iter().flatten() {
            self.faces[wing.face].removed = true;
        }

        // `b` takes over all edges of `a`. This includes `he` and `a -> d`,
        // which are removed already, but that doesn't hurt.
        for &outgoing in fan_a.half_edges() {
            self.half_edges[outgoing].start = v_b;
        }

        // Close the gap left by each removed face
        for wing in wings.iter().flatten() {
            self.link_half_edge_pair(wing.outer_prev, wing.outer_next);
        }

        // Repair `first_half_edge` of all vertices that might have referred
        // to a half edge of a removed face.
        let mut b_candidates = SmallVec::<[_; 4]>::new();
        for wing in wings.iter().flatten() {
            let apex_candidates = [wing.outer_next, self.next_of(wing.outer_prev)];
            self.repair_first_half_edge(wing.apex, &apex_candidates);

            b_candidates.push(wing.outer_prev);
            b_candidates.push(self.next_of(wing.outer_next));
        }
        self.repair_first_half_edge(v_b, &b_candidates);

        self.vertices[v_a].removed = true;
        self.vertices[v_a].first_half_edge = Opt::none();

        trace!("collapsed {:?}: merged {:?} into {:?}", he, v_a, v_b);

        Ok(true)
    }

    /// Checks the link condition of the edge `he` (with twin `opposite`): the
    /// only vertices adjacent to both endpoints are the apexes of the faces
    /// at the edge. For an interior edge, the endpoints must not both lie on
    /// the boundary, as that would pinch the boundary into one vertex.
    fn collapse_keeps_manifold(
        &self,
        he: HalfEdgeHandle,
        opposite: Option<HalfEdgeHandle>,
        fan_a: &Fan,
        fan_b: &Fan,
    ) -> bool {
        if opposite.is_some() && !fan_a.is_closed() && !fan_b.is_closed() {
            return false;
        }

        let apexes = [Some(he), opposite].iter()
            .flatten()
            .map(|&he| self.half_edges[self.half_edges[he].prev].start)
            .collect::<SmallVec<[_; 2]>>();
        let neighbors_b = fan_b.neighbors(self).collect::<SmallVec<[_; 8]>>();

        fan_a.neighbors(self)
            .filter(|v| neighbors_b.contains(v))
            .all(|v| apexes.contains(&v))
    }

    fn wing(&self, he: HalfEdgeHandle) -> Wing {
        let next = self.half_edges[he].next;
        let prev = self.half_edges[he].prev;
        Wing {
            face: self.half_edges[he].face,
            apex: self.half_edges[prev].start,
            outer_next: self.half_edges[next].opposite,
            outer_prev: self.half_edges[prev].opposite,
        }
    }

    fn next_of(&self, he: Opt<HalfEdgeHandle>) -> Opt<HalfEdgeHandle> {
        he.into_option().map(|he| self.half_edges[he].next).into()
    }

    /// Makes sure the `first_half_edge` of `v` is a live half edge starting
    /// at `v`. If the current one isn't, the first valid candidate is used.
    /// If there is none, `v` becomes isolated.
    fn repair_first_half_edge(&mut self, v: VertexHandle, candidates: &[Opt<HalfEdgeHandle>]) {
        let is_valid = |mesh: &Self, he: HalfEdgeHandle| {
            mesh.is_live_half_edge(he) && mesh.half_edges[he].start == v
        };

        if let Some(current) = self.vertices[v].first_half_edge.into_option() {
            if is_valid(self, current) {
                return;
            }
        }

        let replacement = candidates.iter()
            .filter_map(|candidate| candidate.into_option())
            .find(|&candidate| is_valid(self, candidate));
        self.vertices[v].first_half_edge = replacement.into();
    }
}
