use fxhash::FxHashSet;
use optional::Optioned as Opt;

use crate::error::TopologyError;
use super::HalfEdgeMesh;


impl HalfEdgeMesh {
    /// Verifies all connectivity invariants of the mesh.
    ///
    /// This checks that
    ///
    /// - the half edges of each live face form a cycle of three distinct half
    ///   edges that all refer to that face,
    /// - twins of live half edges are live, refer back and run in the other
    ///   direction,
    /// - no live face uses a removed vertex,
    /// - the `first_half_edge` of each live vertex is live and starts at that
    ///   vertex,
    /// - walking around each live vertex terminates and reaches every live
    ///   half edge starting at that vertex.
    ///
    /// This is slow (linear in the size of the mesh) and mostly useful in
    /// tests and for debugging.
    pub fn check_integrity(&self) -> Result<(), TopologyError> {
        for f in self.faces() {
            let half_edges = self.half_edges_of_face(f);
            let [he0, he1, he2] = half_edges;

            let distinct = he0 != he1 && he1 != he2 && he0 != he2;
            let closed = self.half_edges[he2].next == he0;
            let consistent = half_edges.iter().all(|&he| {
                let next = self.half_edges[he].next;
                self.half_edges[he].face == f && self.half_edges[next].prev == he
            });
            if !(distinct && closed && consistent) {
                return Err(TopologyError::BrokenFaceLoop { face: f });
            }

            for &he in &half_edges {
                let [start, end] = self.endpoints(he);
                if self.vertices.get(start).map_or(true, |v| v.removed) {
                    return Err(TopologyError::RemovedVertexInUse { vertex: start, half_edge: he });
                }

                let opposite = match self.half_edges[he].opposite.into_option() {
                    Some(opposite) => opposite,
                    None => continue,
                };
                if !self.is_live_half_edge(opposite) {
                    return Err(TopologyError::OppositeInRemovedFace { half_edge: he, opposite });
                }

                let twin_refers_back = self.half_edges[opposite].opposite == Opt::some(he);
                if !twin_refers_back || self.endpoints(opposite) != [end, start] {
                    return Err(TopologyError::AsymmetricOpposite { half_edge: he, opposite });
                }
            }
        }

        let mut in_fans = FxHashSet::default();
        for v in self.vertices() {
            if let Some(first) = self.vertices[v].first_half_edge.into_option() {
                if !self.is_live_half_edge(first) || self.half_edges[first].start != v {
                    return Err(TopologyError::BadFirstHalfEdge { vertex: v, half_edge: first });
                }
            }

            in_fans.extend(self.fan(v)?.half_edges().iter().cloned());
        }

        for he in self.half_edges() {
            if !in_fans.contains(&he) {
                let vertex = self.half_edges[he].start;
                return Err(TopologyError::IncompleteFan { vertex, half_edge: he });
            }
        }

        Ok(())
    }
}
