//! Simple geometric shapes that can be turned into meshes.
//!
//! Each shape generates a [`RawMesh`]: a list of vertex positions and a list
//! of faces given as vertex indices, which is exactly the input of
//! [`HalfEdgeMesh::from_arrays`]. All faces are oriented counter clock wise
//! when looked at from outside.

use std::f64::consts::PI;

use cgmath::{
    Point3, Vector3,
    prelude::*,
};

use crate::mesh::{BuildReport, HalfEdgeMesh};


/// Vertex positions and faces as index lists, not yet connected.
///
/// Can also be created with the [`raw_mesh`][crate::raw_mesh] macro.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    pub positions: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl RawMesh {
    /// Builds a half edge mesh from this data. See
    /// [`HalfEdgeMesh::from_arrays`].
    pub fn build(&self) -> HalfEdgeMesh {
        HalfEdgeMesh::from_arrays(&self.positions, &self.faces)
    }

    /// Like [`build`][Self::build], but also returns the report about
    /// problems in the data.
    pub fn build_with_report(&self) -> (HalfEdgeMesh, BuildReport) {
        HalfEdgeMesh::from_arrays_with_report(&self.positions, &self.faces)
    }

    fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    fn add_face(&mut self, indices: [usize; 3]) {
        self.faces.push(indices.to_vec());
    }
}

/// Something that can generate a [`RawMesh`].
pub trait Shape {
    fn raw_mesh(&self) -> RawMesh;

    /// Generates the raw data and builds a half edge mesh from it.
    fn build(&self) -> HalfEdgeMesh {
        self.raw_mesh().build()
    }
}


/// A flat round disc that lies in the XY-plane and which normals point upwards
/// (+z). All outer edges are boundary edges.
#[derive(Debug)]
pub struct Disc {
    /// The number of faces generated for the disc. Has to be at least 3 or
    /// else creating a mesh will panic. *Default*: 16.
    pub faces: u32,

    /// The center point of the disc. *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// The outer radius (with ∞ faces, this would be the real radius).
    /// *Default*: 1.0.
    pub radius: f64,
}

impl Default for Disc {
    fn default() -> Self {
        Self {
            faces: 16,
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Disc {
    fn raw_mesh(&self) -> RawMesh {
        assert!(
            self.faces >= 3,
            "trying to build a disc with {} faces (minimum is 3)",
            self.faces,
        );

        // We create vertices in counter clock wise order around the center,
        // the first one starting at [r, 0, 0]. This is looking top down onto
        // the disc:
        //
        //      3 _
        //      |   ‾ – _
        //      |         2
        //      |  B    ⋰  \
        //      |     ⋰     \
        //      |   ⋰   A    \
        //      | ⋰           \
        //      0 ------------ 1
        //
        // Vertex 0 is the center, vertex 1 the first outer one. Face A is the
        // first face, face B the second one and so on.
        let mut raw = RawMesh::default();
        let center = raw.add_vertex(self.center);
        let first = raw.add_vertex(self.center + Vector3::new(self.radius, 0.0, 0.0));

        let mut last = first;
        for i in 1..self.faces {
            let angle = (i as f64 / self.faces as f64) * 2.0 * PI;
            let v = raw.add_vertex(self.center + Vector3::new(
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                0.0,
            ));
            raw.add_face([center, last, v]);
            last = v;
        }

        // Close the ring
        raw.add_face([center, last, first]);

        raw
    }
}


/// A regular tetrahedron centered around the origin. Its four vertices lie
/// on alternating corners of the cube `[-1, 1]³`, scaled by `scale`.
#[derive(Debug)]
pub struct Tetrahedron {
    /// *Default*: 1.0.
    pub scale: f64,
}

impl Default for Tetrahedron {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Shape for Tetrahedron {
    fn raw_mesh(&self) -> RawMesh {
        let s = self.scale;
        RawMesh {
            positions: vec![
                Point3::new(s, s, s),
                Point3::new(s, -s, -s),
                Point3::new(-s, s, -s),
                Point3::new(-s, -s, s),
            ],
            faces: vec![
                vec![0, 1, 2],
                vec![0, 3, 1],
                vec![0, 2, 3],
                vec![1, 3, 2],
            ],
        }
    }
}


/// A regular octahedron with its six vertices on the coordinate axes.
///
/// Vertices are created in the order `+x`, `-x`, `+y`, `-y`, `+z`, `-z`.
#[derive(Debug)]
pub struct Octahedron {
    /// Distance of all vertices from the origin. *Default*: 1.0.
    pub radius: f64,
}

impl Default for Octahedron {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl Shape for Octahedron {
    fn raw_mesh(&self) -> RawMesh {
        let r = self.radius;
        RawMesh {
            positions: vec![
                Point3::new(r, 0.0, 0.0),
                Point3::new(-r, 0.0, 0.0),
                Point3::new(0.0, r, 0.0),
                Point3::new(0.0, -r, 0.0),
                Point3::new(0.0, 0.0, r),
                Point3::new(0.0, 0.0, -r),
            ],
            faces: vec![
                // Upper half
                vec![4, 0, 2],
                vec![4, 2, 1],
                vec![4, 1, 3],
                vec![4, 3, 0],

                // Lower half
                vec![5, 2, 0],
                vec![5, 1, 2],
                vec![5, 3, 1],
                vec![5, 0, 3],
            ],
        }
    }
}


/// A closed "UV sphere" around `center` with its poles on the z-axis.
///
/// The surface is divided by `num_latitudes - 1` rings of
/// `num_longitudes` vertices each. Between two rings, each quad is split into
/// two triangles. The poles are connected to the first and last ring by
/// triangle fans.
#[derive(Debug)]
pub struct Sphere {
    /// Number of horizontal bands. Has to be at least 2. *Default*: 8.
    pub num_latitudes: u32,

    /// Number of vertices per ring. Has to be at least 3. *Default*: 16.
    pub num_longitudes: u32,

    /// *Default*: `[0, 0, 0]`.
    pub center: Point3<f64>,

    /// *Default*: 1.0.
    pub radius: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            num_latitudes: 8,
            num_longitudes: 16,
            center: Point3::origin(),
            radius: 1.0,
        }
    }
}

impl Shape for Sphere {
    fn raw_mesh(&self) -> RawMesh {
        assert!(
            self.num_latitudes >= 2,
            "trying to build a sphere with {} latitudes (minimum is 2)",
            self.num_latitudes,
        );
        assert!(
            self.num_longitudes >= 3,
            "trying to build a sphere with {} longitudes (minimum is 3)",
            self.num_longitudes,
        );

        let mut raw = RawMesh::default();
        let lon = self.num_longitudes as usize;
        let on_sphere = |theta: f64, phi: f64| {
            self.center + self.radius * Vector3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            )
        };

        let north = raw.add_vertex(self.center + Vector3::new(0.0, 0.0, self.radius));
        let south = raw.add_vertex(self.center - Vector3::new(0.0, 0.0, self.radius));

        // All rings from north to south. `rings[i] + j` is the index of the
        // `j`-th vertex of ring `i`.
        let rings = (1..self.num_latitudes)
            .map(|i| {
                let theta = PI * i as f64 / self.num_latitudes as f64;
                let ring_start = raw.positions.len();
                for j in 0..lon {
                    let phi = 2.0 * PI * j as f64 / lon as f64;
                    raw.add_vertex(on_sphere(theta, phi));
                }
                ring_start
            })
            .collect::<Vec<_>>();

        for j in 0..lon {
            let j_next = (j + 1) % lon;

            // North cap
            let top = rings[0];
            raw.add_face([north, top + j, top + j_next]);

            // Bands between two rings
            for pair in rings.windows(2) {
                let (upper, lower) = (pair[0], pair[1]);
                raw.add_face([upper + j, lower + j, lower + j_next]);
                raw.add_face([upper + j, lower + j_next, upper + j_next]);
            }

            // South cap
            let bottom = rings[rings.len() - 1];
            raw.add_face([south, bottom + j_next, bottom + j]);
        }

        raw
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the number of edges, counting each undirected edge once.
    fn num_edges(raw: &RawMesh) -> usize {
        let mut edges = raw.faces.iter()
            .flat_map(|f| (0..3).map(move |i| {
                let (a, b) = (f[i], f[(i + 1) % 3]);
                (a.min(b), a.max(b))
            }))
            .collect::<Vec<_>>();
        edges.sort();
        edges.dedup();
        edges.len()
    }

    #[test]
    fn closed_shapes_have_euler_characteristic_two() {
        let shapes: Vec<Box<dyn Shape>> = vec![
            Box::new(Tetrahedron::default()),
            Box::new(Octahedron::default()),
            Box::new(Sphere::default()),
            Box::new(Sphere { num_latitudes: 2, num_longitudes: 3, ..Sphere::default() }),
        ];

        for shape in shapes {
            let raw = shape.raw_mesh();
            let v = raw.positions.len() as i64;
            let e = num_edges(&raw) as i64;
            let f = raw.faces.len() as i64;
            assert_eq!(v - e + f, 2);
        }
    }

    #[test]
    fn disc_counts() {
        let raw = Disc { faces: 6, ..Disc::default() }.raw_mesh();
        assert_eq!(raw.positions.len(), 7);
        assert_eq!(raw.faces.len(), 6);
        assert!(raw.faces.iter().all(|f| f[0] == 0));
    }

    #[test]
    fn sphere_vertices_on_surface() {
        let sphere = Sphere {
            center: Point3::new(1.0, 2.0, 3.0),
            radius: 2.5,
            ..Sphere::default()
        };
        let raw = sphere.raw_mesh();

        assert_eq!(raw.positions.len(), 2 + 7 * 16);
        assert_eq!(raw.faces.len(), 2 * 16 + 2 * 6 * 16);
        for &p in &raw.positions {
            assert!((p.distance(sphere.center) - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    #[should_panic(expected = "minimum is 3")]
    fn disc_too_few_faces() {
        Disc { faces: 2, ..Disc::default() }.raw_mesh();
    }
}
