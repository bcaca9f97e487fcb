/// Convenience macro to quickly write down a [`RawMesh`][crate::shape::RawMesh].
///
/// Vertices are named and the faces refer to them by name. The vertex indices
/// are assigned in the order the vertices are listed. Faces are not checked:
/// faces with more or less than three vertices end up in the raw mesh and
/// will be skipped when building a half edge mesh from it.
///
/// ```
/// use halfedge::raw_mesh;
///
/// let raw = raw_mesh! {
///     vertices: [
///         a: (0.0, 0.0, 0.0),
///         b: (1.0, 0.0, 0.0),
///         c: (0.0, 1.0, 0.0),
///         d: (1.0, 1.0, 0.0),
///     ],
///     faces: [
///         [a, b, c],
///         [b, d, c],
///     ],
/// };
///
/// assert_eq!(raw.faces, vec![vec![0, 1, 2], vec![1, 3, 2]]);
///
/// let mesh = raw.build();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_half_edges(), 6);
/// ```
#[macro_export]
macro_rules! raw_mesh {
    (
        vertices: [
            $( $vert_name:ident: ( $x:expr, $y:expr, $z:expr ) ),* $(,)?
        ],
        faces: [
            $( [ $($face_vert:ident),* $(,)? ] ),* $(,)?
        ] $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut raw = $crate::shape::RawMesh::default();

        $(
            #[allow(unused_variables)]
            let $vert_name = raw.positions.len();
            raw.positions.push($crate::cgmath::Point3::new($x as f64, $y as f64, $z as f64));
        )*

        $(
            raw.faces.push(vec![$($face_vert),*]);
        )*

        raw
    }};
}
