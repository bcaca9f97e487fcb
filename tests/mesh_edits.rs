use std::collections::BTreeSet;

use halfedge::{
    cgmath::{prelude::*, Point3},
    prelude::*,
    raw_mesh,
    shape::{Disc, Sphere, Tetrahedron},
    TopologyError,
};


fn sphere() -> HalfEdgeMesh {
    Sphere::default().build()
}

fn length(mesh: &HalfEdgeMesh, he: HalfEdgeHandle) -> f64 {
    mesh.half_edge_ref(he).length()
}


#[test]
fn closed_mesh_has_no_boundary() {
    for mesh in vec![sphere(), Tetrahedron::default().build()] {
        assert!(mesh.num_half_edges() > 0);
        for he in mesh.half_edges() {
            let twin = mesh[he].opposite().expect("closed mesh has boundary half edge");
            assert_eq!(mesh[twin].opposite(), Some(he));
            assert_eq!(mesh.endpoints(twin), [mesh.endpoints(he)[1], mesh.endpoints(he)[0]]);
        }
        for v in mesh.vertices() {
            assert_eq!(mesh.is_boundary_vertex(v), Ok(false));
        }
        mesh.check_integrity().unwrap();
    }
}

#[test]
fn face_loops_close_after_three_steps() {
    let mesh = sphere();
    for f in mesh.faces() {
        let start = mesh.face_ref(f).half_edge();
        let mut he = start;
        for _ in 0..3 {
            assert_eq!(he.face().handle(), f);
            he = he.next();
        }
        assert_eq!(he.handle(), start.handle());
        assert_eq!(start.prev().prev().prev().handle(), start.handle());
    }
}

#[test]
fn split_on_closed_mesh() {
    let mut mesh = sphere();
    let num_faces = mesh.num_faces();
    let num_vertices = mesh.num_vertices();

    let he = mesh.half_edges().nth(17).unwrap();
    let [from, to] = mesh.endpoints(he);
    let expected = Point3::from_vec((mesh.position(from).to_vec() + mesh.position(to).to_vec()) * 0.5);

    let split = mesh.split_edge(he);

    assert_eq!(mesh.position(split.vertex), expected);
    assert_eq!(mesh.num_faces(), num_faces + 2);
    assert_eq!(mesh.num_vertices(), num_vertices + 1);
    assert_eq!(mesh.faces_around_vertex(split.vertex).unwrap().len(), 4);
    assert_eq!(mesh.valence(split.vertex), Ok(4));
    mesh.check_integrity().unwrap();
}

#[test]
fn split_on_boundary() {
    let mut mesh = Disc::default().build();
    let boundary = mesh.half_edges()
        .find(|&he| mesh.is_boundary_half_edge(he))
        .unwrap();

    let split = mesh.split_edge(boundary);

    assert_eq!(split.new_opposite_face, None);
    assert_eq!(mesh.num_faces(), 17);
    assert!(split.half_edges.iter().all(|&he| mesh.is_boundary_half_edge(he)));
    assert_eq!(mesh.faces_around_vertex(split.vertex).unwrap().len(), 2);
    mesh.check_integrity().unwrap();
}

#[test]
fn collapse_rejects_long_edges() {
    let mut mesh = sphere();
    let before = format!("{:?}", mesh);
    let he = mesh.half_edges().nth(40).unwrap();
    let len = length(&mesh, he);

    // Any neighbor is at least half the edge length away from the midpoint
    let max = 0.1 * len;
    assert_eq!(mesh.collapse_edge(he, max * max), Ok(false));
    assert_eq!(format!("{:?}", mesh), before);
}

#[test]
fn interior_collapse_removes_two_faces() {
    let mut mesh = sphere();
    let he = mesh.half_edges().nth(40).unwrap();
    let twin = mesh[he].opposite().unwrap();
    let [from, _] = mesh.endpoints(he);
    let faces_before = mesh.faces().collect::<BTreeSet<_>>();

    assert_eq!(mesh.collapse_edge(he, f64::INFINITY), Ok(true));

    let faces_after = mesh.faces().collect::<BTreeSet<_>>();
    let removed = faces_before.difference(&faces_after).cloned().collect::<BTreeSet<_>>();
    let expected = [mesh[he].face(), mesh[twin].face()].iter().cloned().collect::<BTreeSet<_>>();
    assert_eq!(removed, expected);
    assert!(faces_after.is_subset(&faces_before));

    assert!(mesh.is_vertex_removed(from));
    mesh.check_integrity().unwrap();
}

#[test]
fn boundary_collapse_removes_one_face() {
    let mut mesh = Disc::default().build();
    let num_faces = mesh.num_faces();
    let boundary = mesh.half_edges()
        .find(|&he| mesh.is_boundary_half_edge(he))
        .unwrap();

    assert_eq!(mesh.collapse_edge(boundary, f64::INFINITY), Ok(true));
    assert_eq!(mesh.num_faces(), num_faces - 1);
    assert!(mesh.is_face_removed(mesh[boundary].face()));
    mesh.check_integrity().unwrap();
}

#[test]
fn average_edge_length_of_right_triangle() {
    let raw = raw_mesh! {
        vertices: [
            a: (0.0, 0.0, 0.0),
            b: (1.0, 0.0, 0.0),
            c: (0.0, 1.0, 0.0),
        ],
        faces: [
            [a, b, c],
        ],
    };

    let expected = (2.0 + 2.0f64.sqrt()) / 3.0;
    assert!((raw.build().average_edge_length() - expected).abs() < 1e-12);
}

#[test]
fn malformed_input_is_skipped() {
    let raw = raw_mesh! {
        vertices: [
            a: (0.0, 0.0, 0.0),
            b: (1.0, 0.0, 0.0),
            c: (0.0, 1.0, 0.0),
            d: (1.0, 1.0, 0.0),
        ],
        faces: [
            [a, b, d, c],
            [a, b, c],
            [a, b, d],
        ],
    };

    let (mesh, report) = raw.build_with_report();
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(report.skipped_faces, 1);
    assert_eq!(report.duplicate_half_edges, 1);

    // Both faces contain `a -> b`, so they can't be connected around `a`
    match mesh.check_integrity() {
        Err(TopologyError::IncompleteFan { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn refs_navigate_the_mesh() {
    let mesh = Tetrahedron::default().build();
    let v = mesh.vertices().next().unwrap();
    let vertex = mesh.vertex_ref(v);

    assert_eq!(vertex.adjacent_vertices().unwrap().len(), 3);
    assert_eq!(vertex.adjacent_faces().unwrap().len(), 3);
    for he in vertex.outgoing_half_edges().unwrap() {
        assert_eq!(he.start().handle(), v);
        assert_eq!(he.twin().unwrap().end().handle(), v);
        assert!(!he.is_boundary());
    }

    let face = mesh.faces().next().unwrap();
    let face = mesh.face_ref(face);
    let [a, b, c] = face.vertices();
    assert_eq!([a.handle(), b.handle(), c.handle()], mesh.vertices_of_face(face.handle()));
    assert!(face.area() > 0.0);
    assert!(std::ptr::eq(face.mesh(), &mesh));

    let sum = a.position().to_vec() + b.position().to_vec() + c.position().to_vec();
    assert!((face.centroid().to_vec() - sum / 3.0).magnitude() < 1e-12);
}

#[test]
fn repeated_remeshing_passes_stay_consistent() {
    let mut mesh = sphere();

    for _ in 0..2 {
        let avg = mesh.average_edge_length();
        let high = 4.0 / 3.0 * avg;
        let low = 0.5 * avg;

        // Split long edges
        let long = mesh.half_edges()
            .filter(|&he| length(&mesh, he) > high)
            .collect::<Vec<_>>();
        for he in long {
            if mesh.contains_half_edge(he) && length(&mesh, he) > high {
                mesh.split_edge(he);
            }
        }
        mesh.check_integrity().unwrap();

        // Collapse short edges, unless that creates long ones
        let short = mesh.half_edges()
            .filter(|&he| length(&mesh, he) < low)
            .collect::<Vec<_>>();
        for he in short {
            if mesh.contains_half_edge(he) && length(&mesh, he) < low {
                mesh.collapse_edge(he, high * high).unwrap();
            }
        }
        mesh.check_integrity().unwrap();

        let purged = mesh.purge_removed();
        assert_eq!(purged.half_edges, 3 * purged.faces);
        mesh.check_integrity().unwrap();
    }

    assert!(mesh.num_faces() > 0);
}

#[test]
fn cursor_visits_faces_created_during_the_pass() {
    let mut mesh = Disc { faces: 4, ..Disc::default() }.build();
    let mut visited = 0;

    let mut cursor = mesh.next_face_from(None);
    while let Some(face) = cursor {
        visited += 1;
        if face.idx() < 4 {
            let he = mesh[face].half_edge();
            mesh.split_edge(he);
        }
        cursor = mesh.next_face_from(Some(face));
    }

    assert_eq!(mesh.num_faces() as usize, visited);
}
