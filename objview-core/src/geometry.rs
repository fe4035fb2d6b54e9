/// Mesh primitives: vertices, polygon faces and the edges derived from them
use nalgebra::Point3;

/// A model-space vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// A polygon given as 0-based indices into the vertex list, at least three long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Cyclic edges of the polygon, last vertex wrapping back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| Edge::new(self.indices[i], self.indices[(i + 1) % n]))
    }
}

/// An undirected edge. The smaller index is always stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    first: usize,
    second: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }
}

/// Vertex, face and edge lists of a loaded model.
///
/// Edges are derived from faces on insertion and are not deduplicated: an
/// edge shared by two faces appears twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the mesh lacks vertices or faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.edges.clear();
    }

    pub(crate) fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Append a face and its cyclic edges. Indices are assumed already validated.
    pub(crate) fn push_face(&mut self, face: Face) {
        self.edges.extend(face.edges());
        self.faces.push(face);
    }

    /// Create a cube centred on the origin, built from six quads
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.push_vertex(Vertex::new(x, y, z));
        }

        // Back, front, bottom, top, left, right
        for quad in [
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [3, 7, 6, 2],
            [0, 4, 7, 3],
            [1, 2, 6, 5],
        ] {
            mesh.push_face(Face::new(quad.to_vec()));
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical_order() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        let edge = Edge::new(5, 2);
        assert_eq!(edge.first(), 2);
        assert_eq!(edge.second(), 5);
    }

    #[test]
    fn test_face_edges_wrap() {
        let face = Face::new(vec![0, 1, 2]);
        let edges: Vec<Edge> = face.edges().collect();
        assert_eq!(edges, vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)]);
    }

    #[test]
    fn test_shared_edges_not_deduplicated() {
        let mut mesh = Mesh::new();
        for _ in 0..4 {
            mesh.push_vertex(Vertex::new(0.0, 0.0, 0.0));
        }
        mesh.push_face(Face::new(vec![0, 1, 2]));
        mesh.push_face(Face::new(vec![2, 1, 3]));
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(
            mesh.edges().iter().filter(|e| **e == Edge::new(1, 2)).count(),
            2
        );
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.edge_count(), 24);
        assert!(!cube.is_empty());
        assert!(cube
            .vertices()
            .iter()
            .all(|v| v.position.coords.amax() == 1.0));
    }

    #[test]
    fn test_clear() {
        let mut mesh = Mesh::cube(1.0);
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.edge_count(), 0);
        assert_eq!(mesh, Mesh::new());
    }
}
