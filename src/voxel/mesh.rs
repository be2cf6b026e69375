//! Quad mesh with per-vertex colors, shared by chunks and trees

use glam::Vec3;

/// Vertex + quad-face mesh with one color per vertex.
///
/// `origin` records where the mesh has been placed in world space; a freshly
/// built mesh sits at the local origin. Geometry is read-only once built.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 4]>,
    colors: Vec<[u8; 3]>,
    origin: Vec3,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 4]] {
        &self.faces
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// World-space origin this mesh was last translated to.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Whether the mesh has been moved off its locally-built origin.
    pub fn is_placed(&self) -> bool {
        self.origin != Vec3::ZERO
    }

    /// Number of vertices; face indices are relative to this.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn push_vertex(&mut self, vertex: Vec3, color: [u8; 3]) {
        self.vertices.push(vertex);
        self.colors.push(color);
    }

    pub fn push_face(&mut self, face: [u32; 4]) {
        self.faces.push(face);
    }

    /// Move every vertex by `offset` and record the new origin.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
        self.origin += offset;
    }

    /// Append another mesh, re-basing its face indices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertex_count();
        self.vertices.extend_from_slice(&other.vertices);
        self.colors.extend_from_slice(&other.colors);
        self.faces.extend(other.faces.iter().map(|f| f.map(|i| i + base)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), [1, 2, 3]);
        mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), [1, 2, 3]);
        mesh.push_vertex(Vec3::new(1.0, 1.0, 0.0), [1, 2, 3]);
        mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), [1, 2, 3]);
        mesh.push_face([0, 1, 2, 3]);
        mesh
    }

    #[test]
    fn test_translate_records_origin() {
        let mut mesh = quad();
        assert!(!mesh.is_placed());

        mesh.translate(Vec3::new(16.0, 32.0, 0.0));
        assert!(mesh.is_placed());
        assert_eq!(mesh.origin(), Vec3::new(16.0, 32.0, 0.0));
        assert_eq!(mesh.vertices()[0], Vec3::new(16.0, 32.0, 0.0));
        assert_eq!(mesh.vertices()[2], Vec3::new(17.0, 33.0, 0.0));
    }

    #[test]
    fn test_append_rebases_faces() {
        let mut a = quad();
        let b = quad();
        a.append(&b);

        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.colors().len(), 8);
        assert_eq!(a.faces(), &[[0, 1, 2, 3], [4, 5, 6, 7]]);
    }
}
