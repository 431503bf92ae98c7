//! # Mesh Handle
//!
//! WASM-friendly wrapper for one scene node that can be transferred to
//! JavaScript.

use serpentine_mesh::Mesh;
use serpentine_scene::{NodeKind, SceneNode};
use wasm_bindgen::prelude::*;

/// A handle to mesh data that can be accessed from JavaScript.
///
/// Buffers are in the node's local frame; apply [`MeshHandle::matrix`] as
/// the object's transform.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const studio = new TubeStudio();
/// studio.rebuild();
///
/// for (let i = 0; i < studio.tube_count; i++) {
///   const tube = studio.tube(i);
///   const geometry = new THREE.BufferGeometry();
///   geometry.setAttribute('position', new THREE.BufferAttribute(tube.vertices(), 3));
///   geometry.setAttribute('normal', new THREE.BufferAttribute(tube.normals(), 3));
///   geometry.setIndex(new THREE.BufferAttribute(tube.indices(), 1));
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    /// Node label, e.g. `top-left` or `cap1`
    name: String,
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Optional vertex normals as [nx, ny, nz, ...]
    normals: Option<Vec<f32>>,
    /// Column-major 4×4 object transform
    matrix: [f32; 16],
    cast_shadow: bool,
    receive_shadow: bool,
    /// Number of vertices
    vertex_count: u32,
    /// Number of triangles
    triangle_count: u32,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the node label.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Returns the number of triangles.
    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    #[wasm_bindgen(getter)]
    pub fn cast_shadow(&self) -> bool {
        self.cast_shadow
    }

    #[wasm_bindgen(getter)]
    pub fn receive_shadow(&self) -> bool {
        self.receive_shadow
    }

    /// Returns the vertex positions as a Float32Array.
    ///
    /// Format: [x, y, z, x, y, z, ...]
    /// Length: vertex_count * 3
    #[wasm_bindgen]
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    ///
    /// Format: [i0, i1, i2, i0, i1, i2, ...]
    /// Length: triangle_count * 3
    #[wasm_bindgen]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Returns the vertex normals as a Float32Array, if available.
    #[wasm_bindgen]
    pub fn normals(&self) -> Option<js_sys::Float32Array> {
        self.normals
            .as_ref()
            .map(|n| js_sys::Float32Array::from(&n[..]))
    }

    /// Returns the object transform as a column-major Float32Array,
    /// ready for `Matrix4.fromArray`.
    #[wasm_bindgen]
    pub fn matrix(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.matrix[..])
    }

    /// Returns true if the mesh has normals.
    #[wasm_bindgen]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Returns true if the mesh is empty.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

impl MeshHandle {
    /// Creates a handle for a scene node.
    pub fn from_node(node: &SceneNode) -> Self {
        let name = match node.kind {
            NodeKind::Tube(key) => key.to_string(),
            NodeKind::CapPart { cap, part: 0 } => format!("cap{}", cap + 1),
            NodeKind::CapPart { cap, part } => format!("cap{}-part{}", cap + 1, part),
        };
        let matrix = node.transform.matrix().to_cols_array().map(|v| v as f32);
        Self::build(name, &node.mesh, matrix, node.cast_shadow, node.receive_shadow)
    }

    /// Creates an untransformed handle, used for export bodies.
    pub fn from_mesh(name: impl Into<String>, mesh: &Mesh) -> Self {
        let identity = glam::Mat4::IDENTITY.to_cols_array();
        Self::build(name.into(), mesh, identity, false, false)
    }

    fn build(
        name: String,
        mesh: &Mesh,
        matrix: [f32; 16],
        cast_shadow: bool,
        receive_shadow: bool,
    ) -> Self {
        Self {
            name,
            vertices: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
            normals: mesh.normals_f32(),
            matrix,
            cast_shadow,
            receive_shadow,
            vertex_count: mesh.vertex_count() as u32,
            triangle_count: mesh.triangle_count() as u32,
        }
    }

    /// Vertex buffer without crossing into JavaScript.
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    /// Index buffer without crossing into JavaScript.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// Object transform without crossing into JavaScript.
    pub fn matrix_array(&self) -> [f32; 16] {
        self.matrix
    }
}
