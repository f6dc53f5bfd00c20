use fluids_math::Matrix4f;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// The single triangle every variant started from.
    pub fn triangle() -> Self {
        let n = [0.0, 0.0, 1.0];
        Self {
            vertices: vec![
                Vertex::new([-1.0, -1.0, 0.0], n),
                Vertex::new([1.0, -1.0, 0.0], n),
                Vertex::new([0.0, 1.0, 0.0], n),
            ],
            indices: vec![0, 1, 2],
        }
    }

    /// Axis-aligned cube centred on the origin with the given half extent.
    pub fn cube(half: f32) -> Self {
        let p = half;
        #[rustfmt::skip]
        let vertices = vec![
            // +Z face
            Vertex::new([-p, -p,  p], [0.0, 0.0, 1.0]),
            Vertex::new([ p, -p,  p], [0.0, 0.0, 1.0]),
            Vertex::new([ p,  p,  p], [0.0, 0.0, 1.0]),
            Vertex::new([-p,  p,  p], [0.0, 0.0, 1.0]),
            // -Z face
            Vertex::new([ p, -p, -p], [0.0, 0.0, -1.0]),
            Vertex::new([-p, -p, -p], [0.0, 0.0, -1.0]),
            Vertex::new([-p,  p, -p], [0.0, 0.0, -1.0]),
            Vertex::new([ p,  p, -p], [0.0, 0.0, -1.0]),
            // +X face
            Vertex::new([ p, -p,  p], [1.0, 0.0, 0.0]),
            Vertex::new([ p, -p, -p], [1.0, 0.0, 0.0]),
            Vertex::new([ p,  p, -p], [1.0, 0.0, 0.0]),
            Vertex::new([ p,  p,  p], [1.0, 0.0, 0.0]),
            // -X face
            Vertex::new([-p, -p, -p], [-1.0, 0.0, 0.0]),
            Vertex::new([-p, -p,  p], [-1.0, 0.0, 0.0]),
            Vertex::new([-p,  p,  p], [-1.0, 0.0, 0.0]),
            Vertex::new([-p,  p, -p], [-1.0, 0.0, 0.0]),
            // +Y face
            Vertex::new([-p,  p,  p], [0.0, 1.0, 0.0]),
            Vertex::new([ p,  p,  p], [0.0, 1.0, 0.0]),
            Vertex::new([ p,  p, -p], [0.0, 1.0, 0.0]),
            Vertex::new([-p,  p, -p], [0.0, 1.0, 0.0]),
            // -Y face
            Vertex::new([-p, -p, -p], [0.0, -1.0, 0.0]),
            Vertex::new([ p, -p, -p], [0.0, -1.0, 0.0]),
            Vertex::new([ p, -p,  p], [0.0, -1.0, 0.0]),
            Vertex::new([-p, -p,  p], [0.0, -1.0, 0.0]),
        ];
        #[rustfmt::skip]
        let indices: Vec<u16> = vec![
            0,1,2, 2,3,0,       // +Z
            4,5,6, 6,7,4,       // -Z
            8,9,10, 10,11,8,    // +X
            12,13,14, 14,15,12, // -X
            16,17,18, 18,19,16, // +Y
            20,21,22, 22,23,20, // -Y
        ];
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One placed copy of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub model: Matrix4f,
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(model: Matrix4f, color: [f32; 4]) -> Self {
        Self { model, color }
    }
}
