use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use std::{f32::consts::TAU, mem::offset_of};

/// Number of segments around the body if nothing else is requested.
pub const DEFAULT_DETAIL: u32 = 48;

/// Fewer segments than this would not resemble a teapot anymore.
pub const MIN_DETAIL: u32 = 8;

/// Keeps the vertex buffer far below the buffer size limits of downlevel devices.
pub const MAX_DETAIL: u32 = 512;

/// Radius (x) and height (y) of body, lid and knob, from the bottom center
/// up to the tip of the knob.
const BODY_PROFILE: [Vec2; 20] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.9, 0.0),
    Vec2::new(1.1, 0.05),
    Vec2::new(1.3, 0.25),
    Vec2::new(1.43, 0.55),
    Vec2::new(1.42, 0.85),
    Vec2::new(1.3, 1.1),
    Vec2::new(1.1, 1.27),
    Vec2::new(0.95, 1.33),
    Vec2::new(0.95, 1.38),
    Vec2::new(0.88, 1.42),
    Vec2::new(0.7, 1.5),
    Vec2::new(0.42, 1.57),
    Vec2::new(0.16, 1.61),
    Vec2::new(0.11, 1.66),
    Vec2::new(0.19, 1.73),
    Vec2::new(0.2, 1.79),
    Vec2::new(0.15, 1.84),
    Vec2::new(0.07, 1.865),
    Vec2::new(0.0, 1.87),
];

/// Moves the teapot down so that it is roughly centered around the origin.
const VERTICAL_OFFSET: f32 = -0.9;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Default)]
pub struct Vertex {
    /// homogeneous position in object space
    pub position: Vec4,
    // ---- 16 byte alignment
    /// unit normal in object space, `w` is always zero
    pub normal: Vec4,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: offset_of!(Vertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
        },
    ];

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.extend(1.0),
            normal: normal.normalize_or_zero().extend(0.0),
        }
    }

    #[must_use]
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list living in main memory.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// A point on a sweep path together with the direction of travel and the tube radius there.
struct PathSample {
    point: Vec3,
    tangent: Vec3,
    radius: f32,
}

impl MeshData {
    /// Builds a smooth shaded teapot with roughly unit size.
    ///
    /// `detail` is the number of segments around the body; spout and handle use half of it.
    /// It is clamped to `MIN_DETAIL..=MAX_DETAIL`.
    #[must_use]
    pub fn teapot(detail: u32) -> Self {
        let segments = detail.clamp(MIN_DETAIL, MAX_DETAIL);
        let mut mesh = Self::default();
        mesh.add_lathe(&BODY_PROFILE, segments);
        mesh.add_tube(spout, segments, segments / 2);
        mesh.add_tube(handle, segments, segments / 2);
        mesh
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis aligned bounding box as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), vertex| {
                let position = vertex.position.truncate();
                (min.min(position), max.max(position))
            },
        )
    }

    fn next_index(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "procedural meshes stay far below 2^32 vertices"
        )]
        let index = self.vertices.len() as u32;
        index
    }

    /// Revolve `profile` around the y axis.
    fn add_lathe(&mut self, profile: &[Vec2], segments: u32) {
        let base = self.next_index();

        for (index, point) in profile.iter().enumerate() {
            let previous = profile.get(index.wrapping_sub(1)).unwrap_or(point);
            let next = profile.get(index + 1).unwrap_or(point);
            let tangent = (*next - *previous).normalize_or_zero();
            // rotate clockwise to point away from the axis
            let profile_normal = Vec2::new(tangent.y, -tangent.x);

            for segment in 0..=segments {
                let (sin, cos) = segment_angle(segment, segments).sin_cos();
                let position = Vec3::new(point.x * cos, point.y + VERTICAL_OFFSET, point.x * sin);
                let normal = Vec3::new(
                    profile_normal.x * cos,
                    profile_normal.y,
                    profile_normal.x * sin,
                );
                self.vertices.push(Vertex::new(position, normal));
            }
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "profiles are tiny constant arrays"
        )]
        let rows = profile.len() as u32;
        self.add_grid_indices(base, rows, segments + 1);
    }

    /// Sweep a circle along `path` which lies in the x-y plane.
    fn add_tube(&mut self, path: fn(f32) -> PathSample, steps: u32, sides: u32) {
        let base = self.next_index();
        let sides = sides.max(3);

        for step in 0..=steps {
            #[expect(clippy::cast_precision_loss, reason = "step counts are small")]
            let parameter = step as f32 / steps as f32;
            let PathSample {
                point,
                tangent,
                radius,
            } = path(parameter);
            let binormal = Vec3::Z;
            let normal = tangent.cross(binormal).normalize_or_zero();

            for side in 0..=sides {
                let (sin, cos) = segment_angle(side, sides).sin_cos();
                let direction = normal * cos + binormal * sin;
                self.vertices
                    .push(Vertex::new(point + direction * radius, direction));
            }
        }

        self.add_grid_indices(base, steps + 1, sides + 1);
    }

    /// Two counter-clockwise triangles for each cell of a `rows` x `columns` vertex grid.
    fn add_grid_indices(&mut self, base: u32, rows: u32, columns: u32) {
        for row in 0..rows.saturating_sub(1) {
            for column in 0..columns.saturating_sub(1) {
                let current = base + row * columns + column;
                let above = current + columns;
                let above_next = above + 1;
                let next = current + 1;
                self.indices
                    .extend_from_slice(&[current, above, above_next, current, above_next, next]);
            }
        }
    }
}

fn segment_angle(segment: u32, segments: u32) -> f32 {
    #[expect(clippy::cast_precision_loss, reason = "segment counts are small")]
    let fraction = segment as f32 / segments as f32;
    TAU * fraction
}

/// Quadratic bezier from the body's side up to the tip, narrowing along the way.
fn spout(parameter: f32) -> PathSample {
    const START: Vec3 = Vec3::new(1.2, -0.45, 0.0);
    const CONTROL: Vec3 = Vec3::new(1.95, -0.4, 0.0);
    const END: Vec3 = Vec3::new(2.25, 0.45, 0.0);

    let inverse = 1.0 - parameter;
    let point = START * inverse * inverse
        + CONTROL * 2.0 * inverse * parameter
        + END * parameter * parameter;
    let tangent = (CONTROL - START) * 2.0 * inverse + (END - CONTROL) * 2.0 * parameter;

    PathSample {
        point,
        tangent: tangent.normalize(),
        radius: 0.3 - 0.2 * parameter,
    }
}

/// Cubic bezier bulging out of the body's back.
fn handle(parameter: f32) -> PathSample {
    const START: Vec3 = Vec3::new(-1.25, 0.2, 0.0);
    const FIRST_CONTROL: Vec3 = Vec3::new(-2.1, 0.4, 0.0);
    const SECOND_CONTROL: Vec3 = Vec3::new(-2.2, -0.7, 0.0);
    const END: Vec3 = Vec3::new(-1.3, -0.5, 0.0);

    let inverse = 1.0 - parameter;
    let point = START * inverse.powi(3)
        + FIRST_CONTROL * 3.0 * inverse * inverse * parameter
        + SECOND_CONTROL * 3.0 * inverse * parameter * parameter
        + END * parameter.powi(3);
    let tangent = (FIRST_CONTROL - START) * 3.0 * inverse * inverse
        + (SECOND_CONTROL - FIRST_CONTROL) * 6.0 * inverse * parameter
        + (END - SECOND_CONTROL) * 3.0 * parameter * parameter;

    PathSample {
        point,
        tangent: tangent.normalize(),
        radius: 0.09,
    }
}
