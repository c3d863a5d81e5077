//! GPU-side data layouts
//!
//! Every struct here is `Pod` and mirrors a WGSL declaration in `shaders/`.

use glam::Mat4;
use lattice_core::scene::{GalaxyInstance, Mesh, Star};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub fog_color: [f32; 4],
    /// near, far
    pub fog_range: [f32; 4],
    /// time, day, resonance, resonance_intensity
    pub params: [f32; 4],
    pub grid_color: [f32; 4],
    /// width, height, star twinkle
    pub viewport: [f32; 4],
    pub ambient: [f32; 4],
    pub key_light_pos: [f32; 4],
    pub key_light_color: [f32; 4],
    pub fill_light_pos: [f32; 4],
    pub fill_light_color: [f32; 4],
}

/// Per-draw transform and material.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    pub emissive: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, color: [f32; 3], opacity: f32, emissive: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], opacity],
            emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn from_points(points: &[glam::Vec3]) -> Vec<Self> {
        points
            .iter()
            .map(|p| Self {
                position: p.to_array(),
            })
            .collect()
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn from_mesh(mesh: &Mesh) -> Vec<Self> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.uvs)
            .map(|((p, n), uv)| Self {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Per-instance data for galaxies (slot 1) and stars (slot 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    /// xyz position, w size
    pub position_size: [f32; 4],
    pub color: [f32; 4],
}

impl PointInstance {
    const GALAXY_ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![3 => Float32x4, 4 => Float32x4];
    const STAR_ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    pub fn galaxy_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::GALAXY_ATTRIBS,
        }
    }

    pub fn star_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::STAR_ATTRIBS,
        }
    }
}

impl From<&GalaxyInstance> for PointInstance {
    fn from(galaxy: &GalaxyInstance) -> Self {
        let [r, g, b] = galaxy.color;
        Self {
            position_size: galaxy.position_size,
            color: [r, g, b, 1.0],
        }
    }
}

impl From<&Star> for PointInstance {
    fn from(star: &Star) -> Self {
        let [r, g, b] = star.color;
        let p = star.position;
        Self {
            position_size: [p.x, p.y, p.z, star.size],
            color: [r, g, b, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HudVertex {
    /// Normalised device coordinates.
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl HudVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}
