//! Temporal Lattice Render System
//!
//! wgpu pipelines for the lattice scene, the orbit camera and the HUD.

pub mod backend;
pub mod camera;
pub mod gpu;
pub mod hud;
mod pipelines;
pub mod renderer;
mod shaders;
pub mod window;

pub use camera::OrbitCamera;
pub use renderer::SceneRenderer;
pub use window::WindowConfig;

pub use wgpu;
pub use winit;

/// Rendering backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 12 (Windows)
    DirectX12,
    /// Vulkan (cross-platform)
    Vulkan,
    /// OpenGL (cross-platform, fallback)
    OpenGL,
    /// WebGPU (web)
    WebGpu,
    /// No backend (tests, headless)
    Empty,
}

/// Capability probe result
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    pub backend: BackendType,
    pub adapter_name: String,
    pub max_texture_size: u32,
    pub webgpu_compliant: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to open device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    UnsupportedSurface,

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
