//! Rendering backend probing
//!
//! wgpu picks the backend; this module reports what it picked and chooses a
//! surface format.

use crate::{BackendType, DeviceCapabilities};

pub fn backend_type(backend: wgpu::Backend) -> BackendType {
    match backend {
        wgpu::Backend::Metal => BackendType::Metal,
        wgpu::Backend::Dx12 => BackendType::DirectX12,
        wgpu::Backend::Vulkan => BackendType::Vulkan,
        wgpu::Backend::Gl => BackendType::OpenGL,
        wgpu::Backend::BrowserWebGpu => BackendType::WebGpu,
        wgpu::Backend::Empty => BackendType::Empty,
    }
}

/// Probe available rendering capabilities
pub fn probe_capabilities(adapter: &wgpu::Adapter) -> DeviceCapabilities {
    let info = adapter.get_info();
    let limits = adapter.limits();
    let downlevel = adapter.get_downlevel_capabilities();
    DeviceCapabilities {
        backend: backend_type(info.backend),
        adapter_name: info.name,
        max_texture_size: limits.max_texture_dimension_2d,
        webgpu_compliant: downlevel.is_webgpu_compliant(),
    }
}

/// Colours are authored in linear space, so an sRGB target is preferred.
pub fn preferred_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_srgb() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(
            preferred_surface_format(&formats),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(preferred_surface_format(&[]), None);
    }

    #[test]
    fn maps_backends() {
        assert_eq!(backend_type(wgpu::Backend::Vulkan), BackendType::Vulkan);
        assert_eq!(backend_type(wgpu::Backend::Gl), BackendType::OpenGL);
    }
}
