//! Render pipelines
//!
//! Every pipeline draws into the same pass, so all of them carry the depth
//! state even when they neither test nor write it.

use crate::gpu::{HudVertex, LineVertex, MeshVertex, PointInstance};
use crate::shaders::{self, ShaderKind};

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

struct PipelineDesc<'a> {
    label: &'static str,
    layout: &'a wgpu::PipelineLayout,
    module: &'a wgpu::ShaderModule,
    fragment: &'static str,
    buffers: &'a [wgpu::VertexBufferLayout<'static>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some(desc.fragment),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(desc.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

pub(crate) struct Pipelines {
    pub grid: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub lit: wgpu::RenderPipeline,
    pub lit_wire: wgpu::RenderPipeline,
    pub halo: wgpu::RenderPipeline,
    pub tether: wgpu::RenderPipeline,
    pub galaxy: wgpu::RenderPipeline,
    pub stars: wgpu::RenderPipeline,
    pub hud: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        use wgpu::CompareFunction::{Always, Less, LessEqual};
        use wgpu::PrimitiveTopology::{LineList, TriangleList};

        let frame_only = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("frame pipeline layout"),
            bind_group_layouts: &[frame_layout],
            push_constant_ranges: &[],
        });
        let with_object = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("object pipeline layout"),
            bind_group_layouts: &[frame_layout, object_layout],
            push_constant_ranges: &[],
        });
        let screen = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("hud pipeline layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let grid_shader = shaders::module(device, ShaderKind::Grid);
        let mesh_shader = shaders::module(device, ShaderKind::Mesh);
        let galaxy_shader = shaders::module(device, ShaderKind::Galaxy);
        let star_shader = shaders::module(device, ShaderKind::Stars);
        let line_shader = shaders::module(device, ShaderKind::Lines);
        let hud_shader = shaders::module(device, ShaderKind::Hud);

        let line_buffers = [LineVertex::layout()];
        let mesh_buffers = [MeshVertex::layout()];
        let galaxy_buffers = [MeshVertex::layout(), PointInstance::galaxy_layout()];
        let star_buffers = [PointInstance::star_layout()];
        let hud_buffers = [HudVertex::layout()];

        let (object_layout_ref, mesh_module, mesh_vertex) = (&with_object, &mesh_shader, &mesh_buffers[..]);
        let mesh = |label, fragment, topology, cull_mode, blend, depth_write| PipelineDesc {
            label,
            layout: object_layout_ref,
            module: mesh_module,
            fragment,
            buffers: mesh_vertex,
            topology,
            cull_mode,
            blend,
            depth_write,
            depth_compare: Less,
        };

        let pipelines = Self {
            grid: build_pipeline(
                device,
                format,
                PipelineDesc {
                    label: "grid pipeline",
                    layout: &frame_only,
                    module: &grid_shader,
                    fragment: "fs_main",
                    buffers: &line_buffers,
                    topology: LineList,
                    cull_mode: None,
                    blend: ADDITIVE,
                    depth_write: false,
                    depth_compare: Less,
                },
            ),
            lines: build_pipeline(
                device,
                format,
                PipelineDesc {
                    label: "constellation pipeline",
                    layout: &with_object,
                    module: &line_shader,
                    fragment: "fs_main",
                    buffers: &line_buffers,
                    topology: LineList,
                    cull_mode: None,
                    blend: wgpu::BlendState::ALPHA_BLENDING,
                    depth_write: false,
                    depth_compare: Less,
                },
            ),
            lit: build_pipeline(
                device,
                format,
                mesh(
                    "lit pipeline",
                    "fs_lit",
                    TriangleList,
                    Some(wgpu::Face::Back),
                    wgpu::BlendState::REPLACE,
                    true,
                ),
            ),
            lit_wire: build_pipeline(
                device,
                format,
                mesh("wireframe pipeline", "fs_lit", LineList, None, wgpu::BlendState::REPLACE, true),
            ),
            halo: build_pipeline(
                device,
                format,
                mesh("halo pipeline", "fs_basic", TriangleList, Some(wgpu::Face::Back), ADDITIVE, false),
            ),
            tether: build_pipeline(
                device,
                format,
                mesh("tether pipeline", "fs_tether", TriangleList, None, ADDITIVE, false),
            ),
            galaxy: build_pipeline(
                device,
                format,
                PipelineDesc {
                    label: "galaxy pipeline",
                    layout: &with_object,
                    module: &galaxy_shader,
                    fragment: "fs_main",
                    buffers: &galaxy_buffers,
                    topology: TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    blend: wgpu::BlendState::REPLACE,
                    depth_write: true,
                    depth_compare: Less,
                },
            ),
            stars: build_pipeline(
                device,
                format,
                PipelineDesc {
                    label: "star pipeline",
                    layout: &frame_only,
                    module: &star_shader,
                    fragment: "fs_main",
                    buffers: &star_buffers,
                    topology: TriangleList,
                    cull_mode: None,
                    blend: ADDITIVE,
                    depth_write: false,
                    depth_compare: LessEqual,
                },
            ),
            hud: build_pipeline(
                device,
                format,
                PipelineDesc {
                    label: "hud pipeline",
                    layout: &screen,
                    module: &hud_shader,
                    fragment: "fs_main",
                    buffers: &hud_buffers,
                    topology: TriangleList,
                    cull_mode: None,
                    blend: wgpu::BlendState::ALPHA_BLENDING,
                    depth_write: false,
                    depth_compare: Always,
                },
            ),
        };
        tracing::debug!(?format, "Created render pipelines");
        pipelines
    }
}

pub(crate) fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}
