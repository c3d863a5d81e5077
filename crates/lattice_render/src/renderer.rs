//! Scene renderer
//!
//! One render pass per frame: opaque bodies first, then the translucent and
//! additive layers, then the HUD on top.

use crate::backend::{preferred_surface_format, probe_capabilities};
use crate::camera::OrbitCamera;
use crate::gpu::{FrameUniforms, HudVertex, LineVertex, MeshVertex, ObjectUniforms, PointInstance};
use crate::pipelines::{uniform_layout, Pipelines, DEPTH_FORMAT};
use crate::{hud, DeviceCapabilities, RenderError};
use glam::{Mat4, Vec3};
use lattice_core::resonance::{FOG_FAR, FOG_NEAR};
use lattice_core::scene::constellations::LINE_OPACITY;
use lattice_core::scene::mesh::uv_sphere;
use lattice_core::scene::starfield::twinkle;
use lattice_core::scene::{GalaxyField, Mesh, Scene};
use lattice_services::hud::HudShape;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Galaxies are small; a coarse sphere is enough.
const GALAXY_SPHERE_SEGMENTS: (u32, u32) = (12, 8);
const HUD_VERTEX_CAPACITY: usize = 512;

/// Per-frame scene uniforms for a `width` x `height` target.
pub fn frame_uniforms(scene: &Scene, camera: &OrbitCamera, width: u32, height: u32) -> FrameUniforms {
    let env = &scene.environment;
    let grid = scene.grid.params();
    let moon = scene.moon.state();
    let rgbw = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
    let a = env.ambient_intensity;

    FrameUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        view: camera.view().to_cols_array_2d(),
        camera_pos: camera.eye().extend(1.0).to_array(),
        fog_color: rgbw(env.background, 1.0),
        fog_range: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
        params: [grid.time, grid.day, moon.resonance, grid.resonance_intensity],
        grid_color: rgbw(scene.grid.spec().color, 1.0),
        viewport: [width.max(1) as f32, height.max(1) as f32, twinkle(grid.time), 0.0],
        ambient: [a, a, a, 1.0],
        key_light_pos: env.key_light.position.extend(1.0).to_array(),
        key_light_color: rgbw(env.key_light.color, env.key_light.intensity),
        fill_light_pos: env.fill_light.position.extend(1.0).to_array(),
        fill_light_color: rgbw(env.fill_light.color, env.fill_light.intensity),
    }
}

/// Transforms and materials of every object drawn this frame.
#[derive(Debug, Clone, Copy)]
pub struct ObjectFrame {
    pub core: ObjectUniforms,
    pub halo: ObjectUniforms,
    pub moon: ObjectUniforms,
    pub tether: ObjectUniforms,
    pub galaxies: ObjectUniforms,
    pub constellations: ObjectUniforms,
}

impl ObjectFrame {
    pub fn from_scene(scene: &Scene) -> Self {
        let moon = &scene.moon;
        let core_material = moon.core_material();
        let moon_material = moon.moon_material();
        let state = moon.state();
        let none = [0.0; 3];
        let white = [1.0; 3];
        Self {
            core: ObjectUniforms::new(Mat4::IDENTITY, core_material.color, 1.0, core_material.emissive),
            halo: ObjectUniforms::new(Mat4::IDENTITY, white, state.halo_opacity, none),
            moon: ObjectUniforms::new(
                moon.moon_transform(),
                moon_material.color,
                1.0,
                moon_material.emissive,
            ),
            tether: ObjectUniforms::new(moon.tether_transform(), white, 1.0, none),
            galaxies: ObjectUniforms::new(scene.galaxies.rotation(), white, 1.0, none),
            constellations: ObjectUniforms::new(Mat4::IDENTITY, white, LINE_OPACITY, none),
        }
    }
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ObjectUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, uniforms: &ObjectUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, label: &str, mesh: &Mesh, indices: &[u32]) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&MeshVertex::from_mesh(mesh)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices: index_buffer,
            index_count: indices.len() as u32,
        }
    }

    fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
    }
}

/// A static vertex buffer and its element count.
struct Batch {
    buffer: wgpu::Buffer,
    count: u32,
}

impl Batch {
    fn new<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, data: &[T]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Some(Self {
            buffer,
            count: data.len() as u32,
        })
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

struct Objects {
    core: ObjectSlot,
    halo: ObjectSlot,
    moon: ObjectSlot,
    tether: ObjectSlot,
    galaxies: ObjectSlot,
    constellations: ObjectSlot,
}

impl Objects {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        Self {
            core: ObjectSlot::new(device, layout, "core uniforms"),
            halo: ObjectSlot::new(device, layout, "halo uniforms"),
            moon: ObjectSlot::new(device, layout, "moon uniforms"),
            tether: ObjectSlot::new(device, layout, "tether uniforms"),
            galaxies: ObjectSlot::new(device, layout, "galaxy uniforms"),
            constellations: ObjectSlot::new(device, layout, "constellation uniforms"),
        }
    }

    fn write(&self, queue: &wgpu::Queue, frame: &ObjectFrame) {
        self.core.write(queue, &frame.core);
        self.halo.write(queue, &frame.halo);
        self.moon.write(queue, &frame.moon);
        self.tether.write(queue, &frame.tether);
        self.galaxies.write(queue, &frame.galaxies);
        self.constellations.write(queue, &frame.constellations);
    }
}

pub struct SceneRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    capabilities: DeviceCapabilities,
    depth_view: wgpu::TextureView,
    pipelines: Pipelines,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    objects: Objects,

    core_wire: GpuMesh,
    halo: GpuMesh,
    moon: GpuMesh,
    tether: GpuMesh,
    galaxy_sphere: GpuMesh,
    galaxy_instances: Option<Batch>,
    stars: Option<Batch>,
    grid: Option<Batch>,
    constellations: Option<Batch>,
    hud_buffer: wgpu::Buffer,

    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, scene: &Scene) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let capabilities = probe_capabilities(&adapter);
        tracing::info!(
            backend = ?capabilities.backend,
            adapter = %capabilities.adapter_name,
            max_texture = capabilities.max_texture_size,
            webgpu_compliant = capabilities.webgpu_compliant,
            "Selected GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("lattice device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format =
            preferred_surface_format(&surface_caps.formats).ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let frame_layout = uniform_layout(&device, "frame layout");
        let object_layout = uniform_layout(&device, "object layout");
        let pipelines = Pipelines::new(&device, format, &frame_layout, &object_layout);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let objects = Objects::new(&device, &object_layout);

        let moon = &scene.moon;
        let core_mesh = moon.core_mesh();
        let core_wire = GpuMesh::new(&device, "core", core_mesh, &core_mesh.wireframe_indices());
        let halo = GpuMesh::new(&device, "halo", moon.halo_mesh(), &moon.halo_mesh().indices);
        let moon_mesh = GpuMesh::new(&device, "moon", moon.moon_mesh(), &moon.moon_mesh().indices);
        let tether = GpuMesh::new(&device, "tether", moon.tether_mesh(), &moon.tether_mesh().indices);
        let (w, h) = GALAXY_SPHERE_SEGMENTS;
        let sphere = uv_sphere(1.0, w, h);
        let galaxy_sphere = GpuMesh::new(&device, "galaxy sphere", &sphere, &sphere.indices);

        let star_instances: Vec<PointInstance> =
            scene.starfield.stars().iter().map(PointInstance::from).collect();
        let stars = Batch::new(&device, "stars", &star_instances);
        let grid = Batch::new(&device, "grid", &LineVertex::from_points(scene.grid.vertices()));
        let constellations = Batch::new(
            &device,
            "constellations",
            &LineVertex::from_points(&scene.constellations.line_vertices()),
        );

        let hud_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hud vertices"),
            size: (std::mem::size_of::<HudVertex>() * HUD_VERTEX_CAPACITY) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let [r, g, b] = scene.environment.background;
        let clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        tracing::info!(
            width = config.width,
            height = config.height,
            stars = star_instances.len(),
            grid_segments = grid.as_ref().map_or(0, |b| b.count / 2),
            "Renderer ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            capabilities,
            depth_view,
            pipelines,
            frame_buffer,
            frame_bind_group,
            objects,
            core_wire,
            halo,
            moon: moon_mesh,
            tether,
            galaxy_sphere,
            galaxy_instances: None,
            stars,
            grid,
            constellations,
            hud_buffer,
            clear_color,
        })
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }

    /// Upload the galaxy instances. Called once when the dataset resolves.
    pub fn upload_galaxies(&mut self, field: &GalaxyField) {
        let instances: Vec<PointInstance> = field.instances().iter().map(PointInstance::from).collect();
        self.galaxy_instances = Batch::new(&self.device, "galaxy instances", &instances);
        tracing::debug!(instances = instances.len(), "Uploaded galaxy instances");
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &OrbitCamera,
        hud_shapes: &[HudShape],
    ) -> Result<(), RenderError> {
        let (width, height) = self.size();
        let frame = frame_uniforms(scene, camera, width, height);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));
        self.objects.write(&self.queue, &ObjectFrame::from_scene(scene));

        let mut hud_vertices = hud::tessellate(hud_shapes, width, height);
        if hud_vertices.len() > HUD_VERTEX_CAPACITY {
            tracing::warn!(vertices = hud_vertices.len(), "HUD vertex buffer overflow, truncating");
            hud_vertices.truncate(HUD_VERTEX_CAPACITY - HUD_VERTEX_CAPACITY % 3);
        }
        if !hud_vertices.is_empty() {
            self.queue
                .write_buffer(&self.hud_buffer, 0, bytemuck::cast_slice(&hud_vertices));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            // Opaque
            pass.set_pipeline(&self.pipelines.lit_wire);
            pass.set_bind_group(1, &self.objects.core.bind_group, &[]);
            self.core_wire.bind(&mut pass);
            pass.draw_indexed(0..self.core_wire.index_count, 0, 0..1);

            pass.set_pipeline(&self.pipelines.lit);
            pass.set_bind_group(1, &self.objects.moon.bind_group, &[]);
            self.moon.bind(&mut pass);
            pass.draw_indexed(0..self.moon.index_count, 0, 0..1);

            if let Some(galaxies) = &self.galaxy_instances {
                pass.set_pipeline(&self.pipelines.galaxy);
                pass.set_bind_group(1, &self.objects.galaxies.bind_group, &[]);
                self.galaxy_sphere.bind(&mut pass);
                pass.set_vertex_buffer(1, galaxies.buffer.slice(..));
                pass.draw_indexed(0..self.galaxy_sphere.index_count, 0, 0..galaxies.count);
            }

            // Translucent and additive
            if let Some(stars) = &self.stars {
                pass.set_pipeline(&self.pipelines.stars);
                pass.set_vertex_buffer(0, stars.buffer.slice(..));
                pass.draw(0..6, 0..stars.count);
            }

            if let Some(lines) = &self.constellations {
                pass.set_pipeline(&self.pipelines.lines);
                pass.set_bind_group(1, &self.objects.constellations.bind_group, &[]);
                pass.set_vertex_buffer(0, lines.buffer.slice(..));
                pass.draw(0..lines.count, 0..1);
            }

            if let Some(grid) = &self.grid {
                pass.set_pipeline(&self.pipelines.grid);
                pass.set_vertex_buffer(0, grid.buffer.slice(..));
                pass.draw(0..grid.count, 0..1);
            }

            pass.set_pipeline(&self.pipelines.halo);
            pass.set_bind_group(1, &self.objects.halo.bind_group, &[]);
            self.halo.bind(&mut pass);
            pass.draw_indexed(0..self.halo.index_count, 0, 0..1);

            pass.set_pipeline(&self.pipelines.tether);
            pass.set_bind_group(1, &self.objects.tether.bind_group, &[]);
            self.tether.bind(&mut pass);
            pass.draw_indexed(0..self.tether.index_count, 0, 0..1);

            if !hud_vertices.is_empty() {
                pass.set_pipeline(&self.pipelines.hud);
                pass.set_vertex_buffer(0, self.hud_buffer.slice(..));
                pass.draw(0..hud_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
