//! WGPU-based rendering engine for the viewer
//!
//! Owns the surface, device, depth buffer, cube buffers and surface texture. Geometry
//! is uploaded once at startup; each frame only rewrites the global uniform buffer and
//! records one render pass with a face draw and a wireframe draw.

use log::{info, warn};
use std::sync::Arc;
use wgpu::Device;

use crate::{
    config::ViewerConfig,
    error::{RenderError, ViewerError},
    gfx::{
        camera::FixedCamera,
        geometry::GeometryData,
        resources::{
            global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, LightConfig},
            texture_loader::{load_texture, TextureImage, TextureSource},
            texture_resource::TextureResource,
        },
    },
    view::ViewState,
};

use super::{
    mesh::{DrawMesh, GpuMesh},
    pipeline_manager::{PipelineConfig, PipelineManager},
};

const GLOBALS_WGSL: &str = include_str!("shaders/globals.wgsl");

const FACES_COLOR: &str = "FacesColor";
const FACES_TEXTURED: &str = "FacesTextured";
const WIREFRAME: &str = "Wireframe";

/// Face pipeline for the current mode; without a texture handle only color mode exists
fn face_pipeline_name(texture_mode: bool, has_texture: bool) -> &'static str {
    if texture_mode && has_texture {
        FACES_TEXTURED
    } else {
        FACES_COLOR
    }
}

/// Surface texture uploaded at startup, kept for the process lifetime
struct TextureHandle {
    _resource: TextureResource,
    bind_group: wgpu::BindGroup,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    faces: GpuMesh,
    edges: GpuMesh,
    /// `None` when the upload failed; texture mode then renders flat colors
    texture: Option<TextureHandle>,

    camera: FixedCamera,
    light: LightConfig,
    line_color: [f32; 3],
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Initializes wgpu, uploads the cube geometry, loads the surface texture and
    /// builds the face and wireframe pipelines.
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `viewer_config` - Startup parameters
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        viewer_config: &ViewerConfig,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, ViewerError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        // Shaders write unconverted color values, as fixed-function GL did
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ViewerError::NoSurfaceFormat)?;
        info!("Surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            // Frame pacing is done by the frame loop
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let geometry = GeometryData::cube();
        let faces = GpuMesh::new(
            &device,
            "Cube Faces",
            &geometry.face_vertices,
            &geometry.face_indices,
        );
        let edges = GpuMesh::new(
            &device,
            "Cube Edges",
            &geometry.edge_vertices,
            &geometry.edge_indices,
        );

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let texture_layout = TextureResource::bind_group_layout(&device);
        let image = TextureImage::load_or_fallback(&viewer_config.texture);
        let texture = match load_texture(&device, &queue, &image) {
            Ok(resource) => {
                let bind_group = resource.create_bind_group(&device, &texture_layout);
                if *image.source() == TextureSource::Fallback {
                    info!("Texture mode will show the fallback checkerboard");
                }
                Some(TextureHandle {
                    _resource: resource,
                    bind_group,
                })
            }
            Err(err) => {
                warn!("{}; texture mode will render flat colors", err);
                None
            }
        };

        let camera = FixedCamera::new(
            &viewer_config.camera,
            &viewer_config.projection,
            config.width as f32 / config.height as f32,
        );

        // Wrap device and queue in Arc for pipeline manager
        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader(
            "faces_color",
            &format!("{}\n{}", GLOBALS_WGSL, include_str!("shaders/faces_color.wgsl")),
        );
        pipeline_manager.load_shader(
            "faces_textured",
            &format!("{}\n{}", GLOBALS_WGSL, include_str!("shaders/faces_textured.wgsl")),
        );
        pipeline_manager.load_shader(
            "wireframe",
            &format!("{}\n{}", GLOBALS_WGSL, include_str!("shaders/wireframe.wgsl")),
        );

        // Faces are pushed back slightly so the coplanar edges always win the depth test.
        // No culling: a negative scale turns the cube inside out.
        let faces_base = PipelineConfig::default()
            .with_color_format(format)
            .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::Less)
            .with_depth_bias(2, 1.0)
            .with_cull_mode(None);

        pipeline_manager.register_pipeline(
            FACES_COLOR,
            faces_base
                .clone()
                .with_label("FACES COLOR")
                .with_shader("faces_color")
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager.register_pipeline(
            FACES_TEXTURED,
            faces_base
                .with_label("FACES TEXTURED")
                .with_shader("faces_textured")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    texture_layout.layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            WIREFRAME,
            PipelineConfig::default()
                .with_label("WIREFRAME")
                .with_shader("wireframe")
                .with_color_format(format)
                .with_depth(
                    TextureResource::DEPTH_FORMAT,
                    wgpu::CompareFunction::LessEqual,
                )
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(ViewerError::Pipeline)?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bindings,
            faces,
            edges,
            texture,
            camera,
            light: viewer_config.light,
            line_color: viewer_config.line_color,
            clear_color: viewer_config.clear_color,
        })
    }

    /// Renders one frame of the cube in the pose described by `view`
    ///
    /// Clears color and depth, draws the six faces (textured when texture mode is on
    /// and a texture exists, flat colored otherwise), draws the twelve edges on top,
    /// and presents.
    pub fn render_frame(&mut self, view: &ViewState) -> Result<(), RenderError> {
        let content = GlobalUBOContent::new(&self.camera, view, &self.light, self.line_color);
        self.global_ubo.update_content(&self.queue, content);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring surface texture; skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(err) => return Err(RenderError::Surface(err)),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            // Face pass
            let face_pipeline = face_pipeline_name(view.texture_mode, self.texture.is_some());
            let pipeline = self
                .pipeline_manager
                .get_pipeline(face_pipeline)
                .ok_or(RenderError::MissingPipeline(face_pipeline))?;
            render_pass.set_pipeline(pipeline);
            if let Some(texture) = self.texture.as_ref().filter(|_| face_pipeline == FACES_TEXTURED)
            {
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
            }
            render_pass.draw_mesh(&self.faces);

            // Wireframe pass, independent of mode
            let pipeline = self
                .pipeline_manager
                .get_pipeline(WIREFRAME)
                .ok_or(RenderError::MissingPipeline(WIREFRAME))?;
            render_pass.set_pipeline(pipeline);
            render_pass.draw_mesh(&self.edges);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface, recreates the depth buffer and updates the aspect ratio
    ///
    /// Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        self.camera.resize_projection(width, height);
    }
}
