use std::time::Instant;

use bytemuck::{cast_slice, Pod, Zeroable};
use cgmath::{point3, vec3, Matrix4, SquareMatrix, Transform, Vector3};
use log::{debug, error};
use wgpu::util::DeviceExt;
use winit::event_loop::EventLoopProxy;

use crate::animator::Turn;
use crate::cube::{Choreography, CubeId, GridPos, RotationOp, Wall};
use crate::camera::Camera;
use crate::messages::LabEvent;
use crate::wgpu_context::WgpuContext;

const CUBE_COUNT: usize = 27;
const SPACING: f32 = 2.0;
const HALF_EXTENT: f32 = 0.9;

/// Renders the 27 cubes and plays the wall-turn tween. Implements the
/// choreography the sequencer drives: it owns the visual side of a turn
/// and reports completion back through the event loop.
pub struct Scene {
    pub wgpu_context: WgpuContext,
    camera: Camera,
    drawing: Drawing<CubeVertex>,
    depth_view: wgpu::TextureView,
    orientations: Vec<Matrix4<f32>>,
    turn: Option<Turn>,
    turn_seconds: f32,
    last_frame: Instant,
    event_loop_proxy: EventLoopProxy<LabEvent>,
}

impl Scene {
    pub fn new(
        wgpu_context: WgpuContext,
        event_loop_proxy: EventLoopProxy<LabEvent>,
        turn_seconds: f32,
    ) -> Self {
        let WgpuContext {
            device,
            surface_config,
            ..
        } = &wgpu_context;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });
        let camera = Camera::new(
            point3(-7.0, -10.0, 4.0),
            surface_config.width as f32 / surface_config.height as f32,
        );
        let pipeline_layout = &wgpu_context.pipeline_layout;
        let cube_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "cube_vertex",
                buffers: &[CubeVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "cube_fragment",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        let orientations = vec![Matrix4::identity(); CUBE_COUNT];
        let mut vertices = Vec::with_capacity(CUBE_COUNT * 36);
        for id in 0..CUBE_COUNT {
            vertices.extend(CubeVertex::for_cube(&cube_model(
                id,
                &orientations,
                &None,
            )));
        }
        let cube_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let depth_view = create_depth_view(&wgpu_context);
        Self {
            wgpu_context,
            camera,
            drawing: Drawing {
                vertices,
                pipeline: cube_pipeline,
                buffer: cube_buffer,
            },
            depth_view,
            orientations,
            turn: None,
            turn_seconds,
            last_frame: Instant::now(),
            event_loop_proxy,
        }
    }

    pub fn camera(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn redraw(&mut self) {
        let now = Instant::now();
        let seconds = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let finished = match &mut self.turn {
            Some(turn) => turn.advance(seconds),
            None => false,
        };
        if finished {
            if let Some(turn) = self.turn.take() {
                // compose the exact quarter turn in world space, so each
                // cube keeps the pose the tween ended on
                let rotation = turn.completed_rotation();
                for &id in turn.units() {
                    self.orientations[id] = rotation * self.orientations[id];
                }
                debug!("Finished {} rotation", turn.op());
                self.event_loop_proxy
                    .send_event(LabEvent::TurnFinished)
                    .unwrap();
            }
        }

        self.update_vertices();
        self.wgpu_context.update_mvp_matrix(self.camera.mvp_matrix());
        self.wgpu_context.queue.write_buffer(
            &self.drawing.buffer,
            0,
            cast_slice(&self.drawing.vertices),
        );

        let surface_texture = match self.wgpu_context.surface_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.wgpu_context.reconfigure();
                return;
            }
            Err(surface_error) => {
                error!("Surface error {surface_error:?}");
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.wgpu_context.create_encoder();
        self.render(&mut encoder, &view);
        self.wgpu_context.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }

    fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.02,
                        g: 0.02,
                        b: 0.04,
                        a: 1.0,
                    }),
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
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_bind_group(0, &self.wgpu_context.uniform_bind_group, &[]);
        render_pass.set_pipeline(&self.drawing.pipeline);
        render_pass.set_vertex_buffer(0, self.drawing.buffer.slice(..));
        render_pass.draw(0..self.drawing.vertices.len() as u32, 0..1);
    }

    fn update_vertices(&mut self) {
        self.drawing.vertices.clear();
        for id in 0..CUBE_COUNT {
            let model = cube_model(id, &self.orientations, &self.turn);
            self.drawing.vertices.extend(CubeVertex::for_cube(&model));
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.wgpu_context.resize((width, height));
        self.camera.set_aspect(width as f32 / height.max(1) as f32);
        self.depth_view = create_depth_view(&self.wgpu_context);
    }
}

impl Choreography for Scene {
    fn begin_rotation(&mut self, op: RotationOp, units: Vec<CubeId>) {
        debug!("Turning {op} with {} cubes", units.len());
        self.turn = Some(Turn::new(op, units, self.turn_seconds));
    }
}

fn cube_model(id: CubeId, orientations: &[Matrix4<f32>], turn: &Option<Turn>) -> Matrix4<f32> {
    let home = GridPos::from_index(id);
    let translation = Matrix4::from_translation(vec3(
        home.x as f32 * SPACING,
        home.y as f32 * SPACING,
        home.z as f32 * SPACING,
    ));
    let model = orientations[id] * translation;
    match turn {
        Some(turn) if turn.units().contains(&id) => turn.current_rotation() * model,
        _ => model,
    }
}

fn create_depth_view(wgpu_context: &WgpuContext) -> wgpu::TextureView {
    let depth_texture = wgpu_context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: wgpu_context.surface_config.width,
            height: wgpu_context.surface_config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const ORANGE: [f32; 4] = [1.0, 165.0 / 255.0, 0.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

fn face_color(wall: Wall) -> [f32; 4] {
    match wall {
        Wall::Front => RED,
        Wall::Back => GREEN,
        Wall::Top => BLUE,
        Wall::Bottom => ORANGE,
        Wall::Left => WHITE,
        Wall::Right => YELLOW,
    }
}

/// Tangent directions spanning the face plane for each axis.
fn face_tangents(wall: Wall) -> (Vector3<f32>, Vector3<f32>) {
    use crate::cube::Axis::*;
    match wall.axis() {
        X => (Vector3::unit_y(), Vector3::unit_z()),
        Y => (Vector3::unit_z(), Vector3::unit_x()),
        Z => (Vector3::unit_x(), Vector3::unit_y()),
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, Default)]
struct CubeVertex {
    position: [f32; 4],
    normal: [f32; 4],
    color: [f32; 4],
}

impl CubeVertex {
    /// The 36 vertices of one small cube, transformed by its model matrix.
    pub fn for_cube(model: &Matrix4<f32>) -> Vec<CubeVertex> {
        use strum::IntoEnumIterator;
        let mut vertices = Vec::with_capacity(36);
        for wall in Wall::iter() {
            let normal = wall.axis().vector() * wall.grid_side() as f32;
            let (u, v) = face_tangents(wall);
            let center = normal * HALF_EXTENT;
            let corner = |du: f32, dv: f32| {
                let local = center + (u * du + v * dv) * HALF_EXTENT;
                let position = model.transform_point(point3(local.x, local.y, local.z));
                let normal = model.transform_vector(normal);
                CubeVertex {
                    position: [position.x, position.y, position.z, 1.0],
                    normal: [normal.x, normal.y, normal.z, 0.0],
                    color: face_color(wall),
                }
            };
            let quad = [
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            ];
            vertices.extend([quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]]);
        }
        vertices
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0=>Float32x4, 1=>Float32x4, 2=>Float32x4];

    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

struct Drawing<V> {
    vertices: Vec<V>,
    pipeline: wgpu::RenderPipeline,
    buffer: wgpu::Buffer,
}
