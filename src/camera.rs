use std::f32::consts::PI;

use cgmath::{
    perspective, point3, vec3, Deg, InnerSpace, Matrix4, Point3, Rad, Transform, Vector3,
};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

pub struct Camera {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub moving_mouse: PhysicalPosition<f64>,
    pub pressed_mouse: Option<PhysicalPosition<f64>>,
}

impl Camera {
    pub fn new(position: Point3<f32>, aspect: f32) -> Self {
        Self {
            position,
            look_at: point3(0.0, 0.0, 0.0),
            up: Vector3::unit_z(),
            aspect,
            moving_mouse: PhysicalPosition::new(0.0, 0.0),
            pressed_mouse: None,
        }
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, .. } => match state {
                ElementState::Pressed => self.pressed_mouse = Some(self.moving_mouse),
                ElementState::Released => self.pressed_mouse = None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.moving_mouse = *position;
                if let Some(rotation) = self.rotation() {
                    self.position =
                        self.look_at - rotation.transform_vector(self.look_at - self.position);
                    self.pressed_mouse = Some(self.moving_mouse);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * SPEED.z,
                    MouseScrollDelta::LineDelta(_, y) => y * SPEED.z * 20.0,
                };
                let gaze = self.look_at - self.position;
                if gaze.magnitude() - scroll > 1.0 {
                    self.position += gaze.normalize() * scroll;
                }
            }
            _ => {}
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn mvp_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.look_at, self.up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Rad(2.0 * PI / 5.0), self.aspect, 0.1, 100.0)
    }

    fn rotation(&self) -> Option<Matrix4<f32>> {
        let (dx, dy) = self.angles()?;
        let rot_x = Matrix4::from_axis_angle(self.up, dx);
        let axis = self.up.cross((self.look_at - self.position).normalize());
        let rot_y = Matrix4::from_axis_angle(axis, dy);
        Some(rot_x * rot_y)
    }

    fn angles(&self) -> Option<(Deg<f32>, Deg<f32>)> {
        let pressed = self.pressed_mouse?;
        let PhysicalPosition { x, y } = self.moving_mouse;
        let dx = (pressed.x - x) as f32;
        let dy = (y - pressed.y) as f32;
        Some((Deg(dx * SPEED.x), Deg(dy * SPEED.y)))
    }
}

const SPEED: Vector3<f32> = vec3(0.5, 0.4, 0.01);

#[rustfmt::skip]
const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);
