use std::mem::take;
use std::sync::Arc;

use log::info;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::cube::{RotationOp, Sequencer};
use crate::keyboard::Keyboard;
use crate::messages::{CubeAction, LabEvent};
use crate::scene::Scene;
use crate::wgpu_context::WgpuContext;
use crate::Settings;

pub struct Application {
    window_attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    sequencer: Sequencer,
    keyboard: Keyboard,
    shift: bool,
    settings: Settings,
    startup_ops: Vec<RotationOp>,
    event_loop_proxy: EventLoopProxy<LabEvent>,
}

impl Application {
    pub fn new(
        event_loop_proxy: EventLoopProxy<LabEvent>,
        settings: Settings,
        startup_ops: Vec<RotationOp>,
    ) -> Application {
        Application {
            window_attributes: Window::default_attributes()
                .with_title("Rubik Lab")
                .with_inner_size(winit::dpi::PhysicalSize::new(1600, 1200)),
            window: None,
            scene: None,
            sequencer: Sequencer::default(),
            keyboard: Keyboard::new(event_loop_proxy.clone()).with_actions(),
            shift: false,
            settings,
            startup_ops,
            event_loop_proxy,
        }
    }

    fn play_startup_ops(&mut self) {
        let ops = take(&mut self.startup_ops);
        if ops.is_empty() {
            return;
        }
        for op in ops {
            self.sequencer.queue_rotation(op);
        }
        if let Some(scene) = &mut self.scene {
            self.sequencer.start(scene);
        }
    }
}

impl ApplicationHandler<LabEvent> for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(self.window_attributes.clone())
                .expect("Could not create window"),
        );
        self.window = Some(window.clone());
        WgpuContext::create_and_send(window, self.event_loop_proxy.clone());
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: LabEvent) {
        match event {
            LabEvent::ContextCreated(wgpu_context) => {
                self.scene = Some(Scene::new(
                    wgpu_context,
                    self.event_loop_proxy.clone(),
                    self.settings.turn_seconds,
                ));
                for line in self.keyboard.legend(self.sequencer.phase()) {
                    info!("{line}");
                }
                self.play_startup_ops();
            }
            LabEvent::Cube(cube_action) => match cube_action {
                CubeAction::Queue(op) => {
                    self.sequencer.queue_rotation(op);
                }
                CubeAction::StartPlayback => {
                    if let Some(scene) = &mut self.scene {
                        self.sequencer.start(scene);
                    }
                }
            },
            LabEvent::TurnFinished => {
                if let Some(scene) = &mut self.scene {
                    self.sequencer.turn_finished(scene);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
            return;
        }
        let Some(scene) = &mut self.scene else {
            return;
        };
        match event {
            WindowEvent::Resized(size) => scene.resize(size.width, size.height),
            WindowEvent::RedrawRequested => scene.redraw(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state.is_pressed()
                    && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                    return;
                }
                self.keyboard
                    .handle_key_event(&key_event, self.shift, self.sequencer.phase());
            }
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => scene.camera().window_event(&event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
