use std::fmt::Display;

use winit::event::KeyEvent;
use winit::event_loop::EventLoopProxy;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::cube::{Phase, RotationOp, Wall};
use crate::messages::{CubeAction, LabEvent};

struct KeyAction {
    code: KeyCode,
    shift: bool,
    description: String,
    action: CubeAction,
    event_loop_proxy: EventLoopProxy<LabEvent>,
    is_active_in: Box<dyn Fn(Phase) -> bool>,
}

impl KeyAction {
    pub fn execute(&self) {
        self.event_loop_proxy
            .send_event(LabEvent::Cube(self.action.clone()))
            .unwrap();
    }
}

impl Display for KeyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

pub struct Keyboard {
    event_loop_proxy: EventLoopProxy<LabEvent>,
    actions: Vec<KeyAction>,
}

impl Keyboard {
    pub fn new(event_loop_proxy: EventLoopProxy<LabEvent>) -> Self {
        Self {
            event_loop_proxy,
            actions: Default::default(),
        }
    }

    pub fn with_actions(mut self) -> Self {
        let wall_keys = [
            ("S", KeyCode::KeyS, Wall::Front),
            ("W", KeyCode::KeyW, Wall::Back),
            ("A", KeyCode::KeyA, Wall::Left),
            ("D", KeyCode::KeyD, Wall::Right),
            ("Q", KeyCode::KeyQ, Wall::Bottom),
            ("E", KeyCode::KeyE, Wall::Top),
        ];
        for (label, code, wall) in wall_keys {
            self.add_action(
                code,
                false,
                &format!("{label}: {wall} wall rotation"),
                CubeAction::Queue(RotationOp {
                    wall,
                    negative: false,
                }),
                Box::new(|phase| phase == Phase::AcceptingInput),
            );
            self.add_action(
                code,
                true,
                &format!("Shift+{label}: negative {wall} wall rotation"),
                CubeAction::Queue(RotationOp {
                    wall,
                    negative: true,
                }),
                Box::new(|phase| phase == Phase::AcceptingInput),
            );
        }
        self.add_action(
            KeyCode::Enter,
            false,
            "Enter: start sequence",
            CubeAction::StartPlayback,
            Box::new(|phase| phase == Phase::AcceptingInput),
        );
        self
    }

    pub fn handle_key_event(&self, key_event: &KeyEvent, shift: bool, phase: Phase) {
        if !key_event.state.is_pressed() {
            return;
        }
        if let KeyEvent {
            physical_key: PhysicalKey::Code(code),
            ..
        } = key_event
        {
            self.actions
                .iter()
                .filter(|action| {
                    action.code == *code && action.shift == shift && (action.is_active_in)(phase)
                })
                .for_each(|action| action.execute());
        }
    }

    pub fn legend(&self, phase: Phase) -> Vec<String> {
        self.actions
            .iter()
            .filter(|action| (action.is_active_in)(phase))
            .map(|action| action.description.clone())
            .collect()
    }

    fn add_action(
        &mut self,
        code: KeyCode,
        shift: bool,
        description: &str,
        action: CubeAction,
        is_active_in: Box<dyn Fn(Phase) -> bool>,
    ) {
        self.actions.push(KeyAction {
            code,
            shift,
            description: description.into(),
            action,
            event_loop_proxy: self.event_loop_proxy.clone(),
            is_active_in,
        });
    }
}
