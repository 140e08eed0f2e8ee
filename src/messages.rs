use crate::cube::RotationOp;
use crate::wgpu_context::WgpuContext;

#[derive(Debug, Clone)]
pub enum CubeAction {
    Queue(RotationOp),
    StartPlayback,
}

#[derive(Debug)]
pub enum LabEvent {
    ContextCreated(WgpuContext),
    Cube(CubeAction),
    TurnFinished,
}
