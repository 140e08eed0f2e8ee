pub mod error;
pub mod sequencer;
pub mod state;
pub mod wall;

pub use error::CubeError;
pub use sequencer::{Choreography, Phase, RotationOp, Sequencer};
pub use state::{CubeState, WallSet};
pub use wall::{Axis, Wall};

/// Stable identity of one of the 27 small cubes, assigned at creation.
pub type CubeId = usize;

/// Home position of a small cube on the 3x3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl GridPos {
    pub fn from_index(index: CubeId) -> Self {
        Self {
            x: (index % 3) as i8 - 1,
            y: ((index / 3) % 3) as i8 - 1,
            z: (index / 9) as i8 - 1,
        }
    }

    pub fn component(&self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Quarter turn about the given axis, right-handed when `negative` is false.
    pub fn rotated(&self, axis: Axis, negative: bool) -> Self {
        let GridPos { x, y, z } = *self;
        let positive = match axis {
            Axis::X => GridPos { x, y: -z, z: y },
            Axis::Y => GridPos { x: z, y, z: -x },
            Axis::Z => GridPos { x: -y, y: x, z },
        };
        if negative {
            positive.rotated(axis, false).rotated(axis, false)
        } else {
            positive
        }
    }
}
