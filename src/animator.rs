use cgmath::{Deg, Matrix4};

use crate::cube::{CubeId, RotationOp};

/// The in-flight quarter turn of one wall's cubes: a tween from 0 to 90
/// degrees about the wall's axis over a fixed duration.
pub struct Turn {
    op: RotationOp,
    units: Vec<CubeId>,
    seconds: f32,
    progress: f32,
}

impl Turn {
    pub fn new(op: RotationOp, units: Vec<CubeId>, seconds: f32) -> Self {
        Self {
            op,
            units,
            seconds,
            progress: 0.0,
        }
    }

    /// Advance by a frame's elapsed time. Returns true once the turn has
    /// reached its target angle.
    pub fn advance(&mut self, seconds: f32) -> bool {
        self.progress = if self.seconds > 0.0 {
            (self.progress + seconds / self.seconds).min(1.0)
        } else {
            1.0
        };
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn units(&self) -> &[CubeId] {
        &self.units
    }

    pub fn op(&self) -> RotationOp {
        self.op
    }

    /// Rotation to apply to the turning cubes this frame.
    pub fn current_rotation(&self) -> Matrix4<f32> {
        Matrix4::from_axis_angle(self.op.wall.axis().vector(), self.angle())
    }

    /// The exact target rotation, composed into cube orientations on completion.
    pub fn completed_rotation(&self) -> Matrix4<f32> {
        Matrix4::from_axis_angle(self.op.wall.axis().vector(), Deg(90.0 * self.sign()))
    }

    fn angle(&self) -> Deg<f32> {
        Deg(90.0 * self.progress * self.sign())
    }

    fn sign(&self) -> f32 {
        if self.op.negative {
            -1.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Wall;

    fn turn(seconds: f32) -> Turn {
        Turn::new(
            RotationOp {
                wall: Wall::Top,
                negative: false,
            },
            vec![0, 1, 2],
            seconds,
        )
    }

    #[test]
    fn advances_to_completion_once() {
        let mut tween = turn(1.0);
        assert!(!tween.advance(0.4));
        assert!(!tween.advance(0.4));
        assert!(tween.advance(0.4));
        assert!(tween.finished());
        // overshoot clamps
        assert!(tween.advance(10.0));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tween = turn(0.0);
        assert!(tween.advance(0.0));
    }

    #[test]
    fn angle_is_signed() {
        let mut positive = turn(1.0);
        positive.advance(1.0);
        assert_eq!(positive.angle(), Deg(90.0));
        let mut negative = Turn::new(
            RotationOp {
                wall: Wall::Top,
                negative: true,
            },
            vec![],
            1.0,
        );
        negative.advance(1.0);
        assert_eq!(negative.angle(), Deg(-90.0));
    }
}
