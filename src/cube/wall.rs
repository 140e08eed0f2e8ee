use cgmath::{Vector3, Zero};
use strum::{Display, EnumIter, EnumString};

use crate::cube::GridPos;

/// One of the three grid axes. Opposite walls share an axis and rotate about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn vector(&self) -> Vector3<f32> {
        let mut vector = Vector3::zero();
        match self {
            Axis::X => vector.x = 1.0,
            Axis::Y => vector.y = 1.0,
            Axis::Z => vector.z = 1.0,
        }
        vector
    }
}

/// A face layer of the cube. The discriminant doubles as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Wall {
    Front,
    Back,
    Left,
    Right,
    Bottom,
    Top,
}

impl Wall {
    pub const COUNT: usize = 6;

    pub fn axis(&self) -> Axis {
        match self {
            Wall::Left | Wall::Right => Axis::X,
            Wall::Front | Wall::Back => Axis::Y,
            Wall::Bottom | Wall::Top => Axis::Z,
        }
    }

    pub fn opposite(&self) -> Wall {
        match self {
            Wall::Front => Wall::Back,
            Wall::Back => Wall::Front,
            Wall::Left => Wall::Right,
            Wall::Right => Wall::Left,
            Wall::Bottom => Wall::Top,
            Wall::Top => Wall::Bottom,
        }
    }

    /// The four side walls a quarter turn of this wall permutes, in the
    /// cyclic order a negative turn steps through. A positive turn uses
    /// the reversed cycle.
    pub fn cycle(&self) -> [Wall; 4] {
        match self.axis() {
            Axis::Y => [Wall::Left, Wall::Top, Wall::Right, Wall::Bottom],
            Axis::X => [Wall::Back, Wall::Top, Wall::Front, Wall::Bottom],
            Axis::Z => [Wall::Left, Wall::Front, Wall::Right, Wall::Back],
        }
    }

    /// Which side of its axis this wall lies on.
    pub fn grid_side(&self) -> i8 {
        match self {
            Wall::Front | Wall::Left | Wall::Bottom => -1,
            Wall::Back | Wall::Right | Wall::Top => 1,
        }
    }

    /// Whether a cube sitting at the given grid position lies in this wall.
    pub fn holds_home(&self, home: GridPos) -> bool {
        home.component(self.axis()) == self.grid_side()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn opposites_share_axis_and_cycle() {
        for wall in Wall::iter() {
            assert_ne!(wall, wall.opposite());
            assert_eq!(wall, wall.opposite().opposite());
            assert_eq!(wall.axis(), wall.opposite().axis());
            assert_eq!(wall.cycle(), wall.opposite().cycle());
        }
    }

    #[test]
    fn cycle_excludes_own_axis() {
        for wall in Wall::iter() {
            let cycle = wall.cycle();
            assert!(!cycle.contains(&wall));
            assert!(!cycle.contains(&wall.opposite()));
            for side in cycle {
                assert_ne!(side.axis(), wall.axis());
            }
        }
    }

    #[test]
    fn names_parse_back() {
        for wall in Wall::iter() {
            assert_eq!(Wall::from_str(&wall.to_string()).unwrap(), wall);
        }
        assert!(Wall::from_str("sideways").is_err());
    }
}
