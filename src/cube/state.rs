use strum::IntoEnumIterator;

use crate::cube::wall::Wall;
use crate::cube::{CubeId, GridPos};

/// The set of walls a single cube currently belongs to, one bit per wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallSet(u8);

impl WallSet {
    pub const EMPTY: WallSet = WallSet(0);

    pub fn insert(&mut self, wall: Wall) {
        self.0 |= 1 << wall as u8;
    }

    pub fn contains(&self, wall: Wall) -> bool {
        self.0 & (1 << wall as u8) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Walls present in `self` but not in `other`.
    pub fn difference(&self, other: WallSet) -> WallSet {
        WallSet(self.0 & !other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Wall> {
        Wall::iter().filter(move |&wall| self.contains(wall))
    }
}

impl FromIterator<Wall> for WallSet {
    fn from_iter<T: IntoIterator<Item = Wall>>(walls: T) -> Self {
        let mut set = WallSet::EMPTY;
        for wall in walls {
            set.insert(wall);
        }
        set
    }
}

/// One of the 27 small cubes. Identity and home position are fixed at
/// creation; which walls it belongs to changes as the cube is twisted.
#[derive(Debug, Clone, Copy)]
pub struct CubeUnit {
    pub id: CubeId,
    pub home: GridPos,
}

/// Wall membership bookkeeping for the whole cube: per-unit membership sets
/// and the six per-wall collections, kept mutually consistent.
pub struct CubeState {
    units: Vec<CubeUnit>,
    membership: Vec<WallSet>,
    walls: [Vec<CubeId>; Wall::COUNT],
}

impl Default for CubeState {
    fn default() -> Self {
        let units: Vec<CubeUnit> = (0..27)
            .map(|id| CubeUnit {
                id,
                home: GridPos::from_index(id),
            })
            .collect();
        let membership: Vec<WallSet> = units
            .iter()
            .map(|unit| {
                Wall::iter()
                    .filter(|wall| wall.holds_home(unit.home))
                    .collect()
            })
            .collect();
        let mut walls: [Vec<CubeId>; Wall::COUNT] = Default::default();
        for unit in &units {
            for wall in membership[unit.id].iter() {
                walls[wall as usize].push(unit.id);
            }
        }
        Self {
            units,
            membership,
            walls,
        }
    }
}

impl CubeState {
    pub fn units(&self) -> &[CubeUnit] {
        &self.units
    }

    pub fn membership(&self, id: CubeId) -> WallSet {
        self.membership[id]
    }

    /// The cubes currently lying in the given face layer.
    pub fn wall_units(&self, wall: Wall) -> &[CubeId] {
        &self.walls[wall as usize]
    }

    /// Relabel memberships after a completed quarter turn of `wall`.
    ///
    /// The four side walls adjacent to the turning wall form a cycle; every
    /// cube in the layer has each of its side-wall labels stepped once
    /// around that cycle, while membership in the turning wall and its
    /// opposite is untouched. Purely bookkeeping, no geometry.
    pub fn apply_rotation(&mut self, wall: Wall, negative: bool) {
        let mut cycle = wall.cycle();
        if !negative {
            cycle.reverse();
        }
        let members = self.walls[wall as usize].clone();
        for id in members {
            let old = self.membership[id];
            let new: WallSet = old
                .iter()
                .map(|member| match cycle.iter().position(|&side| side == member) {
                    Some(index) => cycle[(index + cycle.len() - 1) % cycle.len()],
                    None => member,
                })
                .collect();
            self.membership[id] = new;
            for lost in old.difference(new).iter() {
                self.walls[lost as usize].retain(|&cube| cube != id);
            }
            for gained in new.difference(old).iter() {
                self.walls[gained as usize].push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::wall::Axis;

    fn assert_consistent(state: &CubeState) {
        for unit in state.units() {
            let membership = state.membership(unit.id);
            assert!(membership.len() <= 3, "cube {} in too many walls", unit.id);
            for axis in [Axis::X, Axis::Y, Axis::Z] {
                let on_axis = membership.iter().filter(|wall| wall.axis() == axis).count();
                assert!(on_axis <= 1, "cube {} on both walls of an axis", unit.id);
            }
            for wall in Wall::iter() {
                assert_eq!(
                    membership.contains(wall),
                    state.wall_units(wall).contains(&unit.id),
                    "cube {} and wall {} disagree",
                    unit.id,
                    wall
                );
            }
        }
    }

    // Wall collections are compared as sets: a turn and its undo restore
    // the contents, but remove-then-append reshuffles the internal order.
    fn snapshot(state: &CubeState) -> (Vec<WallSet>, Vec<Vec<CubeId>>) {
        (
            state
                .units()
                .iter()
                .map(|unit| state.membership(unit.id))
                .collect(),
            Wall::iter()
                .map(|wall| {
                    let mut units = state.wall_units(wall).to_vec();
                    units.sort_unstable();
                    units
                })
                .collect(),
        )
    }

    #[test]
    fn initial_membership_counts() {
        let state = CubeState::default();
        assert_consistent(&state);
        let mut counts = [0usize; 4];
        for unit in state.units() {
            counts[state.membership(unit.id).len()] += 1;
        }
        // 1 core, 6 face centers, 12 edges, 8 corners
        assert_eq!(counts, [1, 6, 12, 8]);
        for wall in Wall::iter() {
            assert_eq!(state.wall_units(wall).len(), 9);
        }
    }

    #[test]
    fn top_turn_relabels_corner() {
        let mut state = CubeState::default();
        let corner = state
            .units()
            .iter()
            .find(|unit| unit.home == GridPos { x: 1, y: 1, z: 1 })
            .unwrap()
            .id;
        let expected_before: WallSet = [Wall::Right, Wall::Back, Wall::Top].into_iter().collect();
        assert_eq!(state.membership(corner), expected_before);

        state.apply_rotation(Wall::Top, false);
        let expected_after: WallSet = [Wall::Back, Wall::Left, Wall::Top].into_iter().collect();
        assert_eq!(state.membership(corner), expected_after);
        assert!(state.wall_units(Wall::Top).contains(&corner));
        assert!(!state.wall_units(Wall::Right).contains(&corner));
        assert_consistent(&state);
    }

    #[test]
    fn core_cube_belongs_nowhere() {
        let mut state = CubeState::default();
        let core = state
            .units()
            .iter()
            .find(|unit| unit.home == GridPos { x: 0, y: 0, z: 0 })
            .unwrap()
            .id;
        assert!(state.membership(core).is_empty());
        for wall in Wall::iter() {
            state.apply_rotation(wall, false);
            state.apply_rotation(wall, true);
            assert!(state.membership(core).is_empty());
        }
    }

    #[test]
    fn four_turns_restore_everything() {
        for wall in Wall::iter() {
            for negative in [false, true] {
                let mut state = CubeState::default();
                let before = snapshot(&state);
                for _ in 0..4 {
                    state.apply_rotation(wall, negative);
                    assert_consistent(&state);
                }
                assert_eq!(snapshot(&state), before, "4x {wall} turn not identity");
            }
        }
    }

    #[test]
    fn four_turns_restore_sets_not_vector_order() {
        for wall in Wall::iter() {
            let mut state = CubeState::default();
            let ordered_before: Vec<Vec<CubeId>> = Wall::iter()
                .map(|side| state.wall_units(side).to_vec())
                .collect();
            let before = snapshot(&state);
            for _ in 0..4 {
                state.apply_rotation(wall, false);
            }
            assert_eq!(snapshot(&state), before);
            let ordered_after: Vec<Vec<CubeId>> = Wall::iter()
                .map(|side| state.wall_units(side).to_vec())
                .collect();
            assert_ne!(
                ordered_after, ordered_before,
                "4x {wall} turn reshuffles side-wall list order"
            );
        }
    }

    #[test]
    fn negative_turn_undoes_positive() {
        for wall in Wall::iter() {
            let mut state = CubeState::default();
            // twist a little first so the check starts from a scrambled state
            state.apply_rotation(Wall::Front, false);
            state.apply_rotation(Wall::Right, true);
            let before = snapshot(&state);
            state.apply_rotation(wall, false);
            state.apply_rotation(wall, true);
            assert_eq!(snapshot(&state), before);
            state.apply_rotation(wall, true);
            state.apply_rotation(wall, false);
            assert_eq!(snapshot(&state), before);
        }
    }

    #[test]
    fn relabeling_matches_coordinate_rotation() {
        // From the solved state, stepping labels around the cycle must agree
        // with actually rotating each cube's grid position about the axis.
        for wall in Wall::iter() {
            for negative in [false, true] {
                let mut state = CubeState::default();
                let turning: Vec<CubeId> = state.wall_units(wall).to_vec();
                state.apply_rotation(wall, negative);
                assert_consistent(&state);
                for unit in state.units() {
                    let position = if turning.contains(&unit.id) {
                        unit.home.rotated(wall.axis(), negative)
                    } else {
                        unit.home
                    };
                    let expected: WallSet = Wall::iter()
                        .filter(|side| side.holds_home(position))
                        .collect();
                    assert_eq!(
                        state.membership(unit.id),
                        expected,
                        "cube {} after {}{} turn",
                        unit.id,
                        if negative { "negative " } else { "" },
                        wall
                    );
                }
            }
        }
    }
}
