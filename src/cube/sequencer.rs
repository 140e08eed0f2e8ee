use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::{debug, info};

use crate::cube::error::CubeError;
use crate::cube::state::CubeState;
use crate::cube::wall::Wall;
use crate::cube::CubeId;

/// One queued quarter turn, consumed in FIFO order during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOp {
    pub wall: Wall,
    pub negative: bool,
}

impl Display for RotationOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "negative {}", self.wall)
        } else {
            write!(f, "{}", self.wall)
        }
    }
}

/// Parse a whitespace-separated move list such as `"top left' front"`,
/// where a trailing `'` or `-` marks the negative direction.
pub fn parse_sequence(text: &str) -> Result<Vec<RotationOp>, CubeError> {
    text.split_whitespace()
        .map(|token| {
            let (name, negative) = match token.strip_suffix(['\'', '-']) {
                Some(name) => (name, true),
                None => (token, false),
            };
            let wall =
                Wall::from_str(name).map_err(|_| CubeError::UnknownWall(token.to_string()))?;
            Ok(RotationOp { wall, negative })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AcceptingInput,
    Playing,
}

/// What the sequencer needs from the rendering side: start the visual turn
/// for the given cubes, and later report completion exactly once through
/// `Sequencer::turn_finished`.
pub trait Choreography {
    fn begin_rotation(&mut self, op: RotationOp, units: Vec<CubeId>);
}

/// Serializes rotation requests and replays them one at a time, applying
/// the membership relabeling as each visual turn completes.
pub struct Sequencer {
    state: CubeState,
    queue: VecDeque<RotationOp>,
    active: Option<RotationOp>,
    phase: Phase,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            state: CubeState::default(),
            queue: VecDeque::new(),
            active: None,
            phase: Phase::AcceptingInput,
        }
    }
}

impl Sequencer {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    /// Append an op to the queue. Requests arriving mid-playback are
    /// ignored rather than queued for later.
    pub fn queue_rotation(&mut self, op: RotationOp) -> bool {
        match self.phase {
            Phase::AcceptingInput => {
                self.queue.push_back(op);
                info!("Added {op} rotation.");
                true
            }
            Phase::Playing => {
                debug!("Ignored {op} rotation while playing.");
                false
            }
        }
    }

    /// Begin draining the queue. Starting with nothing queued stays in
    /// `AcceptingInput`.
    pub fn start(&mut self, stage: &mut impl Choreography) -> bool {
        if self.phase == Phase::Playing || self.queue.is_empty() {
            return false;
        }
        self.phase = Phase::Playing;
        info!("Sequence started with {} rotations.", self.queue.len());
        self.begin_next(stage);
        true
    }

    /// Completion callback for the active turn: relabel memberships, then
    /// move on to the next queued op or back to accepting input.
    pub fn turn_finished(&mut self, stage: &mut impl Choreography) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(op) = self.active.take() {
            self.state.apply_rotation(op.wall, op.negative);
        }
        self.begin_next(stage);
    }

    fn begin_next(&mut self, stage: &mut impl Choreography) {
        match self.queue.pop_front() {
            Some(op) => {
                self.active = Some(op);
                let units = self.state.wall_units(op.wall).to_vec();
                stage.begin_rotation(op, units);
            }
            None => {
                self.phase = Phase::AcceptingInput;
                self.queue = VecDeque::new();
                info!("Sequence complete.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::GridPos;

    #[derive(Default)]
    struct RecordingStage {
        begun: Vec<(RotationOp, Vec<CubeId>)>,
    }

    impl Choreography for RecordingStage {
        fn begin_rotation(&mut self, op: RotationOp, units: Vec<CubeId>) {
            self.begun.push((op, units));
        }
    }

    fn op(wall: Wall, negative: bool) -> RotationOp {
        RotationOp { wall, negative }
    }

    #[test]
    fn playback_is_fifo_and_sequential() {
        let mut sequencer = Sequencer::default();
        let mut stage = RecordingStage::default();
        let ops = [
            op(Wall::Top, false),
            op(Wall::Right, false),
            op(Wall::Front, true),
        ];
        for o in ops {
            assert!(sequencer.queue_rotation(o));
        }
        assert!(sequencer.start(&mut stage));
        assert_eq!(stage.begun.len(), 1, "one turn at a time");
        sequencer.turn_finished(&mut stage);
        assert_eq!(stage.begun.len(), 2);
        sequencer.turn_finished(&mut stage);
        assert_eq!(stage.begun.len(), 3);
        sequencer.turn_finished(&mut stage);
        assert_eq!(stage.begun.len(), 3);
        let played: Vec<RotationOp> = stage.begun.iter().map(|(o, _)| *o).collect();
        assert_eq!(played, ops);
        assert_eq!(sequencer.phase(), Phase::AcceptingInput);
    }

    #[test]
    fn membership_updates_between_turns() {
        let mut sequencer = Sequencer::default();
        let mut stage = RecordingStage::default();
        let corner = sequencer
            .state()
            .units()
            .iter()
            .find(|unit| unit.home == GridPos { x: 1, y: 1, z: 1 })
            .unwrap()
            .id;
        sequencer.queue_rotation(op(Wall::Top, false));
        sequencer.queue_rotation(op(Wall::Right, false));
        sequencer.start(&mut stage);
        assert!(stage.begun[0].1.contains(&corner));
        sequencer.turn_finished(&mut stage);
        // the top turn carried that corner over to the left wall, so the
        // right turn must not include it
        assert!(!stage.begun[1].1.contains(&corner));
        sequencer.turn_finished(&mut stage);
    }

    #[test]
    fn requests_during_playback_are_dropped() {
        let mut sequencer = Sequencer::default();
        let mut stage = RecordingStage::default();
        sequencer.queue_rotation(op(Wall::Left, false));
        sequencer.start(&mut stage);
        assert!(!sequencer.queue_rotation(op(Wall::Back, true)));
        sequencer.turn_finished(&mut stage);
        assert_eq!(stage.begun.len(), 1, "dropped op must never play");
        assert_eq!(sequencer.phase(), Phase::AcceptingInput);
        // back to accepting: queueing works again
        assert!(sequencer.queue_rotation(op(Wall::Back, true)));
    }

    #[test]
    fn empty_start_stays_accepting() {
        let mut sequencer = Sequencer::default();
        let mut stage = RecordingStage::default();
        assert!(!sequencer.start(&mut stage));
        assert_eq!(sequencer.phase(), Phase::AcceptingInput);
        assert!(stage.begun.is_empty());
    }

    #[test]
    fn sequence_parsing() {
        let ops = parse_sequence("top left' front-").unwrap();
        assert_eq!(
            ops,
            vec![
                op(Wall::Top, false),
                op(Wall::Left, true),
                op(Wall::Front, true),
            ]
        );
        assert!(parse_sequence("").unwrap().is_empty());
        assert!(matches!(
            parse_sequence("top sideways"),
            Err(CubeError::UnknownWall(token)) if token == "sideways"
        ));
    }
}
