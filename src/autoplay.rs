//! Autoplay replay speeds and the currently running mode.

use std::time::Duration;

use crate::game::GameData;

/// Replay cadence selected from the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayDelay {
    /// Fixed pause between moves.
    Fixed(Duration),
    /// Replays with the clock time recorded for each move.
    Realtime,
    /// Dwells longer on moves that lost more evaluation.
    EvalLoss,
}

#[derive(Debug, Clone, Copy)]
pub struct AutoplaySpeed {
    pub name: &'static str,
    pub delay: AutoplayDelay,
}

pub const BASE_SPEEDS: [AutoplaySpeed; 2] = [
    AutoplaySpeed {
        name: "fast",
        delay: AutoplayDelay::Fixed(Duration::from_millis(1000)),
    },
    AutoplaySpeed {
        name: "slow",
        delay: AutoplayDelay::Fixed(Duration::from_millis(5000)),
    },
];

pub const REALTIME_SPEED: AutoplaySpeed = AutoplaySpeed {
    name: "realtime_replay",
    delay: AutoplayDelay::Realtime,
};

pub const EVAL_LOSS_SPEED: AutoplaySpeed = AutoplaySpeed {
    name: "by_eval_loss",
    delay: AutoplayDelay::EvalLoss,
};

/// Tracks which replay mode is running, if any.
#[derive(Debug, Default)]
pub struct Autoplay {
    current: Option<AutoplayDelay>,
}

impl Autoplay {
    pub fn active(&self, delay: AutoplayDelay) -> bool {
        self.current == Some(delay)
    }

    pub fn playing(&self) -> bool {
        self.current.is_some()
    }

    /// Selects `delay`, or stops when it is already running.
    pub fn toggle(&mut self, delay: AutoplayDelay) {
        self.current = if self.active(delay) { None } else { Some(delay) };
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    /// Pause before advancing past `ply`, for the running mode. `None` when
    /// nothing is playing.
    pub fn step_delay(&self, data: &GameData, ply: usize) -> Option<Duration> {
        match self.current? {
            AutoplayDelay::Fixed(delay) => Some(delay),
            AutoplayDelay::Realtime => Some(
                data.move_centis
                    .get(ply)
                    .map(|centis| Duration::from_millis(u64::from(*centis) * 10))
                    .unwrap_or(Duration::from_millis(1000)),
            ),
            AutoplayDelay::EvalLoss => {
                let loss = data
                    .analysis
                    .as_ref()
                    .and_then(|a| a.cp_loss.get(ply))
                    .copied()
                    .unwrap_or(0);
                // Dwell between 300ms and 3s depending on how bad the move was.
                Some(Duration::from_millis(
                    (300 + u64::from(loss) * 30).min(3000),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ServerAnalysis, Source, VariantKey};

    fn game() -> GameData {
        GameData {
            id: "abcd1234".to_string(),
            source: Source::Lobby,
            variant: VariantKey::Standard,
            imported_by: None,
            move_centis: vec![150, 300],
            analysis: Some(ServerAnalysis {
                cp_loss: vec![0, 80],
            }),
            user_analysis: false,
            initial_fen: None,
        }
    }

    #[test]
    fn toggle_selects_then_clears() {
        let mut autoplay = Autoplay::default();
        let fast = BASE_SPEEDS[0].delay;
        assert!(!autoplay.active(fast));
        autoplay.toggle(fast);
        assert!(autoplay.active(fast));
        assert!(autoplay.playing());
        autoplay.toggle(fast);
        assert!(!autoplay.playing());
    }

    #[test]
    fn switching_modes_replaces_the_running_one() {
        let mut autoplay = Autoplay::default();
        autoplay.toggle(BASE_SPEEDS[0].delay);
        autoplay.toggle(AutoplayDelay::Realtime);
        assert!(autoplay.active(AutoplayDelay::Realtime));
        assert!(!autoplay.active(BASE_SPEEDS[0].delay));
    }

    #[test]
    fn realtime_delay_follows_move_centis() {
        let mut autoplay = Autoplay::default();
        autoplay.toggle(AutoplayDelay::Realtime);
        let data = game();
        assert_eq!(
            autoplay.step_delay(&data, 0),
            Some(Duration::from_millis(1500))
        );
        // Past the recorded moves the fallback pace applies.
        assert_eq!(
            autoplay.step_delay(&data, 9),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn eval_loss_delay_scales_with_centipawn_loss() {
        let mut autoplay = Autoplay::default();
        autoplay.toggle(AutoplayDelay::EvalLoss);
        let data = game();
        assert_eq!(
            autoplay.step_delay(&data, 0),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            autoplay.step_delay(&data, 1),
            Some(Duration::from_millis(2700))
        );
        assert_eq!(autoplay.step_delay(&data, 5), Some(Duration::from_millis(300)));
    }

    #[test]
    fn no_delay_when_stopped() {
        let autoplay = Autoplay::default();
        assert_eq!(autoplay.step_delay(&game(), 0), None);
    }
}
