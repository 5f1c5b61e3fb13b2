//! Caller-side frame-to-frame state
//!
//! The analyzer and classifier are pure; the only thing a per-frame loop
//! has to carry is the previous analysis. `ShotTracker` owns that pointer
//! and the policy for frames that produced no analysis.

use super::analysis::FrameAnalysis;
use super::config::PhaseThresholds;
use super::phase::{detect_shot_phase_with, ShotPhase};

/// What an indeterminate frame does to the previous analysis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GapPolicy {
    /// Forget it: the next good frame classifies as idle
    #[default]
    Reset,
    /// Keep the last good analysis as previous across the gap
    CarryForward,
}

pub struct ShotTracker {
    thresholds: PhaseThresholds,
    gap_policy: GapPolicy,
    previous: Option<FrameAnalysis>,
    phase: ShotPhase,
    frames_seen: u64,
    indeterminate_frames: u64,
}

impl ShotTracker {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self {
            thresholds,
            gap_policy: GapPolicy::default(),
            previous: None,
            phase: ShotPhase::Idle,
            frames_seen: 0,
            indeterminate_frames: 0,
        }
    }

    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    pub fn set_gap_policy(&mut self, gap_policy: GapPolicy) {
        self.gap_policy = gap_policy;
    }

    pub fn set_thresholds(&mut self, thresholds: PhaseThresholds) {
        self.thresholds = thresholds;
    }

    /// Feed the next frame's analysis (or `None` if it was indeterminate)
    /// and get its shot phase.
    pub fn push(&mut self, current: Option<FrameAnalysis>) -> ShotPhase {
        self.frames_seen += 1;
        self.phase = detect_shot_phase_with(current.as_ref(), self.previous.as_ref(), &self.thresholds);

        match current {
            Some(analysis) => self.previous = Some(analysis),
            None => {
                self.indeterminate_frames += 1;
                if self.gap_policy == GapPolicy::Reset {
                    self.previous = None;
                }
            }
        }

        self.phase
    }

    pub fn previous(&self) -> Option<&FrameAnalysis> {
        self.previous.as_ref()
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    pub fn indeterminate_frames(&self) -> u64 {
        self.indeterminate_frames
    }

    /// Drop the previous analysis and counters
    pub fn reset(&mut self) {
        self.previous = None;
        self.phase = ShotPhase::Idle;
        self.frames_seen = 0;
        self.indeterminate_frames = 0;
    }
}

impl Default for ShotTracker {
    fn default() -> Self {
        Self::new(PhaseThresholds::default())
    }
}
