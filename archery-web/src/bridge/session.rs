//! Per-page analysis session and the WASM entry points
//!
//! Holds the active config and the shot tracker between frames. The pose
//! pipeline in JavaScript calls `process_frame` once per video frame.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::landmarks::{analyze_flat, FrameIssue};
use super::report::{FormReport, FrameUpdate};
use crate::form::{ConfigError, FormConfig, FrameAnalysis, GapPolicy, ShotTracker};

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

struct Session {
    config: FormConfig,
    tracker: ShotTracker,
    /// Last reason a frame failed, so a persistent gap warns once
    last_issue: Option<FrameIssue>,
}

impl Default for Session {
    fn default() -> Self {
        let config = FormConfig::default();
        Self {
            tracker: ShotTracker::new(config.phase.clone()),
            config,
            last_issue: None,
        }
    }
}

impl Session {
    fn analyze(&mut self, data: &[f32]) -> Option<FrameAnalysis> {
        match analyze_flat(data, &self.config) {
            Ok(analysis) => {
                if self.last_issue.take().is_some() {
                    console_log!("🎯 Archer back in frame");
                }
                Some(analysis)
            }
            Err(issue) => {
                if self.last_issue != Some(issue) {
                    web_sys::console::warn_1(&issue.to_string().into());
                }
                self.last_issue = Some(issue);
                None
            }
        }
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

// ============================================================================
// WASM API
// ============================================================================

/// Analyze a single frame without touching the shot tracker
#[wasm_bindgen]
pub fn analyze_pose(data: &[f32]) -> Option<FormReport> {
    SESSION.with(|session_cell| {
        session_cell.borrow_mut().analyze(data).map(FormReport::new)
    })
}

/// Analyze a frame and advance the shot tracker.
///
/// Frames must arrive in capture order; the phase compares each frame
/// against the one before it.
#[wasm_bindgen]
pub fn process_frame(data: &[f32]) -> FrameUpdate {
    SESSION.with(|session_cell| {
        let mut session = session_cell.borrow_mut();
        let analysis = session.analyze(data);
        let phase = session.tracker.push(analysis.clone());
        FrameUpdate::new(analysis, phase)
    })
}

/// Phase of the most recent `process_frame` call
#[wasm_bindgen]
pub fn current_phase() -> String {
    SESSION.with(|session_cell| session_cell.borrow().tracker.phase().name().to_string())
}

/// Forget the previous frame, e.g. when the video source changes
#[wasm_bindgen]
pub fn reset_session() {
    SESSION.with(|session_cell| {
        let mut session = session_cell.borrow_mut();
        session.tracker.reset();
        session.last_issue = None;
    });
    console_log!("🔄 Shot tracking reset");
}

/// Keep the last good frame across undetected frames instead of resetting
#[wasm_bindgen]
pub fn set_gap_policy(carry_forward: bool) {
    let policy = if carry_forward {
        GapPolicy::CarryForward
    } else {
        GapPolicy::Reset
    };
    SESSION.with(|session_cell| session_cell.borrow_mut().tracker.set_gap_policy(policy));
}

/// Replace the scoring and phase thresholds from (possibly partial) JSON
#[wasm_bindgen]
pub fn set_form_config(json: &str) -> Result<(), JsValue> {
    let config = FormConfig::from_json(json)?;
    SESSION.with(|session_cell| {
        let mut session = session_cell.borrow_mut();
        session.tracker.set_thresholds(config.phase.clone());
        session.config = config;
    });
    console_log!("✅ Form config updated");
    Ok(())
}

/// Active config as JSON
#[wasm_bindgen]
pub fn form_config_json() -> String {
    SESSION.with(|session_cell| {
        serde_json::to_string(&session_cell.borrow().config).unwrap_or_else(|_| "{}".to_string())
    })
}
