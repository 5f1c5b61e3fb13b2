//! Archery Web - real-time archery form feedback
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

mod bridge;
pub mod form;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    analyze_pose, current_phase, form_config_json, process_frame, reset_session,
    set_form_config, set_gap_policy, FormReport, FrameUpdate,
};
pub use bridge::{analyze_flat, decode_landmarks, FrameIssue, VALUES_PER_LANDMARK};

pub use form::{
    analyze_archery_form, detect_shot_phase, FormConfig, FrameAnalysis, Keypoint, Landmark,
    ShotPhase, ShotTracker, Side,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("🏹 Archery form analysis ready");
}
