//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod report;
mod session;

pub use landmarks::{analyze_flat, decode_landmarks, FrameIssue, VALUES_PER_LANDMARK};

pub use report::{FormReport, FrameUpdate};

pub use session::{
    analyze_pose,
    process_frame,
    current_phase,
    reset_session,
    set_gap_policy,
    set_form_config,
    form_config_json,
};
