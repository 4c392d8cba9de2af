//! Desktop shell around the simulation: input mapping, screen modes and HUD text.
//! Drawing and device capture live in the binary so this library stays testable headless.

pub mod app_loop;
pub mod controls;
pub mod hud_text;
pub mod seed;
pub mod telemetry;

pub const APP_NAME: &str = "Delve";

/// Seeds print as plain decimal so they can be pasted back into `--seed`.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Zero-padded lowercase hex with a `0x` prefix, always 18 characters.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}
