//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `briefnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("briefnote_core ping={}", briefnote_core::ping());
    println!("briefnote_core version={}", briefnote_core::core_version());
}
