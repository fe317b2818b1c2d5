//! Keystroke synthesizers: responsibility and boundaries
//!
//! Each backend delivers exactly one classified KeystrokeEvent per call to whichever
//! window currently holds input focus. Backends never retry and never sleep; pacing
//! and the skip-on-failure policy belong to KeystrokeReplayer.

mod dry_run;
mod osascript;
#[cfg(target_os = "linux")]
mod virtual_device;
mod xdotool;
mod r#trait;

pub use self::r#trait::{create_synthesizer, KeystrokeSynthesizer};
