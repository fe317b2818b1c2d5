pub mod applescript;
#[cfg(target_os = "linux")]
pub mod char_to_evdev_code;

#[cfg(target_os = "linux")]
pub use char_to_evdev_code::{CharToEvdevCode, KeyChord};
