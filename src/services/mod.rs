pub mod clipboard;
pub mod daemon;
pub mod proxy;
pub mod replayer;
pub mod synthesizer;

pub use clipboard::{create_clipboard, ClipboardSource};
pub use daemon::DaemonReloader;
pub use proxy::{ProxyAction, ProxyPatcher};
pub use replayer::{KeystrokeReplayer, ReplaySummary, ReplayTimings};
pub use synthesizer::{create_synthesizer, KeystrokeSynthesizer};
