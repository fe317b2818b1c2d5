pub mod paste;
pub mod proxy;

pub use paste::{parse_delay, run_paste, PasteOptions, PasteOutcome};
pub use proxy::{run_proxy, ProxyOptions};
