//! Time subsystem.
//!
//! Provides frame timing and refresh scheduling without coupling to a window
//! system. Intended usage:
//! - one `FrameClock` per scene
//! - one `RefreshSource` driving the scene's loop; `TimerRefresh` is the
//!   fallback when the host has no display-refresh signal

mod frame_clock;
mod refresh;

pub use frame_clock::{FrameClock, FrameInfo};
pub use refresh::{RefreshSource, TimerRefresh};
