//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! `InputTranslator` owns the small amount of state needed to turn raw
//! button/touch/key transitions into the pointer and key event stream the
//! scene's listener consumes; `platform::winit` feeds it from window events.

mod translate;
mod types;

pub mod platform;

pub use translate::InputTranslator;
pub use types::{InputEvent, Key, KeyKind, Modifiers, MouseButton, PointerKind};
