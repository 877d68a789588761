//! Platform adapters feeding [`InputTranslator`](super::InputTranslator).

pub mod winit;
