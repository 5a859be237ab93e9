//! LED animation engine for a 72-LED logo ring driven by two IS31FL3236 chips.
//!
//! The animation core ([`animator`], [`effects`], [`frame`], [`pacing`]) is pure and
//! host-testable. The drivers and the control loop wire it to an RP2040 board.
#![no_std]

pub mod animator;
pub mod audio;
pub mod cap1206;
pub mod channel_map;
#[cfg(feature = "pico1")]
pub mod control_loop;
pub mod effects;
mod error;
pub mod frame;
pub mod gamma;
#[cfg(feature = "pico1")]
mod hardware;
pub mod is31fl3236;
mod never;
pub mod pacing;
pub mod ring_layout;
mod shared_constants;
pub mod spectrum_analyzer;

// Re-export commonly used items
pub use animator::{AnimationMode, Animator};
pub use audio::AudioFrame;
pub use error::{Error, Result};
pub use frame::{Domain, Frame, Rotation};
#[cfg(feature = "pico1")]
pub use hardware::Hardware;
pub use never::Never;
pub use shared_constants::*;
