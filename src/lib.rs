#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms, missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

pub mod alarm;
pub mod config;
pub mod error;
pub mod manager;
pub mod playback;
pub mod preset;
pub mod review;
/// what the wake-up timer screen shows
pub mod screen;
pub mod store;
pub mod timer;

pub use alarm::{ActivationTarget, AlarmScheduler, SystemdScheduler, WAKE_UP_TIMER};
pub use config::Config;
pub use error::{Error, Result};
pub use manager::{FireOutcome, Resolution, ResolvedTimer, RestoreOutcome, TimerManager};
pub use preset::{Preset, PresetSound, PresetStore};
pub use review::ReviewPrompt;
pub use store::{FileTimerStore, MemoryTimerStore, TimerStore};
pub use timer::Timer;
