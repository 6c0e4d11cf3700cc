//! a stored timer whose preset was deleted is shown as if nothing was scheduled,
//! but the record itself is left alone until it's cancelled or replaced

use chrono::{DateTime, Local};

use crate::{
    alarm::AlarmScheduler,
    error::Result,
    manager::TimerManager,
    preset::{Preset, PresetStore},
    review::ReviewPrompt,
    store::TimerStore,
    timer::Timer,
};

pub const SELECT_PRESET_LABEL: &str = "Select preset";
pub const PRESET_INFO_DESCRIPTION: &str =
    "Presets are saved sound combinations. Save one from the library to use it as a wake-up sound.";

/// what the preset picker shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetPicker {
    Empty { description: &'static str },
    Choices(Vec<String>),
}

impl PresetPicker {
    #[must_use]
    pub fn from_store<P: PresetStore + ?Sized>(presets: &P) -> Self {
        let names: Vec<_> = presets
            .list_all()
            .iter()
            .map(Preset::name)
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            Self::Empty {
                description: PRESET_INFO_DESCRIPTION,
            }
        } else {
            Self::Choices(names)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WakeUpTimerScreen {
    selected_preset: Option<String>,
    scheduled: Option<Timer>,
}

impl WakeUpTimerScreen {
    /// # Errors
    /// if the stored timer couldn't be read
    pub fn load<S, A, R, P>(manager: &TimerManager<S, A, R>, presets: &P) -> Result<Self>
    where
        S: TimerStore,
        A: AlarmScheduler,
        R: ReviewPrompt,
        P: PresetStore + ?Sized,
    {
        let scheduled = manager.get()?.filter(|timer| {
            let valid = TimerManager::<S, A, R>::resolve(timer.clone(), presets).is_valid();
            if !valid {
                log::warn!(
                    "timer refers to deleted preset {}, showing it as unscheduled",
                    timer.preset_name
                );
            }
            valid
        });
        Ok(Self {
            selected_preset: scheduled.as_ref().map(|timer| timer.preset_name.clone()),
            scheduled,
        })
    }

    #[must_use]
    pub fn preset_label(&self) -> &str {
        self.selected_preset.as_deref().unwrap_or(SELECT_PRESET_LABEL)
    }

    #[must_use]
    pub const fn is_select_preset_enabled(&self) -> bool {
        true
    }

    #[must_use]
    pub const fn is_set_time_enabled(&self) -> bool {
        self.selected_preset.is_some()
    }

    #[must_use]
    pub const fn is_reset_time_enabled(&self) -> bool {
        self.scheduled.is_some()
    }

    #[must_use]
    pub const fn scheduled(&self) -> Option<&Timer> {
        self.scheduled.as_ref()
    }

    /// local time of the pending timer, `None` when shown as unscheduled
    #[must_use]
    pub fn scheduled_at(&self) -> Option<DateTime<Local>> {
        self.scheduled.as_ref().and_then(Timer::local_time)
    }

    pub fn select_preset(&mut self, name: impl Into<String>) {
        self.selected_preset = Some(name.into());
    }

    /// schedules the selected preset for the next `hour:minute`
    ///
    /// returns `None` without touching the manager if no preset is selected
    /// or the time is out of range
    ///
    /// # Errors
    /// whatever [`TimerManager::set`] fails with
    pub fn schedule<S, A, R>(
        &mut self,
        manager: &mut TimerManager<S, A, R>,
        hour: u32,
        minute: u32,
        now: DateTime<Local>,
    ) -> Result<Option<Timer>>
    where
        S: TimerStore,
        A: AlarmScheduler,
        R: ReviewPrompt,
    {
        let Some(timer) = self
            .selected_preset
            .as_ref()
            .and_then(|name| Timer::next_at(name.clone(), hour, minute, now))
        else {
            return Ok(None);
        };
        manager.set(timer.clone())?;
        self.scheduled = Some(timer.clone());
        Ok(Some(timer))
    }

    /// # Errors
    /// whatever [`TimerManager::cancel`] fails with
    pub fn reset<S, A, R>(&mut self, manager: &mut TimerManager<S, A, R>) -> Result<()>
    where
        S: TimerStore,
        A: AlarmScheduler,
        R: ReviewPrompt,
    {
        manager.cancel()?;
        self.scheduled = None;
        Ok(())
    }
}
