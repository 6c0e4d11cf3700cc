use crate::{
    alarm::{AlarmScheduler, WAKE_UP_TIMER},
    error::Result,
    playback::Player,
    preset::{Preset, PresetStore},
    review::ReviewPrompt,
    store::TimerStore,
    timer::Timer,
};

/// a timer paired with the preset it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTimer<'p> {
    pub timer: Timer,
    pub preset: &'p Preset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'p> {
    Valid(ResolvedTimer<'p>),
    /// the preset was deleted after the timer was set
    Invalid,
}

impl Resolution<'_> {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FireOutcome {
    NothingScheduled,
    Played(Timer),
    PresetMissing(Timer),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    NothingScheduled,
    Rearmed(Timer),
    /// the instant passed while nothing was armed, the record was dropped
    Expired(Timer),
}

/// the only writer of the timer state and the only caller of the alarm scheduler
/// for the wake-up timer
///
/// ```text
/// Unscheduled --set--> Scheduled --cancel--> Unscheduled
/// Scheduled --set--> Scheduled
/// Scheduled --fire--> Unscheduled
/// ```
#[derive(Debug)]
pub struct TimerManager<S, A, R> {
    store: S,
    scheduler: A,
    review: R,
}

impl<S, A, R> TimerManager<S, A, R>
where
    S: TimerStore,
    A: AlarmScheduler,
    R: ReviewPrompt,
{
    #[must_use]
    pub const fn new(store: S, scheduler: A, review: R) -> Self {
        Self {
            store,
            scheduler,
            review,
        }
    }

    /// replaces any pending timer with `timer` and arms the scheduler for it
    ///
    /// neither the instant nor the preset name are checked here
    ///
    /// # Errors
    /// `Persistence` if the record couldn't be written, `Scheduling` if the
    /// scheduler refused, in which case any earlier activation is disarmed
    /// and the record is rolled back
    pub fn set(&mut self, timer: Timer) -> Result<()> {
        self.store.save(&timer)?;
        if let Err(e) = self.scheduler.arm(timer.at_millis, WAKE_UP_TIMER) {
            if let Err(disarm_err) = self.scheduler.disarm(WAKE_UP_TIMER) {
                log::error!("couldn't disarm after failed arm: {disarm_err}");
            }
            if let Err(clear_err) = self.store.clear() {
                log::error!("couldn't roll back timer after failed arm: {clear_err}");
            }
            return Err(e.into());
        }
        log::info!(
            "wake-up timer set for preset {} at {}",
            timer.preset_name,
            timer.at_millis
        );
        self.review.maybe_ask_for_review();
        Ok(())
    }

    /// the raw stored timer, the preset isn't looked up
    ///
    /// # Errors
    /// if the store couldn't be read
    pub fn get(&self) -> Result<Option<Timer>> {
        Ok(self.store.load()?)
    }

    /// disarms and forgets the pending timer, doing nothing is fine too
    ///
    /// # Errors
    /// if the record couldn't be cleared, a failed disarm is only logged
    pub fn cancel(&mut self) -> Result<()> {
        if let Err(e) = self.scheduler.disarm(WAKE_UP_TIMER) {
            log::warn!("couldn't disarm wake-up timer: {e}");
        }
        self.store.clear()?;
        log::info!("wake-up timer cancelled");
        Ok(())
    }

    /// re-arms the stored timer after the scheduler lost it, e.g. across a reboot
    ///
    /// a timer whose instant is no later than `now_millis` is cleared instead
    ///
    /// # Errors
    /// if the store couldn't be read or cleared, or the scheduler refused,
    /// in which case the record is kept so a later restore can retry
    pub fn restore(&mut self, now_millis: i64) -> Result<RestoreOutcome> {
        let Some(timer) = self.store.load()? else {
            return Ok(RestoreOutcome::NothingScheduled);
        };
        if timer.at_millis <= now_millis {
            self.store.clear()?;
            log::warn!(
                "wake-up timer for {} at {} was missed, dropping it",
                timer.preset_name,
                timer.at_millis
            );
            return Ok(RestoreOutcome::Expired(timer));
        }
        self.scheduler.arm(timer.at_millis, WAKE_UP_TIMER)?;
        log::info!("wake-up timer re-armed for {}", timer.at_millis);
        Ok(RestoreOutcome::Rearmed(timer))
    }

    #[must_use]
    pub fn resolve<P>(timer: Timer, presets: &P) -> Resolution<'_>
    where
        P: PresetStore + ?Sized,
    {
        match presets.find_by_name(&timer.preset_name) {
            Some(preset) => Resolution::Valid(ResolvedTimer { timer, preset }),
            None => Resolution::Invalid,
        }
    }

    /// called when the scheduler activates the process, only uses what's persisted
    ///
    /// the record is cleared whether or not the preset still exists
    ///
    /// # Errors
    /// if the store couldn't be read or cleared, or playback couldn't start
    pub fn fire<P, Pl>(&mut self, presets: &P, player: &mut Pl) -> Result<FireOutcome>
    where
        P: PresetStore + ?Sized,
        Pl: Player + ?Sized,
    {
        let Some(timer) = self.store.load()? else {
            log::info!("woke up with no timer scheduled");
            return Ok(FireOutcome::NothingScheduled);
        };
        let resolution = Self::resolve(timer.clone(), presets);
        let cleared = self.store.clear();
        if let Err(e) = &cleared {
            log::error!("couldn't clear fired timer: {e}");
        }
        let outcome = match resolution {
            Resolution::Valid(resolved) => {
                player.play(resolved.preset)?;
                FireOutcome::Played(resolved.timer)
            }
            Resolution::Invalid => {
                log::warn!("preset {} is gone, not playing", timer.preset_name);
                FireOutcome::PresetMissing(timer)
            }
        };
        cleared?;
        Ok(outcome)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn scheduler(&self) -> &A {
        &self.scheduler
    }

    #[must_use]
    pub const fn review(&self) -> &R {
        &self.review
    }
}
