//! the fire path runs in a fresh process, so everything here goes through the file store

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wake_timer::{
    error::{PlaybackError, SchedulerError},
    playback::Player,
    ActivationTarget, AlarmScheduler, FileTimerStore, FireOutcome, Preset, PresetSound,
    RestoreOutcome, Timer, TimerManager, WAKE_UP_TIMER,
};

#[derive(Debug, Default)]
struct FakeScheduler {
    armed: Vec<(i64, ActivationTarget)>,
}

impl AlarmScheduler for FakeScheduler {
    fn arm(&mut self, at_millis: i64, target: ActivationTarget) -> Result<(), SchedulerError> {
        self.armed.retain(|(_, armed)| *armed != target);
        self.armed.push((at_millis, target));
        Ok(())
    }

    fn disarm(&mut self, target: ActivationTarget) -> Result<(), SchedulerError> {
        self.armed.retain(|(_, armed)| *armed != target);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FakePlayer {
    played: Vec<Preset>,
}

impl Player for FakePlayer {
    fn play(&mut self, preset: &Preset) -> Result<(), PlaybackError> {
        self.played.push(preset.clone());
        Ok(())
    }
}

fn catalogue() -> Vec<Preset> {
    vec![
        Preset::new(
            "morning",
            vec![PresetSound::new(PathBuf::from("birds.mp3"), 80.0)],
        ),
        Preset::new("rain", vec![]),
    ]
}

fn manager(path: PathBuf) -> TimerManager<FileTimerStore, FakeScheduler, impl FnMut()> {
    TimerManager::new(FileTimerStore::new(path), FakeScheduler::default(), || {})
}

#[test]
fn fires_after_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("timer.toml");

    let mut scheduling = manager(path.clone());
    scheduling.set(Timer::new("morning", 1_792_000_000_000)).unwrap();
    assert_eq!(
        scheduling.scheduler().armed,
        [(1_792_000_000_000, WAKE_UP_TIMER)]
    );
    drop(scheduling);

    let mut woken = manager(path.clone());
    let mut player = FakePlayer::default();
    let outcome = woken.fire(&catalogue(), &mut player).unwrap();
    assert_eq!(
        outcome,
        FireOutcome::Played(Timer::new("morning", 1_792_000_000_000))
    );
    assert_eq!(player.played, [catalogue()[0].clone()]);

    // a second activation finds nothing to do
    let outcome = manager(path).fire(&catalogue(), &mut player).unwrap();
    assert_eq!(outcome, FireOutcome::NothingScheduled);
    assert_eq!(player.played.len(), 1);
}

#[test]
fn deleted_preset_is_skipped_after_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("timer.toml");
    manager(path.clone())
        .set(Timer::new("gone", 1_792_000_000_000))
        .unwrap();

    let mut woken = manager(path.clone());
    let mut player = FakePlayer::default();
    let outcome = woken.fire(&catalogue(), &mut player).unwrap();
    assert_eq!(
        outcome,
        FireOutcome::PresetMissing(Timer::new("gone", 1_792_000_000_000))
    );
    assert!(player.played.is_empty());
    assert_eq!(manager(path).get().unwrap(), None);
}

#[test]
fn reschedule_and_cancel_across_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("timer.toml");

    manager(path.clone()).set(Timer::new("morning", 10)).unwrap();
    manager(path.clone()).set(Timer::new("rain", 20)).unwrap();
    assert_eq!(
        manager(path.clone()).get().unwrap(),
        Some(Timer::new("rain", 20))
    );

    manager(path.clone()).cancel().unwrap();
    assert_eq!(manager(path.clone()).get().unwrap(), None);
    manager(path).cancel().unwrap();
}

#[test]
fn restore_rearms_after_scheduler_lost_units() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("timer.toml");
    manager(path.clone())
        .set(Timer::new("morning", 1_792_000_000_000))
        .unwrap();

    // a fresh scheduler has nothing armed, like the user manager after a reboot
    let mut after_login = manager(path);
    let outcome = after_login.restore(1_791_000_000_000).unwrap();
    assert_eq!(
        outcome,
        RestoreOutcome::Rearmed(Timer::new("morning", 1_792_000_000_000))
    );
    assert_eq!(
        after_login.scheduler().armed,
        [(1_792_000_000_000, WAKE_UP_TIMER)]
    );
}
