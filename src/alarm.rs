use std::{
    fmt,
    path::PathBuf,
    process::{Command, Output},
};

use chrono::{Local, TimeZone};

use crate::error::SchedulerError;

/// identifies whose activation is armed so other alarms of the process are left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationTarget(&'static str);

impl ActivationTarget {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActivationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const WAKE_UP_TIMER: ActivationTarget = ActivationTarget::new("wake-timer-wake-up");

/// platform facility that starts the process at or after an instant,
/// even if it isn't running at the time
pub trait AlarmScheduler {
    /// supersedes whatever was armed for `target` before
    fn arm(&mut self, at_millis: i64, target: ActivationTarget) -> Result<(), SchedulerError>;

    /// must succeed when nothing is armed
    fn disarm(&mut self, target: ActivationTarget) -> Result<(), SchedulerError>;
}

const SYSTEMD_RUN: &str = "systemd-run";
const SYSTEMCTL: &str = "systemctl";
/// `systemctl stop` exit code for a unit that isn't loaded
const UNIT_NOT_LOADED: i32 = 5;
const CALENDAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// arms a transient systemd user timer that runs `program args..` once
///
/// transient units don't survive a reboot or the user manager exiting,
/// [`crate::TimerManager::restore`] re-arms from the stored record at login
#[derive(Debug, Clone)]
pub struct SystemdScheduler {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemdScheduler {
    #[must_use]
    pub const fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// # Errors
    /// if `at_millis` has no single local time
    pub fn arm_command(
        &self,
        at_millis: i64,
        target: ActivationTarget,
    ) -> Result<Command, SchedulerError> {
        let at = Local
            .timestamp_millis_opt(at_millis)
            .single()
            .ok_or(SchedulerError::InvalidInstant(at_millis))?;
        let mut command = Command::new(SYSTEMD_RUN);
        command
            .arg("--user")
            .arg(format!("--unit={target}"))
            // unload the service once it exits, even if it failed
            .arg("--collect")
            .arg(format!("--on-calendar={}", at.format(CALENDAR_FORMAT)))
            .arg("--timer-property=AccuracySec=1s")
            .arg(&self.program)
            .args(&self.args);
        Ok(command)
    }

    /// stops the timer and the service it started, which silences a ringing alarm
    #[must_use]
    pub fn disarm_command(target: ActivationTarget) -> Command {
        let mut command = Command::new(SYSTEMCTL);
        command
            .arg("--user")
            .arg("stop")
            .arg(format!("{target}.timer"))
            .arg(format!("{target}.service"));
        command
    }

    /// forgets units left in the failed state so the unit name can be reused
    #[must_use]
    pub fn reset_failed_command(target: ActivationTarget) -> Command {
        let mut command = Command::new(SYSTEMCTL);
        command
            .arg("--user")
            .arg("reset-failed")
            .arg(format!("{target}.timer"))
            .arg(format!("{target}.service"));
        command
    }
}

fn run(mut command: Command) -> Result<Output, SchedulerError> {
    let program = command.get_program().to_string_lossy().into_owned();
    log::debug!("running {command:?}");
    command
        .output()
        .map_err(|source| SchedulerError::Spawn { program, source })
}

fn rejected(program: &str, output: &Output) -> SchedulerError {
    SchedulerError::Rejected {
        program: program.to_string(),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl AlarmScheduler for SystemdScheduler {
    fn arm(&mut self, at_millis: i64, target: ActivationTarget) -> Result<(), SchedulerError> {
        // transient units can't be redefined while loaded
        self.disarm(target)?;
        let output = run(self.arm_command(at_millis, target)?)?;
        if !output.status.success() {
            return Err(rejected(SYSTEMD_RUN, &output));
        }
        log::info!("armed {target} for {at_millis}");
        Ok(())
    }

    fn disarm(&mut self, target: ActivationTarget) -> Result<(), SchedulerError> {
        let output = run(Self::disarm_command(target))?;
        if !output.status.success() && output.status.code() != Some(UNIT_NOT_LOADED) {
            return Err(rejected(SYSTEMCTL, &output));
        }
        // fails when neither unit is in the failed state, which is the usual case
        let output = run(Self::reset_failed_command(target))?;
        if !output.status.success() {
            log::debug!(
                "reset-failed for {target}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
