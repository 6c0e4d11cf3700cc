use std::error::Error;

use chrono::{Local, NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use wake_timer::{
    playback::RodioPlayer,
    screen::{PresetPicker, WakeUpTimerScreen},
    Config, FileTimerStore, FireOutcome, PresetStore, RestoreOutcome, SystemdScheduler,
    TimerManager,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write a default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
    /// list the presets that can be used as a wake-up sound
    Presets,
    /// show the pending timer
    Status,
    /// wake up to PRESET at TIME (24h, HH:MM)
    Set { preset: String, time: String },
    /// cancel the pending timer, also stops a ringing alarm
    Cancel,
    /// run by the scheduler when the timer goes off
    Fire,
    /// re-arm the pending timer, meant to run at login
    Restore,
}

fn print_status(screen: &WakeUpTimerScreen, config: &Config) {
    println!("preset: {}", screen.preset_label());
    match screen.scheduled_at() {
        Some(at) => println!("wakes up at {}", at.format(&config.time_format)),
        None => println!("no wake-up timer scheduled"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("wake_timer").expect("couldn't initialize logger");

    let args = Args::parse();
    let config_path = Config::config_path()?;
    if let Some(Command::Init { force }) = args.command {
        if force || !Config::is_config_present() {
            Config::new().save(&config_path)?;
            println!("wrote {}", config_path.display());
        }
        return Ok(());
    }

    let config = Config::load_or_default(&config_path)?;
    let mut manager = TimerManager::new(
        FileTimerStore::new(Config::state_path()?),
        SystemdScheduler::new(std::env::current_exe()?, vec!["fire".to_string()]),
        || log::info!("wake-up timer scheduled, review prompt may be shown"),
    );

    match args.command.unwrap_or(Command::Status) {
        Command::Init { .. } => {}
        Command::Presets => match PresetPicker::from_store(&config) {
            PresetPicker::Empty { description } => println!("{description}"),
            PresetPicker::Choices(names) => names.iter().for_each(|name| println!("{name}")),
        },
        Command::Status => {
            let screen = WakeUpTimerScreen::load(&manager, &config)?;
            print_status(&screen, &config);
        }
        Command::Set { preset, time } => {
            if config.find_by_name(&preset).is_none() {
                return Err(format!("no preset named {preset}").into());
            }
            let time = NaiveTime::parse_from_str(&time, "%H:%M")?;
            let mut screen = WakeUpTimerScreen::default();
            screen.select_preset(preset);
            screen.schedule(&mut manager, time.hour(), time.minute(), Local::now())?;
            print_status(&screen, &config);
        }
        Command::Cancel => {
            WakeUpTimerScreen::default().reset(&mut manager)?;
            println!("wake-up timer cancelled");
        }
        Command::Fire => {
            let mut player = RodioPlayer::new();
            match manager.fire(&config, &mut player)? {
                FireOutcome::Played(timer) => {
                    println!("waking up to {}", timer.preset_name);
                    player.wait();
                }
                FireOutcome::PresetMissing(timer) => {
                    println!("preset {} no longer exists", timer.preset_name);
                }
                FireOutcome::NothingScheduled => {}
            }
        }
        Command::Restore => match manager.restore(Local::now().timestamp_millis())? {
            RestoreOutcome::Rearmed(timer) => {
                println!("re-armed wake-up timer for {}", timer.preset_name);
            }
            RestoreOutcome::Expired(timer) => {
                println!("missed wake-up timer for {}", timer.preset_name);
            }
            RestoreOutcome::NothingScheduled => {}
        },
    }
    Ok(())
}
