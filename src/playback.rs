use std::{fmt, fs::File, io::BufReader};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::{error::PlaybackError, preset::Preset};

/// starts the sounds of a preset
pub trait Player {
    fn play(&mut self, preset: &Preset) -> Result<(), PlaybackError>;
}

/// plays every sound of a preset on its own sink, looping forever
///
/// the audio output is only opened by the first `play`
#[derive(Default)]
pub struct RodioPlayer {
    // dropping the stream stops all sinks
    stream: Option<OutputStream>,
    sinks: Vec<Sink>,
}

impl fmt::Debug for RodioPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RodioPlayer")
            .field("open", &self.stream.is_some())
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

impl RodioPlayer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stream: None,
            sinks: Vec::new(),
        }
    }

    /// blocks while anything is still playing
    pub fn wait(self) {
        for sink in &self.sinks {
            sink.sleep_until_end();
        }
    }
}

impl Player for RodioPlayer {
    fn play(&mut self, preset: &Preset) -> Result<(), PlaybackError> {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => OutputStreamBuilder::open_default_stream()?,
        };
        let mixer = self.stream.insert(stream).mixer();
        for sound in &preset.sounds {
            let file = File::open(&sound.path).map_err(|source| PlaybackError::Open {
                path: sound.path.clone(),
                source,
            })?;
            let input = Decoder::new(BufReader::new(file))
                .map_err(|source| PlaybackError::Decode {
                    path: sound.path.clone(),
                    source,
                })?
                .repeat_infinite();
            let sink = Sink::connect_new(mixer);
            sink.set_volume(sound.volume / 100.0);
            sink.append(input);
            sink.play();
            self.sinks.push(sink);
        }
        log::info!("playing preset {}", preset.name);
        Ok(())
    }
}
