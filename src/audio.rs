use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Duration;

/// Sound effects for the shell. Tones are synthesized so the binary ships
/// no assets; without an output device the game simply runs silent.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            output: Some((stream, stream_handle)),
        })
    }

    pub fn play_fire(&self) {
        self.play_tone(880.0, Duration::from_millis(60), 0.05);
    }

    pub fn play_explosion(&self) {
        self.play_tone(220.0, Duration::from_millis(120), 0.08);
    }

    pub fn play_game_over(&self) {
        self.play_tone(110.0, Duration::from_millis(600), 0.1);
    }

    fn play_tone(&self, freq: f32, length: Duration, volume: f32) {
        let Some((_, stream_handle)) = &self.output else {
            return;
        };
        // Ignore playback errors; a dropped blip is not worth interrupting
        // the game for.
        if let Ok(sink) = Sink::try_new(stream_handle) {
            sink.append(SineWave::new(freq).take_duration(length).amplify(volume));
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| {
            log::warn!("audio unavailable, continuing without sound: {err}");
            Self { output: None }
        })
    }
}
