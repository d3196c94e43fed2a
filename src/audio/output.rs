//! Tone sinks: where queued tones end up

use std::sync::Arc;

use tracing::{debug, info};

use super::{Tone, ToneSink};

/// Pick the sink for this process: the audio device when built with the
/// `audio` feature and one is available, otherwise a logging sink.
pub fn open_sink(silent: bool) -> Arc<dyn ToneSink> {
    if silent {
        info!("Silent mode, tones will be logged only");
        return Arc::new(LogSink);
    }

    #[cfg(feature = "audio")]
    {
        match RodioSink::spawn() {
            Ok(sink) => return Arc::new(sink),
            Err(e) => tracing::warn!("{:#}, falling back to logged tones", e),
        }
    }

    #[cfg(not(feature = "audio"))]
    info!("Built without audio output, tones will be logged only");

    Arc::new(LogSink)
}

/// Discards every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn play(&self, _tone: Tone) {}
}

/// Logs tones instead of playing them (headless hosts, `--silent`)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ToneSink for LogSink {
    fn play(&self, tone: Tone) {
        debug!(
            "tone {:.0}Hz for {}ms at gain {:.3} (+{}ms)",
            tone.frequency_hz, tone.duration_ms, tone.gain, tone.delay_ms
        );
    }
}

#[cfg(feature = "audio")]
pub use self::device::RodioSink;

#[cfg(feature = "audio")]
mod device {
    use std::{
        sync::mpsc,
        thread,
        time::Duration,
    };

    use anyhow::{anyhow, Context};
    use rodio::{buffer::SamplesBuffer, OutputStream, Source};
    use tracing::{debug, info, warn};

    use crate::audio::{synth, Tone, ToneSink};

    /// Plays tones on the default output device.
    ///
    /// The rodio stream is not `Send`, so it lives on its own thread and
    /// tones are handed over through a channel.
    pub struct RodioSink {
        tx: mpsc::Sender<Tone>,
    }

    impl RodioSink {
        /// Open the default output device on a dedicated thread
        pub fn spawn() -> anyhow::Result<Self> {
            let (tx, rx) = mpsc::channel::<Tone>();
            let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

            thread::Builder::new()
                .name("tone-output".to_string())
                .spawn(move || {
                    let (_stream, handle) = match OutputStream::try_default() {
                        Ok(pair) => {
                            let _ = ready_tx.send(Ok(()));
                            pair
                        }
                        Err(e) => {
                            let _ = ready_tx.send(Err(e.to_string()));
                            return;
                        }
                    };
                    info!("Audio output opened");

                    for tone in rx {
                        if tone.gain <= 0.0 {
                            continue;
                        }
                        let samples = synth::render(&tone, synth::SAMPLE_RATE);
                        let source = SamplesBuffer::new(1, synth::SAMPLE_RATE, samples)
                            .delay(Duration::from_millis(tone.delay_ms));
                        if let Err(e) = handle.play_raw(source) {
                            warn!("Failed to play tone: {}", e);
                        }
                    }
                    debug!("Tone channel closed, audio thread exiting");
                })
                .context("Failed to spawn audio thread")?;

            match ready_rx.recv() {
                Ok(Ok(())) => Ok(Self { tx }),
                Ok(Err(e)) => Err(anyhow!("No audio output available: {}", e)),
                Err(_) => Err(anyhow!("Audio thread exited during startup")),
            }
        }
    }

    impl ToneSink for RodioSink {
        fn play(&self, tone: Tone) {
            if self.tx.send(tone).is_err() {
                warn!("Audio thread is gone, dropping tone");
            }
        }
    }
}
