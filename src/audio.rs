//! Sound cues
//!
//! The simulation never waits on audio: cues are fire-and-forget and a
//! backend that cannot play simply stays quiet. On the web, tones are
//! synthesized with the Web Audio API, no external files needed.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Food eaten
    Eat,
    /// New level reached
    LevelUp,
    /// Snake crashed
    GameOver,
}

/// Sink for sound cues
pub trait AudioCue {
    /// Play a cue. Must not fail or block.
    fn play(&mut self, effect: SoundEffect);

    /// Apply volume settings (0.0 - 1.0 after master, sfx and mute)
    fn set_volume(&mut self, _volume: f32) {}
}

/// Backend that plays nothing (native builds, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {:?}", effect);
    }
}

/// One oscillator note of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub freq: f32,
    pub wave: Wave,
    /// Offset from the cue start (seconds)
    pub delay: f64,
    /// Seconds until the gain envelope decays
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

const fn tone(freq: f32, wave: Wave, delay: f64, duration: f64, gain: f32) -> Tone {
    Tone {
        freq,
        wave,
        delay,
        duration,
        gain,
    }
}

// Rising square arpeggio
const START_TONES: &[Tone] = &[
    tone(400.0, Wave::Square, 0.0, 0.1, 0.1),
    tone(600.0, Wave::Square, 0.1, 0.1, 0.1),
    tone(800.0, Wave::Square, 0.2, 0.2, 0.1),
];

// Quick two-note chirp
const EAT_TONES: &[Tone] = &[
    tone(600.0, Wave::Sine, 0.0, 0.1, 0.1),
    tone(800.0, Wave::Sine, 0.05, 0.1, 0.1),
];

// Major arpeggio, C5 E5 G5 C6
const LEVEL_UP_TONES: &[Tone] = &[
    tone(523.25, Wave::Triangle, 0.0, 0.12, 0.15),
    tone(659.25, Wave::Triangle, 0.08, 0.12, 0.15),
    tone(783.99, Wave::Triangle, 0.16, 0.12, 0.15),
    tone(1046.5, Wave::Triangle, 0.24, 0.3, 0.15),
];

// Falling sawtooth
const GAME_OVER_TONES: &[Tone] = &[
    tone(200.0, Wave::Sawtooth, 0.0, 0.5, 0.2),
    tone(150.0, Wave::Sawtooth, 0.2, 0.5, 0.2),
    tone(100.0, Wave::Sawtooth, 0.4, 0.8, 0.2),
];

impl SoundEffect {
    /// Notes making up this cue
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Start => START_TONES,
            SoundEffect::Eat => EAT_TONES,
            SoundEffect::LevelUp => LEVEL_UP_TONES,
            SoundEffect::GameOver => GAME_OVER_TONES,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, SoundEffect, Tone, Wave};

    /// Web Audio tone synthesizer
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
            let osc_type = match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;

            gain.gain().set_value_at_time(tone.gain * vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + tone.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }

    impl AudioCue for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                Self::play_tone(ctx, tone, self.volume);
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }
}
