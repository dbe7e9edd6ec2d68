//! Sound cues
//!
//! The game only says *which* cue to play; a [`SoundPlayer`] decides how.
//! On the web, [`AudioManager`] synthesizes each cue with a single Web Audio
//! oscillator - no external files needed.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Run ended
    Death,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// Suggested beep for a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency (Hz)
    pub freq: f32,
    /// Sustain (seconds)
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain (0-1)
    pub gain: f32,
    /// Fade-out after the sustain (seconds)
    pub decay: f64,
}

impl Tone {
    /// Total time the oscillator must run
    pub fn length(&self) -> f64 {
        self.duration + self.decay + 0.02
    }

    /// When the envelope reaches silence (never sooner than 10ms)
    pub fn fade_end(&self) -> f64 {
        (self.duration + self.decay).max(0.01)
    }
}

impl SoundEffect {
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::Flap => Tone {
                freq: 720.0,
                duration: 0.05,
                waveform: Waveform::Sine,
                gain: 0.07,
                decay: 0.05,
            },
            SoundEffect::Score => Tone {
                freq: 1040.0,
                duration: 0.06,
                waveform: Waveform::Triangle,
                gain: 0.05,
                decay: 0.05,
            },
            SoundEffect::Death => Tone {
                freq: 220.0,
                duration: 0.12,
                waveform: Waveform::Sawtooth,
                gain: 0.07,
                decay: 0.15,
            },
        }
    }
}

/// Something that can play cues (fire and forget)
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundPlayer, Tone, Waveform};

    /// Web Audio backend
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
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
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Set SFX volume (0.0 - 1.0)
        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        fn effective_volume(&self) -> f32 {
            self.master_volume * self.sfx_volume
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Single beep: instant attack, exponential fade
        fn beep(&self, ctx: &AudioContext, tone: Tone, vol: f32) {
            let osc_type = match tone.waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(tone.gain * vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + tone.fade_end())
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.length()).ok();
        }
    }

    impl SoundPlayer for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.beep(ctx, effect.tone(), vol);
        }
    }
}
