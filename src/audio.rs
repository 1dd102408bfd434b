//! Audio: procedural tones and sound effects
//!
//! Tones are described by `ToneSpec` and can be rendered to 16-bit PCM/WAV
//! natively. In the browser the same specs drive Web Audio oscillators, so no
//! sound files are needed.

/// Default sample rate for synthesized PCM
pub const SAMPLE_RATE: u32 = 44_100;

/// A plain sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub freq_hz: f32,
    pub duration_ms: u32,
    /// Peak amplitude (0.0 - 1.0)
    pub volume: f32,
}

/// Food eaten - short high beep
pub const EAT_TONE: ToneSpec = ToneSpec {
    freq_hz: 880.0,
    duration_ms: 120,
    volume: 0.5,
};

/// Run over - long low drone
pub const GAME_OVER_TONE: ToneSpec = ToneSpec {
    freq_hz: 150.0,
    duration_ms: 700,
    volume: 0.6,
};

/// Render a tone to signed 16-bit mono samples
pub fn synthesize(tone: &ToneSpec, sample_rate: u32) -> Vec<i16> {
    let n_samples = (sample_rate as u64 * tone.duration_ms as u64 / 1000) as usize;
    let amplitude = 32767.0 * tone.volume.clamp(0.0, 1.0);
    let step = std::f32::consts::TAU * tone.freq_hz / sample_rate as f32;
    (0..n_samples)
        .map(|i| (amplitude * (step * i as f32).sin()) as i16)
        .collect()
}

/// Wrap mono 16-bit samples in a RIFF/WAVE container
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;
    let block_align = CHANNELS * BITS / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_len = (samples.len() * block_align as usize) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Every fifth point
    LevelUp,
    /// Snake crashed
    GameOver,
    /// New best score
    HighScore,
    /// Menu cursor moved
    MenuMove,
    /// Menu entry confirmed
    MenuSelect,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Eat,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
        SoundEffect::MenuMove,
        SoundEffect::MenuSelect,
    ];

    /// Base tone for effects that are a single sine
    pub fn tone(&self) -> Option<ToneSpec> {
        match self {
            SoundEffect::Eat => Some(EAT_TONE),
            SoundEffect::GameOver => Some(GAME_OVER_TONE),
            SoundEffect::MenuMove => Some(ToneSpec {
                freq_hz: 440.0,
                duration_ms: 40,
                volume: 0.25,
            }),
            _ => None,
        }
    }

    /// Note sequence (freq, start offset in seconds) for jingles
    pub fn arpeggio(&self) -> &'static [(f32, f64)] {
        match self {
            SoundEffect::LevelUp => &[(400.0, 0.0), (500.0, 0.1), (600.0, 0.2), (800.0, 0.3)],
            SoundEffect::HighScore => &[
                (500.0, 0.0),
                (600.0, 0.08),
                (700.0, 0.16),
                (800.0, 0.24),
                (1000.0, 0.32),
            ],
            SoundEffect::MenuSelect => &[(600.0, 0.0), (900.0, 0.06)],
            _ => &[],
        }
    }

    /// File name used when exporting
    pub fn file_stem(&self) -> &'static str {
        match self {
            SoundEffect::Eat => "eat",
            SoundEffect::LevelUp => "levelup",
            SoundEffect::GameOver => "gameover",
            SoundEffect::HighScore => "highscore",
            SoundEffect::MenuMove => "menu_move",
            SoundEffect::MenuSelect => "menu_select",
        }
    }
}

/// Write a tone as a WAV file
#[cfg(not(target_arch = "wasm32"))]
pub fn write_wav(path: &std::path::Path, tone: &ToneSpec) -> std::io::Result<()> {
    let samples = synthesize(tone, SAMPLE_RATE);
    std::fs::write(path, encode_wav(&samples, SAMPLE_RATE))
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, ToneSpec};

    /// Audio manager for the game
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

        pub fn is_enabled(&self) -> bool {
            self.ctx.is_some()
        }

        /// Effective volume (0.0 - 1.0), already folded with mute
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::GameOver => {
                    if let Some(tone) = effect.tone() {
                        self.play_tone(ctx, &tone, vol);
                    }
                    self.play_descend(ctx, vol);
                }
                _ => {
                    if let Some(tone) = effect.tone() {
                        self.play_tone(ctx, &tone, vol);
                    }
                    self.play_arpeggio(ctx, effect.arpeggio(), vol);
                }
            }
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

        /// Flat sine held for the tone's duration with a short release
        fn play_tone(&self, ctx: &AudioContext, tone: &ToneSpec, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq_hz, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();
            let dur = tone.duration_ms as f64 / 1000.0;

            gain.gain().set_value_at_time(vol * tone.volume, t).ok();
            gain.gain()
                .set_value_at_time(vol * tone.volume, t + dur * 0.8)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + dur)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + dur).ok();
        }

        /// Rising note sequence
        fn play_arpeggio(&self, ctx: &AudioContext, notes: &[(f32, f64)], vol: f32) {
            for (freq, delay) in notes {
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }

        /// Sad descending tail under the game over drone
        fn play_descend(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}
