//! Procedurally synthesized sound effects
//!
//! No sound assets ship with the game: each effect is rendered to an
//! in-memory 16-bit mono WAV at startup and handed to the audio backend.
//! Playback is fire-and-forget; the simulation never waits on it.

use anyhow::{Result, anyhow};
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Sample rate for synthesized effects
const SAMPLE_RATE: u32 = 44_100;

/// Length of the thrust hum one-shot, in seconds. The shell throttles
/// replay so a new hum starts only after the previous one has played out.
pub const THRUST_SECONDS: f64 = 0.2;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Fire,
    /// Asteroid or ship destroyed
    Explosion,
    /// Forward thrust hum
    Thrust,
}

/// Tone shapes available to the synthesizer
#[derive(Debug, Clone, Copy)]
enum Waveform {
    Square,
    Saw,
}

/// Audio manager for the game
pub struct AudioManager {
    fire: Sound,
    explosion: Sound,
    thrust: Sound,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Synthesize and register all effects. A buffer the backend cannot
    /// decode is a startup error.
    pub async fn new(master_volume: f32, sfx_volume: f32, muted: bool) -> Result<Self> {
        let fire = load(
            synth_tone(0.09, 920.0, 0.5, Waveform::Square, 0.02),
            "fire",
        )
        .await?;
        let explosion = load(synth_noise_burst(0.3, 0.6), "explosion").await?;
        let thrust = load(
            synth_tone(THRUST_SECONDS as f32, 160.0, 0.35, Waveform::Saw, 0.05),
            "thrust",
        )
        .await?;

        Ok(Self {
            fire,
            explosion,
            thrust,
            master_volume,
            sfx_volume,
            muted,
        })
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a one-shot effect; non-blocking, no completion to wait on
    pub fn play(&self, effect: SoundEffect) {
        let mut volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        // the hum sits under the other effects in the mix
        if effect == SoundEffect::Thrust {
            volume *= 0.4;
        }
        let sound = match effect {
            SoundEffect::Fire => &self.fire,
            SoundEffect::Explosion => &self.explosion,
            SoundEffect::Thrust => &self.thrust,
        };
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume,
            },
        );
    }
}

async fn load(bytes: Vec<u8>, what: &str) -> Result<Sound> {
    load_sound_from_bytes(&bytes)
        .await
        .map_err(|err| anyhow!("failed to load synthesized {what} effect: {err:?}"))
}

/// Render a tone with a short fade-out tail
fn synth_tone(seconds: f32, freq: f32, volume: f32, waveform: Waveform, fade_out: f32) -> Vec<u8> {
    let frames = (seconds * SAMPLE_RATE as f32) as usize;
    let fade_frames = (fade_out * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(frames);
    for i in 0..frames {
        let t = i as f32 / SAMPLE_RATE as f32;
        let phase = t * freq;
        let mut s = match waveform {
            Waveform::Square => {
                if (std::f32::consts::TAU * phase).sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase.fract() - 1.0,
        };
        if frames - i < fade_frames {
            s *= (frames - i) as f32 / fade_frames as f32;
        }
        samples.push(s * volume);
    }
    encode_wav(&samples)
}

/// Render a decaying noise burst for the explosion
fn synth_noise_burst(seconds: f32, volume: f32) -> Vec<u8> {
    let mut rng = Pcg32::seed_from_u64(7);
    let frames = (seconds * SAMPLE_RATE as f32) as usize;
    let mut samples = Vec::with_capacity(frames);
    for i in 0..frames {
        let envelope = 1.0 - i as f32 / frames as f32;
        // averaging three uniforms softens the noise
        let r = (rng.random::<f32>() + rng.random::<f32>() + rng.random::<f32>()) / 3.0;
        samples.push((r * 2.0 - 1.0) * envelope * volume);
    }
    encode_wav(&samples)
}

/// Encode mono f32 samples as a 16-bit PCM WAV byte buffer
fn encode_wav(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header_and_length() {
        let wav = encode_wav(&[0.0, 0.5, -0.5, 1.0]);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 4 * 2);
        // data chunk length field matches the payload
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 8);
    }

    #[test]
    fn test_tone_fades_to_silence() {
        let wav = synth_tone(0.05, 440.0, 0.5, Waveform::Square, 0.02);
        let last = i16::from_le_bytes(wav[wav.len() - 2..].try_into().unwrap());
        assert!(last.unsigned_abs() < 1000);
    }
}
