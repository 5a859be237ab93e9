//! The animation state machine: touch intents in, one rendered frame out per tick.
//!
//! See [`Animator`] for usage.

use embassy_time::Instant;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::audio::AudioFrame;
use crate::effects::{
    AudioBalance, AudioUniform, Breathing, Bumps, BumpsConfig, Cloud, Heading,
    HorizontalSpectrum, HorizontalSplitVolume, HorizontalVolume, HorizontalWave, Spinning,
    SplitSpectrum, SplitSpectrumSpin, Tracking, TrackingConfig, VerticalVolume, VerticalWave,
};
use crate::frame::{Domain, Frame, Rotation};
use crate::gamma::MAX_GAMMA;
use crate::ring_layout::{LED_COUNT, offset_index};
use crate::{
    AUDIO_BALANCE_STEP, AUDIO_SPECTRUM_STEP, AUDIO_SPLIT_SPIN_STEP, AUDIO_SPLIT_STEP,
    AUDIO_UNIFORM_STEP, AUDIO_VOLUME_STEP, BREATH_PERIOD, CLOUD_STEP, SPIN_PERIOD, WAVE_PERIOD,
};

/// Pad that flips the user preference (direction of travel for most effects).
pub const TOGGLE_USER_BUTTON: u8 = 0b0001;
/// Pad that moves to the next mode.
pub const ADVANCE_BUTTON: u8 = 0b0010;
/// Pad that moves to the previous mode.
pub const RETURN_BUTTON: u8 = 0b0100;
/// Pad that flips brightness inversion.
pub const TOGGLE_INVERT_BUTTON: u8 = 0b1000;

const SOLID_START_LEVEL: u8 = 32;

/// The sixteen modes, in the order the advance pad walks them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationMode {
    #[default]
    Solid,
    Breath,
    Spinning,
    WaveHorizontal,
    WaveVertical,
    Cloud,
    Tracking,
    Bumps,
    AudioUniform,
    AudioBalance,
    AudioHorizontalSpectrum,
    AudioSplit,
    AudioSplitSpin,
    AudioVerticalVolume,
    AudioHorizontalVolume,
    AudioHorizontalSplitVolume,
}

impl AnimationMode {
    pub const ALL: [Self; 16] = [
        Self::Solid,
        Self::Breath,
        Self::Spinning,
        Self::WaveHorizontal,
        Self::WaveVertical,
        Self::Cloud,
        Self::Tracking,
        Self::Bumps,
        Self::AudioUniform,
        Self::AudioBalance,
        Self::AudioHorizontalSpectrum,
        Self::AudioSplit,
        Self::AudioSplitSpin,
        Self::AudioVerticalVolume,
        Self::AudioHorizontalVolume,
        Self::AudioHorizontalSplitVolume,
    ];

    /// Mode after this one, wrapping to [`Self::Solid`].
    #[must_use]
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Mode before this one, wrapping to [`Self::AudioHorizontalSplitVolume`].
    #[must_use]
    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    fn offset(self, delta: i32) -> Self {
        let index = offset_index(self as usize, delta, Self::ALL.len());
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Whether the control loop must sample audio for this mode.
    #[must_use]
    pub const fn needs_audio(self) -> bool {
        matches!(
            self,
            Self::AudioUniform
                | Self::AudioBalance
                | Self::AudioHorizontalSpectrum
                | Self::AudioSplit
                | Self::AudioSplitSpin
                | Self::AudioVerticalVolume
                | Self::AudioHorizontalVolume
                | Self::AudioHorizontalSplitVolume
        )
    }

    /// `Solid` borrows the invert pad for brightness, so it is never inverted.
    #[must_use]
    pub const fn allows_inversion(self) -> bool {
        !matches!(self, Self::Solid)
    }
}

/// What one tick's pad mask asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intents {
    pub advance: bool,
    pub go_back: bool,
    pub toggle_invert: bool,
    pub toggle_user: bool,
}

impl Intents {
    #[must_use]
    pub const fn from_buttons(buttons: u8) -> Self {
        Self {
            advance: buttons & ADVANCE_BUTTON != 0,
            go_back: buttons & RETURN_BUTTON != 0,
            toggle_invert: buttons & TOGGLE_INVERT_BUTTON != 0,
            toggle_user: buttons & TOGGLE_USER_BUTTON != 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct EffectStates {
    breathing: Breathing,
    spinning: Spinning,
    horizontal_wave: HorizontalWave,
    vertical_wave: VerticalWave,
    cloud: Cloud,
    tracking: Tracking,
    bumps: Bumps,
    audio_uniform: AudioUniform,
    audio_balance: AudioBalance,
    horizontal_spectrum: HorizontalSpectrum,
    split_spectrum: SplitSpectrum,
    split_spectrum_spin: SplitSpectrumSpin,
    vertical_volume: VerticalVolume,
    horizontal_volume: HorizontalVolume,
    horizontal_split_volume: HorizontalSplitVolume,
}

/// Owns the current mode, every effect's state and the frame they paint.
///
/// Effects paint into a canvas that persists between ticks. Inversion is applied to
/// a copy, so an effect never reads back its own inverted output.
///
/// # Examples
/// ```
/// use embassy_time::Instant;
/// use logo_lights::animator::{ADVANCE_BUTTON, AnimationMode, Animator};
///
/// let mut animator = Animator::new(7);
/// let now = Instant::from_millis(1_000);
///
/// animator.render_tick(0, None, now);
/// assert_eq!(animator.mode(), AnimationMode::Solid);
/// assert!(animator.duty().iter().all(|&duty| duty == animator.duty()[0]));
///
/// animator.render_tick(ADVANCE_BUTTON, None, now);
/// assert_eq!(animator.mode(), AnimationMode::Breath);
/// ```
#[derive(Clone, Debug)]
pub struct Animator<R = SmallRng> {
    mode: AnimationMode,
    previous_mode: AnimationMode,
    override_mode: Option<AnimationMode>,
    inverted: bool,
    user_control: bool,
    solid_level: u8,
    canvas: Frame,
    output: Frame,
    audio: AudioFrame,
    effects: EffectStates,
    rng: R,
}

impl Animator<SmallRng> {
    /// An animator in `Solid` mode whose random effects are seeded from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Animator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            mode: AnimationMode::Solid,
            previous_mode: AnimationMode::Solid,
            override_mode: None,
            inverted: false,
            user_control: true,
            solid_level: SOLID_START_LEVEL,
            canvas: Frame::new(),
            output: Frame::new(),
            audio: AudioFrame::SILENT,
            effects: EffectStates::default(),
            rng,
        }
    }

    /// Run one tick of the state machine.
    ///
    /// `buttons` is the pad mask from the touch sensor and `audio` the frame sampled
    /// for this tick, if any. Audio modes reuse the last frame they were given.
    /// Returns whether the mode for the next tick needs audio.
    pub fn render_tick(&mut self, buttons: u8, audio: Option<&AudioFrame>, now: Instant) -> bool {
        let intents = Intents::from_buttons(buttons);
        if intents.toggle_user {
            self.user_control = !self.user_control;
        }
        if intents.toggle_invert {
            self.inverted = !self.inverted;
        }
        if let Some(audio) = audio {
            self.audio.clone_from(audio);
        }
        if let Some(mode) = self.override_mode {
            self.mode = mode;
        }

        let mode = self.mode;
        if mode == AnimationMode::Solid {
            self.adjust_solid_level(intents);
        }
        self.dispatch(mode, now);

        let next = if intents.advance {
            mode.next()
        } else if intents.go_back {
            mode.previous()
        } else {
            mode
        };
        #[cfg(feature = "defmt")]
        if next != mode {
            defmt::info!("animation mode {} -> {}", mode, next);
        }
        self.previous_mode = mode;
        self.mode = next;

        self.output.clone_from(&self.canvas);
        if self.inverted && mode.allows_inversion() {
            self.output.invert(Domain::Gamma);
        }

        self.mode().needs_audio()
    }

    fn adjust_solid_level(&mut self, intents: Intents) {
        if intents.toggle_user {
            self.solid_level = self.solid_level.saturating_add(1).min(MAX_GAMMA);
        }
        if intents.toggle_invert {
            self.solid_level = self.solid_level.saturating_sub(1);
        }
    }

    fn dispatch(&mut self, mode: AnimationMode, now: Instant) {
        let heading = Heading::from_user_control(self.user_control);
        let rotation = Rotation::from_clockwise(self.user_control);
        let frame = &mut self.canvas;
        let effects = &mut self.effects;
        let audio = &self.audio;
        let rng = &mut self.rng;

        match mode {
            AnimationMode::Solid => frame.set_uniform(self.solid_level, Domain::Gamma),
            AnimationMode::Breath => effects.breathing.render(frame, now, BREATH_PERIOD),
            AnimationMode::Spinning => {
                effects.spinning.render(frame, now, SPIN_PERIOD, rotation);
            }
            AnimationMode::WaveHorizontal => {
                effects.horizontal_wave.render(frame, now, WAVE_PERIOD, heading);
            }
            AnimationMode::WaveVertical => {
                effects.vertical_wave.render(frame, now, WAVE_PERIOD, heading);
            }
            AnimationMode::Cloud => effects.cloud.render(frame, now, CLOUD_STEP, rng),
            AnimationMode::Tracking => {
                effects.tracking.render(frame, now, &TrackingConfig::DEFAULT, rng);
            }
            AnimationMode::Bumps => effects.bumps.render(frame, now, &BumpsConfig::DEFAULT, rng),
            AnimationMode::AudioUniform => {
                effects.audio_uniform.render(frame, now, AUDIO_UNIFORM_STEP, audio);
            }
            AnimationMode::AudioBalance => {
                effects.audio_balance.render(frame, now, AUDIO_BALANCE_STEP, audio);
            }
            AnimationMode::AudioHorizontalSpectrum => {
                effects
                    .horizontal_spectrum
                    .render(frame, now, AUDIO_SPECTRUM_STEP, audio, heading);
            }
            AnimationMode::AudioSplit => {
                effects
                    .split_spectrum
                    .render(frame, now, AUDIO_SPLIT_STEP, audio, heading);
            }
            AnimationMode::AudioSplitSpin => {
                effects
                    .split_spectrum_spin
                    .render(frame, now, AUDIO_SPLIT_SPIN_STEP, audio, rotation);
            }
            AnimationMode::AudioVerticalVolume => {
                effects
                    .vertical_volume
                    .render(frame, now, AUDIO_VOLUME_STEP, audio, heading);
            }
            AnimationMode::AudioHorizontalVolume => {
                effects
                    .horizontal_volume
                    .render(frame, now, AUDIO_VOLUME_STEP, audio, heading);
            }
            AnimationMode::AudioHorizontalSplitVolume => {
                effects
                    .horizontal_split_volume
                    .render(frame, now, AUDIO_VOLUME_STEP, audio);
            }
        }
    }

    /// Duty cycles to upload, in ring order.
    #[must_use]
    pub const fn duty(&self) -> &[u8; LED_COUNT] {
        self.output.duty()
    }

    /// The frame as displayed, inversion included.
    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.output
    }

    /// The mode the next tick will render. An override wins over pad navigation.
    #[must_use]
    pub const fn mode(&self) -> AnimationMode {
        match self.override_mode {
            Some(mode) => mode,
            None => self.mode,
        }
    }

    /// The mode the last tick rendered.
    #[must_use]
    pub const fn previous_mode(&self) -> AnimationMode {
        self.previous_mode
    }

    /// Pin the state machine to one mode, or release it with `None`.
    pub fn set_override(&mut self, mode: Option<AnimationMode>) {
        self.override_mode = mode;
        if let Some(mode) = mode {
            self.mode = mode;
        }
    }

    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    #[must_use]
    pub const fn user_control(&self) -> bool {
        self.user_control
    }

    #[must_use]
    pub const fn solid_level(&self) -> u8 {
        self.solid_level
    }
}
