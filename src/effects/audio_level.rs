use embassy_time::{Duration, Instant};

use crate::audio::AudioFrame;
use crate::frame::{Domain, Frame};
use crate::gamma::gamma_from_unit;
use crate::pacing::Pace;
use crate::ring_layout::COLUMN_COUNT;

const UNIFORM_GAIN: f32 = 7.0;
const BALANCE_GAIN: f32 = 7.0;

/// The whole ring follows overall loudness.
#[derive(Clone, Debug, Default)]
pub struct AudioUniform {
    pace: Pace,
}

impl AudioUniform {
    pub fn render(&mut self, frame: &mut Frame, now: Instant, step: Duration, audio: &AudioFrame) {
        if !self.pace.tick(step, now) {
            return;
        }
        let level = gamma_from_unit(UNIFORM_GAIN * audio.combined_rms());
        frame.set_uniform(level, Domain::Gamma);
    }
}

/// Left loudness on the left edge, right loudness on the right, blended between.
#[derive(Clone, Debug, Default)]
pub struct AudioBalance {
    pace: Pace,
}

impl AudioBalance {
    pub fn render(&mut self, frame: &mut Frame, now: Instant, step: Duration, audio: &AudioFrame) {
        if !self.pace.tick(step, now) {
            return;
        }
        let left = BALANCE_GAIN * audio.left_rms;
        let right = BALANCE_GAIN * audio.right_rms;
        #[expect(clippy::cast_precision_loss, reason = "small column counts")]
        let gradient = (right - left) / (COLUMN_COUNT - 1) as f32;

        let mut columns = [0; COLUMN_COUNT];
        for (column, level) in columns.iter_mut().enumerate() {
            #[expect(clippy::cast_precision_loss, reason = "small column counts")]
            let value = gradient * column as f32 + left;
            *level = gamma_from_unit(value);
        }
        frame.paint_columns(&columns, Domain::Gamma);
    }
}
