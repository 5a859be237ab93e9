//! Waves of brightness rolling across rows or columns.
//!
//! Each lane (a row or a column) climbs from `start` to `end` and decays back. The
//! leading lane always climbs; once it passes `propagate` the lead moves to the next
//! lane in the direction of travel, so a crest rolls across the logo and wraps.

use embassy_time::{Duration, Instant};

use super::Heading;
use crate::frame::{Domain, Frame};
use crate::pacing::{Pace, Pacing, split_period};
use crate::ring_layout::{COLUMN_COUNT, ROW_COUNT};

/// Brightness envelope of one lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveShape {
    pub start: u8,
    pub end: u8,
    /// Level at which the lead passes to the next lane.
    pub propagate: u8,
}

pub const VERTICAL_SHAPE: WaveShape = WaveShape {
    start: 10,
    end: 60,
    propagate: 30,
};

pub const HORIZONTAL_SHAPE: WaveShape = WaveShape {
    start: 10,
    end: 63,
    propagate: 32,
};

/// Lane state shared by both orientations.
#[derive(Clone, Debug)]
pub struct Wave<const LANES: usize> {
    pace: Pace,
    lead: usize,
    levels: [u8; LANES],
    growing: [bool; LANES],
    heading: Heading,
}

impl<const LANES: usize> Default for Wave<LANES> {
    fn default() -> Self {
        Self {
            pace: Pace::default(),
            lead: 0,
            levels: [0; LANES],
            growing: [false; LANES],
            heading: Heading::default(),
        }
    }
}

impl<const LANES: usize> Wave<LANES> {
    /// Returns the lane levels to paint, or `None` when nothing changed.
    fn tick(
        &mut self,
        frame: &mut Frame,
        now: Instant,
        period: Duration,
        heading: Heading,
        shape: WaveShape,
    ) -> Option<&[u8; LANES]> {
        let travel = u32::from(shape.end.saturating_sub(shape.start)).max(1);
        #[expect(clippy::cast_possible_truncation, reason = "at most 30 lanes")]
        let lanes = LANES as u32;
        let step = split_period(period, lanes.saturating_mul(2).saturating_mul(travel));
        match self.pace.check(step, now) {
            Pacing::NotDue => None,
            Pacing::Reset => {
                self.reset(heading, shape);
                frame.set_uniform(shape.start, Domain::Gamma);
                None
            }
            Pacing::Advance => {
                self.advance(heading, shape);
                Some(&self.levels)
            }
        }
    }

    fn reset(&mut self, heading: Heading, shape: WaveShape) {
        self.levels = [shape.start; LANES];
        self.growing = [false; LANES];
        self.lead = match heading {
            Heading::Ascending => LANES.saturating_sub(1),
            Heading::Descending => 0,
        };
        self.heading = heading;
    }

    fn advance(&mut self, heading: Heading, shape: WaveShape) {
        if heading != self.heading {
            self.reverse(heading, shape);
        }
        self.heading = heading;

        if let Some(growing) = self.growing.get_mut(self.lead) {
            *growing = true;
        }
        for (level, growing) in self.levels.iter_mut().zip(self.growing.iter_mut()) {
            if *growing {
                if *level >= shape.end {
                    *growing = false;
                } else {
                    *level = level.saturating_add(1);
                }
            } else if *level > shape.start {
                *level = level.saturating_sub(1);
            }
        }

        let lead_level = self.levels.get(self.lead).copied().unwrap_or(shape.start);
        if lead_level == shape.propagate || lead_level >= shape.end {
            self.lead = heading.next_lane(self.lead, LANES);
            if let Some(level) = self.levels.get_mut(self.lead) {
                *level = level.saturating_add(1).min(shape.end);
            }
        }
    }

    // Growing lanes start decaying and lit lanes start growing. The last lit lane
    // in the new direction of travel takes the lead.
    fn reverse(&mut self, heading: Heading, shape: WaveShape) {
        let mut visit = |lane: usize| {
            if let (Some(growing), Some(&level)) = (self.growing.get_mut(lane), self.levels.get(lane)) {
                if *growing {
                    *growing = false;
                } else if level != shape.start {
                    *growing = true;
                    self.lead = lane;
                }
            }
        };
        match heading {
            Heading::Ascending => (0..LANES).for_each(&mut visit),
            Heading::Descending => (0..LANES).rev().for_each(&mut visit),
        }
    }

    #[must_use]
    pub const fn levels(&self) -> &[u8; LANES] {
        &self.levels
    }

    #[must_use]
    pub const fn lead(&self) -> usize {
        self.lead
    }

    /// Which lanes are climbing. The rest decay toward `start`.
    #[must_use]
    pub const fn growing(&self) -> &[bool; LANES] {
        &self.growing
    }
}

/// A wave rolling up or down the rows.
#[derive(Clone, Debug, Default)]
pub struct VerticalWave(Wave<ROW_COUNT>);

impl VerticalWave {
    /// `period` covers one climb and decay of every row.
    pub fn render(&mut self, frame: &mut Frame, now: Instant, period: Duration, heading: Heading) {
        if let Some(rows) = self.0.tick(frame, now, period, heading, VERTICAL_SHAPE) {
            let rows = *rows;
            frame.paint_rows(&rows, Domain::Gamma);
        }
    }

    #[must_use]
    pub const fn lanes(&self) -> &Wave<ROW_COUNT> {
        &self.0
    }
}

/// A wave rolling left or right across the columns.
#[derive(Clone, Debug, Default)]
pub struct HorizontalWave(Wave<COLUMN_COUNT>);

impl HorizontalWave {
    pub fn render(&mut self, frame: &mut Frame, now: Instant, period: Duration, heading: Heading) {
        if let Some(columns) = self.0.tick(frame, now, period, heading, HORIZONTAL_SHAPE) {
            let columns = *columns;
            frame.paint_columns(&columns, Domain::Gamma);
        }
    }

    #[must_use]
    pub const fn lanes(&self) -> &Wave<COLUMN_COUNT> {
        &self.0
    }
}
