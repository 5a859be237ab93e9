//! Host-level tests for the individual effects.

use embassy_time::{Duration, Instant};
use logo_lights::effects::volume::{PeakHold, bar_levels};
use logo_lights::effects::{
    AudioBalance, AudioUniform, Breathing, Bumps, BumpsConfig, Cloud, Heading,
    HorizontalSpectrum, HorizontalSplitVolume, HorizontalWave, Spinning, SplitSpectrum,
    SplitSpectrumSpin, Tracking, TrackingConfig, VerticalVolume, VerticalWave,
};
use logo_lights::gamma::MAX_GAMMA;
use logo_lights::ring_layout::{COLUMN_COUNT, LED_COUNT};
use logo_lights::{AudioFrame, BREATH_PERIOD, CLOUD_STEP, Frame, Rotation, SPIN_PERIOD, WAVE_PERIOD};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const START: Instant = Instant::from_millis(1_000);
const AUDIO_STEP: Duration = Duration::from_millis(10);

fn ticks(step: Duration, count: u32) -> impl Iterator<Item = Instant> {
    (0..count).map(move |tick| START + step * tick)
}

fn loud_bass() -> AudioFrame {
    let mut audio = AudioFrame::SILENT;
    audio.left[0] = 1.0;
    audio.right[0] = 1.0;
    audio
}

#[test]
fn breathing_resets_dark_then_climbs_and_falls() {
    let mut frame = Frame::new();
    let mut breathing = Breathing::default();
    let step = BREATH_PERIOD / 126;

    breathing.render(&mut frame, START, BREATH_PERIOD);
    assert_eq!(breathing.level(), 0);
    assert!(frame.gamma().iter().all(|&level| level == 0));

    let mut peak = 0;
    for now in ticks(step, 200).skip(1) {
        breathing.render(&mut frame, now, BREATH_PERIOD);
        assert!(frame.gamma().iter().all(|&level| level == breathing.level()));
        peak = peak.max(breathing.level());
    }
    assert_eq!(peak, MAX_GAMMA);
    assert!(breathing.level() < MAX_GAMMA);
}

#[test]
fn breathing_holds_between_steps() {
    let mut frame = Frame::new();
    let mut breathing = Breathing::default();
    breathing.render(&mut frame, START, BREATH_PERIOD);
    breathing.render(&mut frame, START + Duration::from_millis(1), BREATH_PERIOD);
    assert_eq!(breathing.level(), 0);
}

#[test]
fn spinning_moves_the_crests_one_position_per_step() {
    let mut frame = Frame::new();
    let mut spinning = Spinning::default();
    let step = SPIN_PERIOD / 72;

    spinning.render(&mut frame, START, SPIN_PERIOD, Rotation::Clockwise);
    assert_eq!(frame.gamma_at(0), MAX_GAMMA);
    assert_eq!(frame.gamma_at(36), MAX_GAMMA);
    assert_eq!(frame.gamma_at(18), 10);

    spinning.render(&mut frame, START + step, SPIN_PERIOD, Rotation::Clockwise);
    assert_eq!(frame.gamma_at(1), MAX_GAMMA);
    assert_eq!(frame.gamma_at(37), MAX_GAMMA);
    assert_eq!(frame.gamma_at(0), 55);
}

#[test]
fn vertical_wave_keeps_every_row_in_its_envelope() {
    let mut frame = Frame::new();
    let mut wave = VerticalWave::default();
    let step = WAVE_PERIOD / (8 * 2 * 50);

    wave.render(&mut frame, START, WAVE_PERIOD, Heading::Ascending);
    assert!(frame.gamma().iter().all(|&level| level == 10));

    let mut leads = Vec::new();
    for now in ticks(step, 1_000).skip(1) {
        wave.render(&mut frame, now, WAVE_PERIOD, Heading::Ascending);
        assert!(wave.lanes().levels().iter().all(|&level| (10..=60).contains(&level)));
        leads.push(wave.lanes().lead());
    }
    leads.dedup();
    assert!(leads.len() > 8, "the lead should roll through every row");
}

fn growing_lanes(wave: &HorizontalWave) -> Vec<usize> {
    (0..COLUMN_COUNT).filter(|&lane| wave.lanes().growing()[lane]).collect()
}

#[test]
fn horizontal_wave_reversal_hands_the_lead_to_the_trailing_lane() {
    let mut frame = Frame::new();
    let mut wave = HorizontalWave::default();
    let step = WAVE_PERIOD / (30 * 2 * 53);
    let mut ticks = ticks(step, 62);

    // One reset, then sixty ascending steps: the crest has wrapped from the last
    // column onto columns 0 and 1, and column 29 is decaying behind it.
    for now in ticks.by_ref().take(61) {
        wave.render(&mut frame, now, WAVE_PERIOD, Heading::Ascending);
    }
    assert_eq!(wave.lanes().lead(), 1);
    assert_eq!(growing_lanes(&wave), [0, 1]);
    let levels = wave.lanes().levels();
    assert_eq!((levels[0], levels[1], levels[29]), (49, 28, 57));

    // Reversing stops the climbing columns and restarts the lit one they left behind.
    let now = ticks.next().unwrap();
    wave.render(&mut frame, now, WAVE_PERIOD, Heading::Descending);
    assert_eq!(wave.lanes().lead(), 29);
    assert_eq!(growing_lanes(&wave), [29]);
    let levels = wave.lanes().levels();
    assert_eq!((levels[0], levels[1], levels[29]), (48, 27, 58));
    assert!(levels.iter().enumerate().all(|(lane, &level)| [0, 1, 29].contains(&lane) || level == 10));
}

#[test]
fn horizontal_wave_survives_repeated_reversals() {
    let mut frame = Frame::new();
    let mut wave = HorizontalWave::default();
    let step = WAVE_PERIOD / (30 * 2 * 53);
    for (tick, now) in ticks(step, 600).enumerate() {
        let heading = if (tick / 150) % 2 == 0 { Heading::Ascending } else { Heading::Descending };
        wave.render(&mut frame, now, WAVE_PERIOD, heading);
        assert!(wave.lanes().levels().iter().all(|&level| (10..=63).contains(&level)));
        assert!(wave.lanes().lead() < COLUMN_COUNT);
    }
}

#[test]
fn cloud_stays_within_its_bounds() {
    let mut frame = Frame::new();
    let mut cloud = Cloud::default();
    let mut rng = SmallRng::seed_from_u64(3);

    cloud.render(&mut frame, START, CLOUD_STEP, &mut rng);
    assert!(frame.gamma().iter().all(|&level| level == 35));

    for now in ticks(CLOUD_STEP, 2_000).skip(1) {
        cloud.render(&mut frame, now, CLOUD_STEP, &mut rng);
        assert!(frame.gamma().iter().all(|&level| (10..=60).contains(&level)));
    }
    assert!(frame.gamma().iter().any(|&level| level != 35));
}

#[test]
fn tracking_stays_within_its_bounds_and_swaps() {
    let mut frame = Frame::new();
    let mut tracking = Tracking::default();
    let mut rng = SmallRng::seed_from_u64(11);
    let config = TrackingConfig {
        probability: 255,
        ..TrackingConfig::DEFAULT
    };

    let mut saw_swap = false;
    for now in ticks(config.step, 2_000) {
        tracking.render(&mut frame, now, &config, &mut rng);
        assert!(tracking.columns().iter().all(|&level| (10..=60).contains(&level)));
        assert!(frame.gamma().iter().all(|&level| (10..=60).contains(&level)));
        saw_swap |= tracking.active_swaps() > 0;
    }
    assert!(saw_swap);
}

#[test]
fn tracking_swaps_revert_after_their_duration_and_start_again() {
    let mut frame = Frame::new();
    let mut tracking = Tracking::default();
    let mut rng = SmallRng::seed_from_u64(17);
    let config = TrackingConfig {
        probability: 255,
        ..TrackingConfig::DEFAULT
    };

    let counts: Vec<usize> = ticks(config.step, 200)
        .map(|now| {
            tracking.render(&mut frame, now, &config, &mut rng);
            tracking.active_swaps()
        })
        .collect();

    let first_active = counts.iter().position(|&count| count > 0).expect("a swap starts");
    let first_revert = (1..counts.len())
        .find(|&tick| counts[tick] < counts[tick - 1])
        .expect("a swap reverts");
    let held = config.step * u32::try_from(first_revert - first_active).unwrap();
    assert!(held > config.swap_duration);
    assert!(counts[first_revert..].windows(2).any(|pair| pair[1] > pair[0]));
}

#[test]
fn bumps_rest_in_place_when_they_never_move() {
    let mut frame = Frame::new();
    let mut bumps = Bumps::default();
    let mut rng = SmallRng::seed_from_u64(5);
    let config = BumpsConfig {
        probability: 0,
        ..BumpsConfig::DEFAULT
    };

    for now in ticks(config.step, 50) {
        bumps.render(&mut frame, now, &config, &mut rng);
    }
    assert_eq!(bumps.locations(), [0, 36]);
    assert_eq!(frame.gamma_at(0), MAX_GAMMA);
    assert_eq!(frame.gamma_at(36), MAX_GAMMA);
    assert_eq!(frame.gamma_at(1), 55);
    assert_eq!(frame.gamma_at(71), 55);
    assert_eq!(frame.gamma_at(18), 10);
}

#[test]
fn bumps_wander_but_stay_on_the_ring() {
    let mut frame = Frame::new();
    let mut bumps = Bumps::default();
    let mut rng = SmallRng::seed_from_u64(9);
    let config = BumpsConfig {
        probability: 255,
        ..BumpsConfig::DEFAULT
    };

    for now in ticks(config.step, 1_000) {
        bumps.render(&mut frame, now, &config, &mut rng);
        for location in bumps.locations() {
            assert!(location < LED_COUNT);
            assert_eq!(frame.gamma_at(location), MAX_GAMMA);
        }
    }
    assert_ne!(bumps.locations(), [0, 36]);
}

#[test]
fn audio_uniform_follows_loudness() {
    let mut frame = Frame::new();
    let mut uniform = AudioUniform::default();
    let mut audio = AudioFrame::SILENT;
    audio.left_rms = 0.1;
    audio.right_rms = 0.1;
    uniform.render(&mut frame, START, AUDIO_STEP, &audio);
    assert!(frame.gamma().iter().all(|&level| level == 44));

    // Not due yet: the frame keeps its last paint.
    uniform.render(&mut frame, START + Duration::from_millis(1), AUDIO_STEP, &AudioFrame::SILENT);
    assert!(frame.gamma().iter().all(|&level| level == 44));
}

#[test]
fn audio_balance_blends_across_columns() {
    let mut frame = Frame::new();
    let mut balance = AudioBalance::default();
    let mut audio = AudioFrame::SILENT;
    audio.right_rms = 1.0;
    balance.render(&mut frame, START, AUDIO_STEP, &audio);
    // Column 0 on the left side, column 29 on the right.
    assert_eq!(frame.gamma_at(40), 0);
    assert_eq!(frame.gamma_at(3), MAX_GAMMA);
}

#[test]
fn horizontal_spectrum_follows_the_heading() {
    let mut frame = Frame::new();
    let mut spectrum = HorizontalSpectrum::default();
    spectrum.render(&mut frame, START, AUDIO_STEP, &loud_bass(), Heading::Ascending);
    assert_eq!(frame.gamma_at(40), MAX_GAMMA);
    assert_eq!(frame.gamma_at(3), 0);

    spectrum.render(&mut frame, START + AUDIO_STEP, AUDIO_STEP, &loud_bass(), Heading::Descending);
    assert_eq!(frame.gamma_at(40), 0);
    assert_eq!(frame.gamma_at(3), MAX_GAMMA);
}

#[test]
fn split_spectrum_starts_at_the_bottom_middle() {
    let mut frame = Frame::new();
    let mut split = SplitSpectrum::default();
    split.render(&mut frame, START, AUDIO_STEP, &loud_bass(), Heading::Ascending);
    assert_eq!(frame.gamma_at(23), MAX_GAMMA);
    assert_eq!(frame.gamma_at(24), MAX_GAMMA);
    assert_eq!(frame.gamma().iter().filter(|&&level| level == MAX_GAMMA).count(), 2);

    split.render(&mut frame, START + AUDIO_STEP, AUDIO_STEP, &loud_bass(), Heading::Descending);
    assert_eq!(frame.gamma_at(58), MAX_GAMMA);
    assert_eq!(frame.gamma_at(59), MAX_GAMMA);
}

#[test]
fn split_spectrum_spin_turns_each_step() {
    let mut frame = Frame::new();
    let mut spin = SplitSpectrumSpin::default();
    let step = Duration::from_millis(20);
    spin.render(&mut frame, START, step, &loud_bass(), Rotation::Clockwise);
    assert_eq!(frame.gamma_at(23), MAX_GAMMA);

    spin.render(&mut frame, START + step, step, &loud_bass(), Rotation::Clockwise);
    assert_eq!(frame.gamma_at(24), MAX_GAMMA);
    assert_eq!(frame.gamma_at(25), MAX_GAMMA);
    assert_eq!(frame.gamma_at(23), 0);
}

#[test]
fn bar_levels_fill_whole_and_partial_cells() {
    let (cells, full) = bar_levels::<8>(2.5);
    assert_eq!(full, 2);
    assert_eq!(cells, [63, 63, 36, 10, 10, 10, 10, 10]);

    let (cells, full) = bar_levels::<8>(100.0);
    assert_eq!(full, 8);
    assert!(cells.iter().all(|&cell| cell == 63));

    let (cells, full) = bar_levels::<8>(-1.0);
    assert_eq!(full, 0);
    assert!(cells.iter().all(|&cell| cell == 10));
}

#[test]
fn peak_hold_rises_with_the_bar_and_falls_on_its_timer() {
    let fall = Duration::from_millis(200);
    let mut peak = PeakHold::new(7);
    assert_eq!(peak.update(2, 8, fall, START), 6);
    assert_eq!(peak.update(7, 8, fall, START + Duration::from_millis(1)), 7);
    assert_eq!(peak.update(0, 8, fall, START + Duration::from_millis(100)), 7);
    assert_eq!(peak.update(0, 8, fall, START + Duration::from_millis(202)), 6);
    assert_eq!(peak.update(0, 8, fall, START + Duration::from_millis(300)), 6);
}

#[test]
fn vertical_volume_marks_its_falling_peak() {
    let mut frame = Frame::new();
    let mut volume = VerticalVolume::default();
    volume.render(&mut frame, START, AUDIO_STEP, &AudioFrame::SILENT, Heading::Ascending);
    assert_eq!(volume.peak().location(), 6);
    // Row 6 shows at ring position 1; row 0 along the bottom.
    assert_eq!(frame.gamma_at(1), MAX_GAMMA);
    assert_eq!(frame.gamma_at(20), 10);

    let mut loud = AudioFrame::SILENT;
    loud.left_rms = 1.0;
    loud.right_rms = 1.0;
    volume.render(&mut frame, START + AUDIO_STEP, AUDIO_STEP, &loud, Heading::Ascending);
    assert!(frame.gamma().iter().all(|&level| level == MAX_GAMMA));
}

#[test]
fn split_volume_grows_outward_from_the_centre() {
    let mut frame = Frame::new();
    let mut volume = HorizontalSplitVolume::default();
    volume.render(&mut frame, START, AUDIO_STEP, &AudioFrame::SILENT);
    assert_eq!(volume.peaks(), [13, 13]);
    // Column 1 starts the top row; column 28 ends it.
    assert_eq!(frame.gamma_at(44), MAX_GAMMA);
    assert_eq!(frame.gamma_at(71), MAX_GAMMA);
    assert_eq!(frame.gamma_at(58), 10);

    let mut left_only = AudioFrame::SILENT;
    left_only.left_rms = 1.0;
    volume.render(&mut frame, START + AUDIO_STEP, AUDIO_STEP, &left_only);
    // Column 0 is the left side, column 29 the right.
    assert_eq!(frame.gamma_at(40), MAX_GAMMA);
    assert_eq!(frame.gamma_at(3), 10);
}
