//! The firmware's single task.
//!
//! Each pass polls the touch pads on a fixed cadence, samples audio only when the
//! animator asks for it, renders one tick and uploads both LED drivers. The two
//! drivers and the touch sensor share one blocking I2C bus.
//!
//! See [`ControlLoop`] for usage.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio;
use embassy_rp::watchdog::Watchdog;
use embassy_time::Instant;
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;

use crate::animator::Animator;
use crate::audio::AudioFrame;
use crate::cap1206::{Cap1206, PAD_MASK, PRODUCT_ID};
use crate::channel_map::{DRIVER_COUNT, split_duties};
use crate::hardware::{Hardware, I2cBus};
use crate::is31fl3236::{ADDRESS_HIGH, ADDRESS_LOW, Is31fl3236};
use crate::pacing::{NEVER, later};
use crate::spectrum_analyzer::{self, SAMPLE_COUNT, SAMPLE_PERIOD};
use crate::{
    Error, HEARTBEAT_PERIOD, Result, TOUCH_POLL_PERIOD, TOUCH_RECALIBRATION_PERIOD,
    WATCHDOG_TIMEOUT,
};

type BusDevice = RefCellDevice<'static, I2cBus>;

// ADC reads folded into the animator's random seed.
const SEED_SAMPLES: usize = 32;

/// Static resources for the [`ControlLoop`].
pub struct ControlLoopStatic {
    bus: StaticCell<RefCell<I2cBus>>,
}

/// Everything the control task owns.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use embassy_executor::Spawner;
/// use logo_lights::Hardware;
/// use logo_lights::control_loop::{ControlLoop, ControlLoopStatic};
///
/// # async fn example(spawner: Spawner) -> logo_lights::Result<()> {
/// static CONTROL_LOOP_STATIC: ControlLoopStatic = ControlLoop::new_static();
/// ControlLoop::spawn(Hardware::default(), &CONTROL_LOOP_STATIC, spawner)?;
/// # Ok(())
/// # }
/// ```
pub struct ControlLoop {
    drivers: [Is31fl3236<BusDevice>; DRIVER_COUNT],
    touch: Cap1206<BusDevice>,
    adc: Adc<'static, adc::Blocking>,
    left_audio: adc::Channel<'static>,
    right_audio: adc::Channel<'static>,
    heartbeat: gpio::Output<'static>,
    // Held so the pins stay driven for the life of the task.
    _idle_leds: [gpio::Output<'static>; 2],
    _driver_enables: [gpio::Output<'static>; 2],
    watchdog: Watchdog,
    animator: Animator,
    wants_audio: bool,
    next_touch_poll: Instant,
    next_recalibration: Instant,
}

impl ControlLoop {
    /// Create static resources for the control loop.
    #[must_use]
    pub const fn new_static() -> ControlLoopStatic {
        ControlLoopStatic {
            bus: StaticCell::new(),
        }
    }

    /// Bring up both LED drivers and the touch sensor, start the watchdog and spawn
    /// the control task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if a chip does not answer its configuration, [`Error::Adc`]
    /// if seeding from the audio inputs fails, or [`Error::TaskSpawn`] if the task
    /// cannot be spawned.
    ///
    /// # Panics
    ///
    /// Panics if called twice with the same `resources`.
    pub fn spawn(
        hardware: Hardware,
        resources: &'static ControlLoopStatic,
        spawner: Spawner,
    ) -> Result<()> {
        let Hardware {
            i2c,
            driver_enables,
            status_leds: [mut heartbeat, mut green, mut red],
            mut adc,
            mut left_audio,
            right_audio,
            mut watchdog,
        } = hardware;

        let bus: &'static RefCell<I2cBus> = resources.bus.init(RefCell::new(i2c));
        let mut drivers = [
            Is31fl3236::new(RefCellDevice::new(bus), ADDRESS_LOW),
            Is31fl3236::new(RefCellDevice::new(bus), ADDRESS_HIGH),
        ];
        for driver in &mut drivers {
            driver.init()?;
            info!("LED driver {=u8:#x} configured", driver.address());
        }
        let mut touch = Cap1206::new(RefCellDevice::new(bus));
        let product_id = touch.product_id()?;
        if product_id != PRODUCT_ID {
            warn!("touch sensor reports product ID {=u8:#x}", product_id);
        }
        touch.init()?;
        info!("touch sensor configured");

        let seed = noise_seed(&mut adc, &mut left_audio)?;
        heartbeat.set_low();
        green.set_low();
        red.set_low();
        watchdog.start(WATCHDOG_TIMEOUT);

        let now = Instant::now();
        let control_loop = Self {
            drivers,
            touch,
            adc,
            left_audio,
            right_audio,
            heartbeat,
            _idle_leds: [green, red],
            _driver_enables: driver_enables,
            watchdog,
            animator: Animator::new(seed),
            wants_audio: false,
            next_touch_poll: NEVER,
            next_recalibration: later(now, TOUCH_RECALIBRATION_PERIOD),
        };
        let token = control_task(control_loop).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        info!("launching");
        Ok(())
    }

    /// One pass: touch, audio, render, upload, heartbeat.
    fn run_once(&mut self) -> Result<()> {
        let buttons = self.poll_touch(Instant::now())?;
        let audio = if self.wants_audio {
            Some(self.sample_audio()?)
        } else {
            None
        };

        let now = Instant::now();
        self.wants_audio = self.animator.render_tick(buttons, audio.as_ref(), now);
        for (driver, duties) in self
            .drivers
            .iter_mut()
            .zip(split_duties(self.animator.duty()).iter())
        {
            driver.update_duties(duties, false)?;
        }
        self.beat(now);
        Ok(())
    }

    fn poll_touch(&mut self, now: Instant) -> Result<u8> {
        if now <= self.next_touch_poll {
            return Ok(0);
        }
        self.next_touch_poll = later(now, TOUCH_POLL_PERIOD);

        let buttons = self.touch.read_buttons()?;
        if buttons != 0 {
            self.next_recalibration = later(now, TOUCH_RECALIBRATION_PERIOD);
        }
        if now > self.next_recalibration {
            self.touch.recalibrate(PAD_MASK)?;
            self.next_recalibration = later(now, TOUCH_RECALIBRATION_PERIOD);
            info!("touch pads recalibrated");
        }
        Ok(buttons)
    }

    /// Busy-wait through one analysis window of paired samples, then analyze it.
    fn sample_audio(&mut self) -> Result<AudioFrame> {
        let mut left = [0; SAMPLE_COUNT];
        let mut right = [0; SAMPLE_COUNT];
        let mut mark = Instant::now();
        for (left_sample, right_sample) in left.iter_mut().zip(right.iter_mut()) {
            *right_sample = self.adc.blocking_read(&mut self.right_audio)?;
            *left_sample = self.adc.blocking_read(&mut self.left_audio)?;
            mark = later(mark, SAMPLE_PERIOD);
            while Instant::now() < mark {
                core::hint::spin_loop();
            }
        }
        Ok(spectrum_analyzer::analyze(&left, &right))
    }

    fn beat(&mut self, now: Instant) {
        let periods = now.as_millis().checked_div(HEARTBEAT_PERIOD.as_millis()).unwrap_or(0);
        if periods & 1 == 1 {
            self.heartbeat.set_high();
        } else {
            self.heartbeat.set_low();
        }
    }
}

/// Fold the low bits of an idle audio input into a seed.
fn noise_seed(adc: &mut Adc<'static, adc::Blocking>, channel: &mut adc::Channel<'static>) -> Result<u64> {
    let mut seed = Instant::now().as_ticks();
    for _ in 0..SEED_SAMPLES {
        let sample = adc.blocking_read(channel)?;
        seed = seed.rotate_left(5) ^ u64::from(sample);
    }
    Ok(seed)
}

#[embassy_executor::task]
async fn control_task(mut control_loop: ControlLoop) -> ! {
    info!("control loop started");
    loop {
        if let Err(err) = control_loop.run_once() {
            warn!("control loop pass failed: {}", defmt::Display2Format(&err));
        }
        control_loop.watchdog.feed();
        embassy_futures::yield_now().await;
    }
}
