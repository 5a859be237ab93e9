use embassy_time::Duration;

// Idle effects: one full cycle per period.
pub const BREATH_PERIOD: Duration = Duration::from_millis(5000);
pub const SPIN_PERIOD: Duration = Duration::from_millis(5000);
pub const WAVE_PERIOD: Duration = Duration::from_millis(3000);

// Random effects: time between updates.
pub const CLOUD_STEP: Duration = Duration::from_millis(8);
pub const TRACKING_STEP: Duration = Duration::from_millis(8);
pub const TRACKING_SWAP_DURATION: Duration = Duration::from_millis(500);
pub const TRACKING_SWAP_WIDTH: i32 = 2;
pub const TRACKING_SWAP_PROBABILITY: u8 = 5;
pub const BUMPS_STEP: Duration = Duration::from_millis(10);
pub const BUMPS_MOVE_PROBABILITY: u8 = 5;

// Audio effects: time between redraws.
pub const AUDIO_UNIFORM_STEP: Duration = Duration::from_millis(10);
pub const AUDIO_BALANCE_STEP: Duration = Duration::from_millis(10);
pub const AUDIO_SPECTRUM_STEP: Duration = Duration::from_millis(10);
pub const AUDIO_SPLIT_STEP: Duration = Duration::from_millis(10);
pub const AUDIO_SPLIT_SPIN_STEP: Duration = Duration::from_millis(20);
pub const AUDIO_VOLUME_STEP: Duration = Duration::from_millis(20);

// Control loop cadence.
pub const TOUCH_POLL_PERIOD: Duration = Duration::from_millis(10);
pub const TOUCH_RECALIBRATION_PERIOD: Duration = Duration::from_secs(10);
pub const HEARTBEAT_PERIOD: Duration = Duration::from_millis(500);
pub const WATCHDOG_TIMEOUT: Duration = Duration::from_millis(100);
pub const I2C_FREQUENCY_HZ: u32 = 400_000;
