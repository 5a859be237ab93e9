//! Firmware for the RP2040 logo board: touch pads pick an animation for the 72-LED ring.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use defmt_rtt as _;
use embassy_executor::Spawner;
use logo_lights::control_loop::{ControlLoop, ControlLoopStatic};
use logo_lights::{Hardware, Never, Result};
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    static CONTROL_LOOP_STATIC: ControlLoopStatic = ControlLoop::new_static();

    let hardware = Hardware::default();
    ControlLoop::spawn(hardware, &CONTROL_LOOP_STATIC, spawner)?;

    // The control task does the work from here on.
    Ok(core::future::pending().await)
}
