// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{thread, time::Duration};

use log::info;
use uptech::{
    Color, DisplayConfig, DisplaySession, MotionConfig, MotionSession, PinController,
    PinMode, Result,
};

const LOOP_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::init();

    let mut pins = PinController::native();
    pins.open()?.set_all_modes(PinMode::Input)?;

    let mut imu = MotionSession::native(MotionConfig::default());
    imu.open()?;

    let mut screen = DisplaySession::native();
    let config = DisplayConfig::default();
    screen.open_cleared(&config)?.set_led_color(0, Color::GREEN)?;
    info!("board ready");

    loop {
        let snapshot = imu.read_all()?;
        let levels = pins.read_levels_mask()?;
        let adc = pins.read_all_adc()?;

        let att = snapshot.attitude;
        let acc = snapshot.accel;
        screen
            .fill_screen(config.back_color)?
            .put_string(0, 0, &format!("att {:7.2} {:7.2} {:7.2}", att.x, att.y, att.z))?
            .put_string(0, 16, &format!("acc {:6.3} {:6.3} {:6.3}", acc.x, acc.y, acc.z))?
            .put_string(0, 32, &format!("io  {:08b}", levels))?
            .put_string(0, 48, &format!("adc {:?}", &adc[..4]))?
            .refresh()?;

        println!("Attitude: {} {} {}", att.x, att.y, att.z);
        println!("Accel: {} {} {}", acc.x, acc.y, acc.z);
        thread::sleep(LOOP_INTERVAL);
    }
}
