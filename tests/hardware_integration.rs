// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hardware integration tests for the UpTech controller board
//!
//! These tests require the board and its native driver library and are
//! marked with #[ignore].
//! Run with: RUST_LOG=debug cargo test --features native -- --ignored --test-threads=1
//!
//! The native library keeps global peripheral state, so tests must not run
//! in parallel.

#![cfg(feature = "native")]

use std::{sync::Once, thread::sleep, time::Duration};

use uptech::{
    AccelRange, Color, DisplayConfig, DisplaySession, Font, GyroRange, MotionConfig,
    MotionSession, Palette, PinController, PinMode, ADC_CHANNEL_COUNT, IO_CHANNEL_COUNT,
};

static INIT: Once = Once::new();

/// Initialize logger for tests (only once)
fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

const SENSOR_WARMUP_MS: u64 = 500;
const SAMPLE_INTERVAL_MS: u64 = 20;
const SAMPLE_COUNT: usize = 10;

// =============================================================================
// Pin Controller Tests
// =============================================================================

#[test]
#[ignore]
fn test_pins_open_close() {
    init_logger();

    let mut pins = PinController::native();
    pins.open().expect("Failed to open ADC/IO");
    assert!(pins.is_open());
    pins.close().expect("Failed to close ADC/IO");
    pins.close().expect("Second close should be harmless");

    println!("✓ ADC/IO opened and closed");
}

#[test]
#[ignore]
fn test_read_io_levels() {
    init_logger();

    let mut pins = PinController::native();
    pins.open()
        .and_then(|p| p.set_all_modes(PinMode::Input))
        .expect("Failed to configure inputs");

    let levels = pins.read_all_channels().expect("Failed to read IO levels");
    assert_eq!(levels.len(), IO_CHANNEL_COUNT);
    assert!(levels.iter().all(|&l| l <= 1));

    println!("✓ IO levels: {:?}", levels);
}

#[test]
#[ignore]
fn test_read_adc() {
    init_logger();

    let mut pins = PinController::native();
    pins.open().expect("Failed to open ADC/IO");

    let samples = pins.read_all_adc().expect("Failed to read ADC");
    assert_eq!(samples.len(), ADC_CHANNEL_COUNT);

    println!("✓ ADC samples: {:?}", samples);
}

#[test]
#[ignore]
fn test_mode_readback() {
    init_logger();

    let mut pins = PinController::native();
    pins.open()
        .and_then(|p| p.set_all_modes(PinMode::Input))
        .and_then(|p| p.set_mode(0, PinMode::Output))
        .expect("Failed to set modes");

    let modes = pins.sync_modes().expect("Failed to read modes back");
    assert_eq!(modes[0], PinMode::Output);
    assert!(modes[1..].iter().all(|&m| m == PinMode::Input));

    pins.set_all_modes(PinMode::Input).expect("Failed to restore inputs");
    println!("✓ Mode readback matches");
}

// =============================================================================
// Motion Sensor Tests
// =============================================================================

#[test]
#[ignore]
fn test_motion_open() {
    init_logger();

    let mut imu = MotionSession::native(MotionConfig::default());
    imu.open().expect("Failed to initialize MPU");
    sleep(Duration::from_millis(SENSOR_WARMUP_MS));

    println!("✓ MPU initialized successfully");
}

#[test]
#[ignore]
fn test_accelerometer_at_rest() {
    init_logger();

    let config = MotionConfig::default().with_accel_range(AccelRange::G4);
    let mut imu = MotionSession::native(config);
    imu.open().expect("Failed to initialize MPU");
    sleep(Duration::from_millis(SENSOR_WARMUP_MS));

    // A board lying still reads about 1 g in total
    let accel = imu.read_accel().expect("Failed to read accelerometer");
    let magnitude = accel.magnitude();
    println!("Accel: {:?} |{:.3}| g", accel, magnitude);
    assert!(
        (0.8..1.2).contains(&magnitude),
        "Gravity magnitude out of range: {}",
        magnitude
    );

    println!("✓ Accelerometer reads gravity");
}

#[test]
#[ignore]
fn test_gyro_and_attitude_stream() {
    init_logger();

    let config = MotionConfig::default().with_gyro_range(GyroRange::Dps500);
    let mut imu = MotionSession::native(config);
    imu.open().expect("Failed to initialize MPU");
    sleep(Duration::from_millis(SENSOR_WARMUP_MS));

    for _ in 0..SAMPLE_COUNT {
        let snapshot = imu.read_all().expect("Failed to read motion snapshot");
        println!(
            "Attitude: {:?} Gyro: {:?}",
            snapshot.attitude.as_array(),
            snapshot.gyro.as_array()
        );
        assert!(snapshot.attitude.as_array().iter().all(|a| a.abs() <= 360.0));
        sleep(Duration::from_millis(SAMPLE_INTERVAL_MS));
    }

    println!("✓ Received {} motion snapshots", SAMPLE_COUNT);
}

// =============================================================================
// Display Tests
// =============================================================================

#[test]
#[ignore]
fn test_display_pipeline() {
    init_logger();

    let mut screen = DisplaySession::native();
    let config = DisplayConfig {
        font: Font::Font12x16,
        ..DisplayConfig::default()
    };
    screen
        .open_cleared(&config)
        .and_then(|s| s.put_string(0, 0, "uptech"))
        .and_then(|s| s.draw_frame(0, 20, 60, 50, Color::RED))
        .and_then(|s| s.fill_circle(90, 35, 12, Color::from(Palette::Blue)))
        .and_then(|s| s.refresh())
        .expect("Failed to draw");

    println!("✓ Display pipeline drawn");
}

#[test]
#[ignore]
fn test_display_directions() {
    init_logger();

    let mut screen = DisplaySession::native();
    for direction in [1, 2] {
        screen
            .open(direction)
            .and_then(|s| s.fill_screen(Color::GRAY))
            .and_then(|s| s.put_string(0, 0, &format!("dir {}", direction)))
            .and_then(|s| s.refresh())
            .expect("Failed to draw in direction");
        sleep(Duration::from_millis(SENSOR_WARMUP_MS));
    }
    screen.close().expect("Failed to close display");

    println!("✓ Both directions drawn");
}

#[test]
#[ignore]
fn test_leds() {
    init_logger();

    let mut screen = DisplaySession::native();
    screen.open_default().expect("Failed to open display");
    for color in [Color::RED, Color::GREEN, Color::BLUE, Color::BLACK] {
        screen
            .set_led_color(0, color)
            .and_then(|s| s.set_led_color(1, color))
            .expect("Failed to set LEDs");
        sleep(Duration::from_millis(SENSOR_WARMUP_MS / 2));
    }

    println!("✓ LEDs cycled");
}
