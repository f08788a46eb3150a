//! Out-of-range arguments are rejected before the bus is touched

use lis3mdl::{AxisMode, DataRate, Error, FullScale, InterruptChannels, InvalidArgument,
              OperatingMode};

use crate::common::create_mock_driver;

#[test]
fn test_xy_mode_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    for raw in [4u8, 5, 0x80, 0xFF] {
        let result = driver.set_xy_mode(raw);
        assert!(matches!(result, Err(Error::InvalidArgument)),
                "raw XY mode {} should be rejected",
                raw);
    }
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_z_mode_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    assert!(matches!(driver.set_z_mode(4u8), Err(Error::InvalidArgument)));
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_full_scale_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    assert!(matches!(driver.set_full_scale(4u8), Err(Error::InvalidArgument)));
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_operating_mode_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    assert!(matches!(driver.set_operating_mode(7u8), Err(Error::InvalidArgument)));
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_odr_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    assert!(matches!(driver.set_odr(8u8), Err(Error::InvalidArgument)));
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_interrupt_channels_out_of_range() {
    let (mut driver, transport) = create_mock_driver();

    assert!(matches!(driver.set_interrupt_channels(0b1000u8),
                     Err(Error::InvalidArgument)));
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_negative_threshold_rejected() {
    let (mut driver, transport) = create_mock_driver();

    for value in [-1i16, -100, i16::MIN] {
        assert!(matches!(driver.set_interrupt_threshold(value),
                         Err(Error::InvalidArgument)));
    }
    assert_eq!(transport.bus_operation_count(), 0);
}

#[test]
fn test_all_in_range_raw_values_accepted() {
    let (mut driver, _transport) = create_mock_driver();

    for raw in 0..4u8 {
        driver.set_xy_mode(raw).unwrap();
        driver.set_z_mode(raw).unwrap();
        driver.set_full_scale(raw).unwrap();
        driver.set_operating_mode(raw).unwrap();
    }
    for raw in 0..8u8 {
        driver.set_odr(raw).unwrap();
        driver.set_interrupt_channels(raw).unwrap();
    }
}

#[test]
fn test_try_from_matches_typed_values() {
    assert_eq!(AxisMode::try_from(3), Ok(AxisMode::UltraHighPerformance));
    assert_eq!(DataRate::try_from(7), Ok(DataRate::_80_Hz));
    assert_eq!(FullScale::try_from(1), Ok(FullScale::_8_Ga));
    assert_eq!(OperatingMode::try_from(1), Ok(OperatingMode::Single));
    assert_eq!(InterruptChannels::try_from(0b110),
               Ok(InterruptChannels::X | InterruptChannels::Y));
    assert_eq!(AxisMode::try_from(4), Err(InvalidArgument));
}
