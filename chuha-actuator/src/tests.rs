//! Integration tests for chuha-actuator

use crate::*;
use chuha_core::prelude::*;

// ═══════════════════════════════════════════════════════════════════════════
// DRIVE PIPELINE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_drive_smoother_motors_pipeline() {
    let drive = DifferentialDrive::new(60.0);
    let mut smoother = CommandSmoother::new(0.7);
    let mut wheels = DriveTrain::new(60.0).unwrap();

    for i in 0..50 {
        let force = Vec2::from_polar(2.0, i as f64 * 0.4);
        let cmd = smoother.apply(drive.command(force));
        assert!(cmd.peak() <= 60.0 + 1e-9);
        wheels.apply(cmd).unwrap();
    }
    assert_eq!(wheels.motor(WheelSide::Left).command_count(), 50);
}

#[test]
fn test_smoothed_output_converges_to_constant_command() {
    let drive = DifferentialDrive::new(60.0);
    let mut smoother = CommandSmoother::new(0.7);
    let target = drive.command(Vec2::new(0.1, 0.4));

    let mut last = WheelCommand::STOP;
    for _ in 0..40 {
        last = smoother.apply(target);
    }
    assert!((last.left - target.left).abs() < 1e-9);
    assert!((last.right - target.right).abs() < 1e-9);
}

#[test]
fn test_drive_train_lifecycle() {
    let mut wheels = DriveTrain::new(60.0).unwrap();
    assert_eq!(wheels.status(), ActuatorStatus::Ready);

    wheels.apply(WheelCommand::new(20.0, 25.0)).unwrap();
    wheels.emergency_stop().unwrap();
    assert_eq!(wheels.status(), ActuatorStatus::Off);
    assert_eq!(wheels.current(), WheelCommand::STOP);
    assert!(wheels.apply(WheelCommand::new(1.0, 1.0)).is_err());

    wheels.reset().unwrap();
    assert_eq!(wheels.status(), ActuatorStatus::Ready);
    assert!(wheels.apply(WheelCommand::new(1.0, 1.0)).is_ok());
}

#[test]
fn test_motor_with_actuator_trait() {
    let mut motor = WheelMotor::for_side(WheelSide::Right, 10.0).unwrap();
    assert!(motor.send(9.5).is_ok());
    assert!(motor.send(10.5).is_err());
    assert!(motor.is_ready());
    assert_eq!(motor.version(), "2026.1.16");
}
