//! Mapeamento força → tração diferencial e suavização de comandos

use crate::types::WheelCommand;
use chuha_core::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Ganho linear aplicado à velocidade desejada
pub const LINEAR_GAIN: f64 = 0.8;

/// Ganho angular aplicado ao heading desejado
pub const ANGULAR_GAIN: f64 = 0.3;

/// Conversão de força de direção em velocidades de roda.
///
/// - heading = `atan2(fx, fy)` (frente = +y, positivo gira à direita)
/// - speed = `min(|f|, 1)`
/// - linear = speed · max · 0.8, angular = heading · max · 0.3
/// - L = linear + angular, R = linear − angular, saturados em `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialDrive {
    pub max_velocity: f64,
    pub linear_gain: f64,
    pub angular_gain: f64,
}

impl DifferentialDrive {
    pub fn new(max_velocity: f64) -> Self {
        Self {
            max_velocity,
            linear_gain: LINEAR_GAIN,
            angular_gain: ANGULAR_GAIN,
        }
    }

    /// Heading desejado para a força
    pub fn heading(force: Vec2) -> f64 {
        force.x.atan2(force.y)
    }

    /// Velocidade desejada, limitada a 1
    pub fn speed(force: Vec2) -> f64 {
        force.length().min(1.0)
    }

    /// Comando de roda para uma força líquida
    pub fn command(&self, force: Vec2) -> WheelCommand {
        if !force.is_finite() {
            return WheelCommand::STOP;
        }
        let linear = Self::speed(force) * self.max_velocity * self.linear_gain;
        let angular = Self::heading(force) * self.max_velocity * self.angular_gain;
        WheelCommand::new(linear + angular, linear - angular).saturate(self.max_velocity)
    }
}

impl Default for DifferentialDrive {
    fn default() -> Self {
        Self::new(60.0)
    }
}

/// Suavização exponencial: `smoothed = α·new + (1 − α)·previous`.
///
/// O estado persiste entre passos durante a vida do controlador.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSmoother {
    alpha: f64,
    last: WheelCommand,
}

impl CommandSmoother {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            last: WheelCommand::STOP,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Último comando emitido
    pub fn last(&self) -> WheelCommand {
        self.last
    }

    pub fn apply(&mut self, cmd: WheelCommand) -> WheelCommand {
        let a = self.alpha;
        let smoothed = WheelCommand::new(
            a * cmd.left + (1.0 - a) * self.last.left,
            a * cmd.right + (1.0 - a) * self.last.right,
        );
        self.last = smoothed;
        smoothed
    }

    pub fn reset(&mut self) {
        self.last = WheelCommand::STOP;
    }
}

impl Default for CommandSmoother {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_force_stops() {
        let drive = DifferentialDrive::new(60.0);
        assert_eq!(drive.command(Vec2::ZERO), WheelCommand::new(0.0, 0.0));
    }

    #[test]
    fn test_forward_force() {
        let drive = DifferentialDrive::new(60.0);
        let cmd = drive.command(Vec2::new(0.0, 0.5));
        assert!((cmd.left - 24.0).abs() < 1e-9);
        assert!((cmd.right - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_turn() {
        let drive = DifferentialDrive::new(60.0);
        // heading = π/2, angular = π/2 · 18
        let cmd = drive.command(Vec2::new(0.5, 0.0));
        let angular = PI / 2.0 * 18.0;
        assert!((cmd.left - (24.0 + angular)).abs() < 1e-9);
        assert!((cmd.right - (24.0 - angular)).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_sets_peak_to_max() {
        let drive = DifferentialDrive::new(60.0);
        // Força para trás: heading ≈ π → angular ≈ 56.5, linear 48
        let cmd = drive.command(Vec2::new(1e-6, -5.0));
        assert!((cmd.peak() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_never_exceeds_max() {
        let drive = DifferentialDrive::new(60.0);
        for i in 0..72 {
            let theta = i as f64 * PI / 36.0;
            for mag in [0.01, 0.5, 1.0, 10.0, 1e6] {
                let cmd = drive.command(Vec2::from_polar(mag, theta));
                assert!(cmd.peak() <= 60.0 + 1e-9, "peak {} at θ={}", cmd.peak(), theta);
            }
        }
    }

    #[test]
    fn test_non_finite_force_stops() {
        let drive = DifferentialDrive::new(60.0);
        assert_eq!(drive.command(Vec2::new(f64::NAN, 1.0)), WheelCommand::STOP);
    }

    #[test]
    fn test_smoothing_blend() {
        let mut s = CommandSmoother::new(0.7);
        let first = s.apply(WheelCommand::new(10.0, -10.0));
        assert!((first.left - 7.0).abs() < 1e-12);
        let second = s.apply(WheelCommand::new(10.0, -10.0));
        assert!((second.left - (7.0 + 0.3 * 7.0)).abs() < 1e-12);
        assert!((second.right + 9.1).abs() < 1e-12);
        s.reset();
        assert_eq!(s.last(), WheelCommand::STOP);
    }
}
