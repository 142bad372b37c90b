//! # 🦾 chuha-actuator — Tração Diferencial
//!
//! Converte a força de direção líquida do enxame em velocidades angulares
//! de roda e entrega esses comandos aos motores.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Actuator Layer                  │
//! │  ┌───────────────────┐  ┌─────────────────┐  │
//! │  │ DifferentialDrive │→ │ CommandSmoother │  │
//! │  │  força → (L, R)   │  │ 0.7·new+0.3·old │  │
//! │  └───────────────────┘  └─────────────────┘  │
//! │                  ↓ WheelCommand              │
//! │  ┌────────────────────────────────────────┐  │
//! │  │  DriveTrain (WheelMotor × 2)           │  │
//! │  │  send(), status(), emergency_stop()    │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//!                        ↓
//!               Hardware / simulador
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use chuha_actuator::{CommandSmoother, DifferentialDrive, DriveTrain};
//! use chuha_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let drive = DifferentialDrive::new(60.0);
//! let mut smoother = CommandSmoother::new(0.7);
//! let mut wheels = DriveTrain::new(60.0)?;
//!
//! // Força para frente e levemente à direita
//! let cmd = smoother.apply(drive.command(Vec2::new(0.2, 1.0)));
//! wheels.apply(cmd)?;
//! assert!(cmd.left > cmd.right);
//!
//! // Parada de emergência
//! wheels.emergency_stop()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Segurança
//!
//! - O mapeamento sempre satura em `max_velocity` preservando a razão L/R
//! - Motores rejeitam comandos acima do limite configurado
//! - Emergency stop sempre disponível

pub mod drive;
pub mod error;
pub mod motor;
pub mod types;

pub use drive::{CommandSmoother, DifferentialDrive};
pub use error::{ActuatorError, ActuatorResult};
pub use motor::{DriveTrain, MotorConfig, MotorState, WheelMotor};
pub use types::{WheelCommand, WheelSide};

#[cfg(test)]
mod tests;
