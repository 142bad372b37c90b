//! Motores de roda (mock) e trem de tração

use crate::error::{ActuatorError, ActuatorResult};
use crate::types::{WheelCommand, WheelSide};
use chuha_core::traits::{Actuator, ActuatorStatus, ChuhaComponent};
use serde::{Deserialize, Serialize};

/// Default status for serde
fn default_status() -> ActuatorStatus {
    ActuatorStatus::Ready
}

/// Estado interno do motor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorState {
    /// Velocidade angular atual (rad/s)
    pub velocity: f64,
    /// Status atual (não serializado)
    #[serde(skip, default = "default_status")]
    pub status: ActuatorStatus,
    /// Total de comandos executados
    pub commands: u64,
    /// Maior magnitude comandada desde o último reset
    pub peak_velocity: f64,
}

impl MotorState {
    pub fn new() -> Self {
        Self {
            velocity: 0.0,
            status: ActuatorStatus::Ready,
            commands: 0,
            peak_velocity: 0.0,
        }
    }

    /// Reseta o estado
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for MotorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuração do motor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Nome do dispositivo
    pub name: String,
    pub side: WheelSide,
    /// Limite de velocidade angular (rad/s)
    pub max_velocity: f64,
    /// Inverter direção?
    pub invert_direction: bool,
}

impl MotorConfig {
    pub fn for_side(side: WheelSide, max_velocity: f64) -> Self {
        Self {
            name: side.device_name().to_string(),
            side,
            max_velocity,
            invert_direction: false,
        }
    }
}

/// Motor de roda controlado por velocidade angular
#[derive(Debug, Clone)]
pub struct WheelMotor {
    state: MotorState,
    config: MotorConfig,
}

impl WheelMotor {
    pub fn with_config(config: MotorConfig) -> ActuatorResult<Self> {
        if !(config.max_velocity > 0.0) || !config.max_velocity.is_finite() {
            return Err(ActuatorError::InvalidConfig(format!(
                "max_velocity must be positive and finite, got {}",
                config.max_velocity
            )));
        }
        Ok(Self {
            state: MotorState::new(),
            config,
        })
    }

    pub fn for_side(side: WheelSide, max_velocity: f64) -> ActuatorResult<Self> {
        Self::with_config(MotorConfig::for_side(side, max_velocity))
    }

    /// Velocidade atual (rad/s)
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn state(&self) -> &MotorState {
        &self.state
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Número de comandos executados
    pub fn command_count(&self) -> u64 {
        self.state.commands
    }

    /// Define velocidade
    pub fn set_velocity(&mut self, velocity: f64) -> ActuatorResult<()> {
        match self.state.status {
            ActuatorStatus::Fault => {
                return Err(ActuatorError::Fault("Motor in fault state".into()));
            }
            ActuatorStatus::Off => return Err(ActuatorError::Off),
            ActuatorStatus::Busy => return Err(ActuatorError::Busy),
            ActuatorStatus::Ready => {}
        }

        if !velocity.is_finite() {
            self.state.status = ActuatorStatus::Fault;
            return Err(ActuatorError::Fault(format!("non-finite velocity {}", velocity)));
        }

        // Tolerância para o ponto flutuante da saturação
        let limit = self.config.max_velocity * (1.0 + 1e-9);
        if velocity.abs() > limit {
            return Err(ActuatorError::OutOfRange(format!(
                "{}: {:.3} rad/s outside ±{:.3}",
                self.config.name, velocity, self.config.max_velocity
            )));
        }

        let velocity = if self.config.invert_direction { -velocity } else { velocity };
        self.state.velocity = velocity;
        self.state.peak_velocity = self.state.peak_velocity.max(velocity.abs());
        self.state.commands += 1;
        Ok(())
    }

    /// Para o motor
    pub fn stop(&mut self) -> ActuatorResult<()> {
        self.set_velocity(0.0)
    }
}

/// Implementação do trait Actuator
impl Actuator for WheelMotor {
    type Command = f64;

    fn send(&mut self, cmd: Self::Command) -> Result<(), chuha_core::traits::ActuatorError> {
        self.set_velocity(cmd).map_err(|e| e.into())
    }

    fn status(&self) -> ActuatorStatus {
        self.state.status
    }

    fn emergency_stop(&mut self) -> Result<(), chuha_core::traits::ActuatorError> {
        self.state.velocity = 0.0;
        self.state.status = ActuatorStatus::Off;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), chuha_core::traits::ActuatorError> {
        self.state.reset();
        Ok(())
    }
}

impl ChuhaComponent for WheelMotor {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_ready(&self) -> bool {
        self.state.status == ActuatorStatus::Ready
    }
}

/// Par de motores esquerdo/direito
#[derive(Debug, Clone)]
pub struct DriveTrain {
    left: WheelMotor,
    right: WheelMotor,
}

impl DriveTrain {
    pub fn new(max_velocity: f64) -> ActuatorResult<Self> {
        Ok(Self {
            left: WheelMotor::for_side(WheelSide::Left, max_velocity)?,
            right: WheelMotor::for_side(WheelSide::Right, max_velocity)?,
        })
    }

    /// Aplica o comando às duas rodas
    pub fn apply(&mut self, cmd: WheelCommand) -> ActuatorResult<()> {
        self.left.set_velocity(cmd.left)?;
        self.right.set_velocity(cmd.right)
    }

    /// Velocidades atuais
    pub fn current(&self) -> WheelCommand {
        WheelCommand::new(self.left.velocity(), self.right.velocity())
    }

    pub fn motor(&self, side: WheelSide) -> &WheelMotor {
        match side {
            WheelSide::Left => &self.left,
            WheelSide::Right => &self.right,
        }
    }

    pub fn emergency_stop(&mut self) -> ActuatorResult<()> {
        self.left.emergency_stop()?;
        self.right.emergency_stop()?;
        Ok(())
    }

    pub fn reset(&mut self) -> ActuatorResult<()> {
        self.left.reset()?;
        self.right.reset()?;
        Ok(())
    }

    pub fn status(&self) -> ActuatorStatus {
        match (self.left.status(), self.right.status()) {
            (ActuatorStatus::Ready, ActuatorStatus::Ready) => ActuatorStatus::Ready,
            (ActuatorStatus::Fault, _) | (_, ActuatorStatus::Fault) => ActuatorStatus::Fault,
            (ActuatorStatus::Off, _) | (_, ActuatorStatus::Off) => ActuatorStatus::Off,
            _ => ActuatorStatus::Busy,
        }
    }
}
