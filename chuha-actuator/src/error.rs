//! Erros da camada de atuador

use chuha_core::traits::ActuatorError as CoreActuatorError;
use thiserror::Error;

pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Erros de atuador
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// Comando falhou
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Atuador ocupado
    #[error("Actuator busy")]
    Busy,

    /// Falha no atuador
    #[error("Actuator fault: {0}")]
    Fault(String),

    /// Fora de alcance
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Configuração inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Atuador desligado (após emergency stop)
    #[error("Actuator is off")]
    Off,
}

impl From<ActuatorError> for CoreActuatorError {
    fn from(err: ActuatorError) -> Self {
        match err {
            ActuatorError::CommandFailed(msg) => CoreActuatorError::CommandFailed(msg),
            ActuatorError::Busy => CoreActuatorError::Busy,
            ActuatorError::Fault(msg) => CoreActuatorError::Fault(msg),
            ActuatorError::OutOfRange(msg) => CoreActuatorError::OutOfRange(msg),
            ActuatorError::InvalidConfig(msg) => {
                CoreActuatorError::CommandFailed(format!("Invalid config: {}", msg))
            }
            ActuatorError::Off => CoreActuatorError::Fault("Actuator is off".into()),
        }
    }
}

impl From<CoreActuatorError> for ActuatorError {
    fn from(err: CoreActuatorError) -> Self {
        match err {
            CoreActuatorError::CommandFailed(msg) => ActuatorError::CommandFailed(msg),
            CoreActuatorError::Busy => ActuatorError::Busy,
            CoreActuatorError::Fault(msg) => ActuatorError::Fault(msg),
            CoreActuatorError::OutOfRange(msg) => ActuatorError::OutOfRange(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ActuatorError::OutOfRange("61 rad/s".into());
        assert!(err.to_string().contains("Out of range"));
        assert_eq!(ActuatorError::Off.to_string(), "Actuator is off");
    }

    #[test]
    fn test_error_conversion_to_core() {
        let core_err: CoreActuatorError = ActuatorError::InvalidConfig("max".into()).into();
        assert!(core_err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_error_conversion_from_core() {
        let err: ActuatorError = CoreActuatorError::Busy.into();
        assert_eq!(err, ActuatorError::Busy);
    }
}
