//! Tipos de erro para chuha-swarm
//!
//! O passo de controle nunca falha: ausência de sensor, geometria
//! degenerada e ajustes fora de faixa são recuperados localmente. Os erros
//! abaixo surgem apenas ao carregar ou validar configuração.

use thiserror::Error;

/// Resultado customizado para operações de swarm
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Erros que podem ocorrer em operações de swarm
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwarmError::InvalidConfig("smoothing".into());
        assert_eq!(err.to_string(), "Invalid configuration: smoothing");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse: Result<toml::Value, _> = toml::from_str("= nope");
        let err: SwarmError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }
}
