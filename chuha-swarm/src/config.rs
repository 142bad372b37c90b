//! Configuração do controlador de enxame
//!
//! Todas as opções reconhecidas ficam em [`SwarmConfig`]. A configuração pode
//! vir de TOML (campos ausentes assumem o default) e de variáveis de ambiente
//! (ver `chuha_core::config`).
//!
//! ```toml
//! timestep_ms = 32
//! max_velocity = 60.0
//!
//! [detection]
//! epsilon = 0.6
//!
//! [mission]
//! initial_mode = "formation"
//!
//! [mission.profiles.patrol]
//! separation = 3.5
//! ```

use crate::error::{SwarmError, SwarmResult};
use crate::mission::MissionConfig;
use crate::tuning::TuningConfig;
use chuha_core::scan::{Calibration, DEFAULT_BASELINE, DEFAULT_SECTORS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuração completa de um controlador
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Duração de um passo de controle (ms)
    pub timestep_ms: u32,
    /// Velocidade angular máxima das rodas (rad/s)
    pub max_velocity: f64,
    /// Fator α da suavização exponencial dos comandos
    pub smoothing: f64,
    pub detection: DetectionConfig,
    pub radii: BehaviorRadii,
    pub emergency: EmergencyConfig,
    pub mission: MissionConfig,
    pub tuning: TuningConfig,
    pub exploration: ExplorationConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            timestep_ms: 32,
            max_velocity: 60.0,
            smoothing: 0.7,
            detection: DetectionConfig::default(),
            radii: BehaviorRadii::default(),
            emergency: EmergencyConfig::default(),
            mission: MissionConfig::default(),
            tuning: TuningConfig::default(),
            exploration: ExplorationConfig::default(),
        }
    }
}

/// Parâmetros de percepção (vizinhos e obstáculos)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Alcance de referência por camada do LIDAR (m)
    pub baseline: Vec<f64>,
    /// Setores angulares por camada
    pub sectors: usize,
    /// Sensibilidade inicial: leitura < referência · epsilon é vizinho
    pub epsilon: f64,
    /// Salto angular máximo dentro de um mesmo vizinho (rad)
    pub delta_theta: f64,
    /// Salto radial máximo (dividido pelo alcance) dentro de um vizinho
    pub delta_r: f64,
    /// Leitura < referência · ratio é candidata a obstáculo
    pub obstacle_ratio: f64,
    /// Pontos a menos disso de um vizinho não são obstáculos (m)
    pub neighbor_exclusion_radius: f64,
    /// Raio de agrupamento de obstáculos (m)
    pub cluster_radius: f64,
    /// Capacidade do histórico de vizinhos
    pub history_capacity: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE.to_vec(),
            sectors: DEFAULT_SECTORS,
            epsilon: 0.6,
            delta_theta: 0.1,
            delta_r: 0.02,
            obstacle_ratio: 0.8,
            neighbor_exclusion_radius: 0.10,
            cluster_radius: 0.15,
            history_capacity: 10,
        }
    }
}

impl DetectionConfig {
    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.baseline.clone())
    }
}

/// Raios de atuação dos comportamentos (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorRadii {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
    pub obstacle: f64,
    /// Raio do círculo de formação
    pub formation: f64,
}

impl Default for BehaviorRadii {
    fn default() -> Self {
        Self {
            separation: 0.15,
            alignment: 0.3,
            cohesion: 0.5,
            obstacle: 0.2,
            formation: 0.3,
        }
    }
}

/// Override de emergência: repulsão somada por cima dos comportamentos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyConfig {
    pub neighbor_distance: f64,
    pub obstacle_distance: f64,
    pub neighbor_force: f64,
    pub obstacle_force: f64,
    /// Incremento do contador de colisões por vizinho em emergência
    pub collision_increment: f64,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            neighbor_distance: 0.08,
            obstacle_distance: 0.12,
            neighbor_force: 2.0,
            obstacle_force: 3.0,
            collision_increment: 0.1,
        }
    }
}

/// Passeio aleatório do comportamento de exploração
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    pub seed: u64,
    /// Magnitude da força de exploração antes do peso
    pub strength: f64,
    /// Variação máxima do ângulo de passeio por passo (rad)
    pub jitter: f64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_c0de,
            strength: 0.1,
            jitter: 0.3,
        }
    }
}

impl SwarmConfig {
    /// Lê de uma string TOML e valida
    pub fn from_toml_str(source: &str) -> SwarmResult<Self> {
        let config: SwarmConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Lê de um arquivo TOML e valida
    pub fn load(path: impl AsRef<Path>) -> SwarmResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> SwarmResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Aplica overrides de ambiente (`CHUHA_*`)
    pub fn with_env_overrides(mut self) -> Self {
        use chuha_core::config;
        if let Some(v) = *config::MAX_VELOCITY {
            self.max_velocity = v;
        }
        if let Some(v) = *config::TIMESTEP_MS {
            self.timestep_ms = v;
        }
        if let Some(v) = *config::EPSILON {
            self.detection.epsilon = v;
        }
        if let Some(v) = *config::EXPLORATION_SEED {
            self.exploration.seed = v;
        }
        self
    }

    /// Duração do passo em segundos
    pub fn timestep_secs(&self) -> f64 {
        self.timestep_ms as f64 / 1000.0
    }

    pub fn validate(&self) -> SwarmResult<()> {
        fn invalid(msg: String) -> SwarmResult<()> {
            Err(SwarmError::InvalidConfig(msg))
        }

        if self.timestep_ms == 0 {
            return invalid("timestep_ms must be positive".into());
        }
        if !(self.max_velocity > 0.0 && self.max_velocity.is_finite()) {
            return invalid(format!("max_velocity must be positive, got {}", self.max_velocity));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return invalid(format!("smoothing must be in (0, 1], got {}", self.smoothing));
        }

        let d = &self.detection;
        if d.baseline.is_empty() {
            return invalid("detection.baseline must list at least one layer".into());
        }
        if d.baseline.iter().any(|r| !(*r > 0.0)) {
            return invalid("detection.baseline ranges must be positive".into());
        }
        if d.sectors == 0 {
            return invalid("detection.sectors must be positive".into());
        }
        if d.history_capacity == 0 {
            return invalid("detection.history_capacity must be positive".into());
        }

        let t = &self.tuning;
        if !(t.min_epsilon <= t.max_epsilon) {
            return invalid(format!(
                "tuning bounds out of order: [{}, {}]",
                t.min_epsilon, t.max_epsilon
            ));
        }
        if !(t.min_epsilon <= d.epsilon && d.epsilon <= t.max_epsilon) {
            return invalid(format!(
                "detection.epsilon {} outside tuning bounds [{}, {}]",
                d.epsilon, t.min_epsilon, t.max_epsilon
            ));
        }
        if t.interval == 0 || t.window == 0 {
            return invalid("tuning.interval and tuning.window must be positive".into());
        }

        let m = &self.mission;
        if m.switch_interval == 0 || m.patrol_cycle == 0 || m.status_interval == 0 {
            return invalid(
                "mission.switch_interval, patrol_cycle and status_interval must be positive".into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionMode;

    #[test]
    fn test_defaults_are_valid() {
        let config = SwarmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detection.baseline.len(), 16);
        assert!((config.timestep_secs() - 0.032).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SwarmConfig::from_toml_str(
            r#"
            max_velocity = 30.0

            [mission]
            initial_mode = "patrol"

            [mission.profiles.patrol]
            separation = 3.5
            "#,
        )
        .unwrap();
        assert_eq!(config.max_velocity, 30.0);
        assert_eq!(config.smoothing, 0.7);
        assert_eq!(config.mission.initial_mode, MissionMode::Patrol);
        assert_eq!(config.mission.profiles.patrol.separation, 3.5);
        // Campos omitidos de um perfil presente assumem o default global
        assert_eq!(config.mission.profiles.patrol.obstacle_avoidance, 3.0);
        assert_eq!(config.mission.profiles.formation.formation, 2.5);
        assert_eq!(config.radii.separation, 0.15);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SwarmConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SwarmConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut c = SwarmConfig::default();
        c.smoothing = 1.5;
        assert!(c.validate().is_err());

        let mut c = SwarmConfig::default();
        c.tuning.min_epsilon = 0.95;
        assert!(c.validate().is_err());

        let mut c = SwarmConfig::default();
        c.detection.baseline.clear();
        assert!(c.validate().is_err());

        let mut c = SwarmConfig::default();
        c.detection.history_capacity = 0;
        assert!(matches!(c.validate(), Err(SwarmError::InvalidConfig(_))));
    }

    #[test]
    fn test_epsilon_must_start_within_tuning_bounds() {
        let mut c = SwarmConfig::default();
        c.detection.epsilon = 2.0;
        assert!(matches!(c.validate(), Err(SwarmError::InvalidConfig(_))));

        let mut c = SwarmConfig::default();
        c.detection.epsilon = 0.1;
        assert!(matches!(c.validate(), Err(SwarmError::InvalidConfig(_))));

        let mut c = SwarmConfig::default();
        c.detection.epsilon = 0.3;
        assert!(c.validate().is_ok());
        c.detection.epsilon = 0.9;
        assert!(c.validate().is_ok());

        let err = SwarmConfig::from_toml_str("[detection]\nepsilon = 2.0\n").unwrap_err();
        assert!(matches!(err, SwarmError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = SwarmConfig::from_toml_str("max_velocity = \"fast\"").unwrap_err();
        assert!(matches!(err, SwarmError::ConfigParse(_)));
    }
}
