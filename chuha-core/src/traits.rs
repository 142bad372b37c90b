//! # 🎯 Traits — Abstrações Fundamentais do ChuhaBot
//!
//! Os traits aqui são **abstrações puras**. As implementações concretas vivem
//! nos crates específicos (`chuha-swarm`, `chuha-actuator`, ...).
//!
//! | Fronteira | Trait |
//! |:----------|:------|
//! | Percepção | [`RangeSensor`] |
//! | Decisão | [`ForceBehavior`] |
//! | Atuação | [`Actuator`] |
//! | Visualização | [`VisualizationSink`] |

use crate::agent::{Agent, Obstacle};
use crate::behavior::BehaviorKind;
use crate::geometry::Vec2;
use crate::scan::RangeScan;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base para qualquer componente do ChuhaBot.
pub trait ChuhaComponent: Send + Sync + Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        "2026.1.16"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PERCEPÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de sensor
#[derive(Debug, Clone, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("Sensor unavailable: {0}")]
    Unavailable(String),
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
    #[error("Configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Sensor de alcance angular (LIDAR) que entrega uma [`RangeScan`] por passo.
///
/// # Exemplo
///
/// ```ignore
/// struct Webots { lidar: Lidar }
///
/// impl RangeSensor for Webots {
///     fn read(&mut self) -> Result<RangeScan, SensorError> {
///         RangeScan::from_rows(self.lidar.range_image())
///     }
/// }
/// ```
pub trait RangeSensor: ChuhaComponent {
    /// Lê a varredura deste passo
    fn read(&mut self) -> Result<RangeScan, SensorError>;

    /// Número de setores angulares por camada
    fn sectors(&self) -> usize {
        crate::scan::DEFAULT_SECTORS
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECISÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Capacidade comum dos comportamentos: produzir uma força 2D a partir do
/// estado local (agente, vizinhos, obstáculos).
///
/// Cada comportamento carrega seu próprio peso escalar; [`ForceBehavior::force`]
/// devolve a força já ponderada.
pub trait ForceBehavior: Send + Sync + Debug {
    /// Tipo do comportamento (chave no perfil de pesos)
    fn kind(&self) -> BehaviorKind;

    /// Peso atual
    fn weight(&self) -> f64;

    /// Substitui o peso
    fn set_weight(&mut self, weight: f64);

    /// Força sem ponderação
    fn raw_force(&mut self, agent: &Agent, neighbors: &[Agent], obstacles: &[Obstacle]) -> Vec2;

    /// Força ponderada pelo peso do comportamento
    fn force(&mut self, agent: &Agent, neighbors: &[Agent], obstacles: &[Obstacle]) -> Vec2 {
        let w = self.weight();
        self.raw_force(agent, neighbors, obstacles) * w
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATUAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de atuador
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActuatorError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Actuator busy")]
    Busy,
    #[error("Actuator fault: {0}")]
    Fault(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

/// Status de atuador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorStatus {
    /// Pronto para receber comandos
    Ready,
    /// Executando comando
    Busy,
    /// Em erro (precisa reset)
    Fault,
    /// Desligado
    Off,
}

/// Trait para atuadores que executam ações físicas.
pub trait Actuator: ChuhaComponent {
    /// Tipo de comando aceito
    type Command;

    /// Envia comando para o atuador
    fn send(&mut self, cmd: Self::Command) -> Result<(), ActuatorError>;

    /// Status atual do atuador
    fn status(&self) -> ActuatorStatus;

    /// Para movimento imediatamente (emergência)
    fn emergency_stop(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    /// Reseta atuador após falha
    fn reset(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VISUALIZAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Quadro entregue ao sink de visualização a cada passo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmFrame {
    pub step: u64,
    pub robot: String,
    pub mode: String,
    pub formation: String,
    pub neighbors: Vec<Vec2>,
    pub obstacles: Vec<Vec2>,
    pub force: Vec2,
    pub formation_quality: f64,
}

/// Consumidor opcional de quadros. O controlador funciona de forma idêntica
/// com ou sem um sink.
pub trait VisualizationSink: Send + Sync + Debug {
    fn render(&mut self, frame: &SwarmFrame);
}
