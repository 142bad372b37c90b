//! # 🐝 chuha-swarm — Núcleo de Decisão do Enxame
//!
//! Dado o que um robô percebe localmente (vizinhos e obstáculos), calcula a
//! cada passo a força de direção, o comando de rodas e o estado de missão.
//! Não há coordenação global: tudo acontece no referencial do próprio robô.
//!
//! ## Complexidade por passo
//!
//! - Rastreamento: O(camadas × setores) para filtrar a varredura
//! - Obstáculos: O(P²) no número de pontos candidatos (limitado pela
//!   resolução do sensor; dispensa índice espacial nessa escala)
//! - Comportamentos: O(N) por comportamento, N = vizinhos
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SwarmController                       │
//! │  ┌─────────────────┐    ┌──────────────────┐             │
//! │  │ NeighborTracker │    │ ObstacleDetector │             │
//! │  │ scan → [Agent]  │    │ scan → [Obstacle]│             │
//! │  └────────┬────────┘    └────────┬─────────┘             │
//! │           └──────────┬───────────┘                       │
//! │  ┌───────────────────▼──────────────────────────────┐    │
//! │  │ WeightedAggregator                               │    │
//! │  │ BehaviorSet → emergência → tração → suavização   │    │
//! │  └───────────────────┬──────────────────────────────┘    │
//! │  ┌───────────────────▼─────┐  ┌──────────────┐           │
//! │  │ MissionState (pesos,    │  │ TuningState  │           │
//! │  │ formação, transições)   │  │ (epsilon)    │           │
//! │  └─────────────────────────┘  └──────────────┘           │
//! └──────────────────────────────────────────────────────────┘
//!                          ↓ WheelCommand
//! ```
//!
//! ## Exemplo
//!
//! ```rust
//! use chuha_swarm::{SwarmConfig, SwarmController};
//! use chuha_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = SwarmController::new("chuha_1", SwarmConfig::default())?;
//!
//! let neighbor = Agent::observed("neighbor_0", Vec2::new(0.05, 0.0));
//! let report = controller.step_observed(vec![neighbor], vec![]);
//!
//! // Vizinho a 5 cm: separação e emergência empurram para −x
//! assert!(report.net_force.x < 0.0);
//! assert!(report.command.peak() <= 60.0);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod behavior;
pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod mission;
pub mod obstacle;
pub mod tracker;
pub mod tuning;

pub use aggregator::{AggregateOutput, WeightedAggregator};
pub use behavior::{
    Alignment, BehaviorSet, Cohesion, Exploration, Formation, LeaderFollowing, ObstacleAvoidance,
    Separation,
};
pub use config::{BehaviorRadii, DetectionConfig, EmergencyConfig, ExplorationConfig, SwarmConfig};
pub use controller::{StepReport, SwarmController};
pub use error::{SwarmError, SwarmResult};
pub use metrics::PerformanceMetrics;
pub use mission::{
    FormationType, MissionConfig, MissionMode, MissionProfiles, MissionSchedule, MissionState,
    ModeChange, formation_quality,
};
pub use obstacle::{ObstacleDetector, cluster_points};
pub use tracker::{NeighborHistory, NeighborTracker};
pub use tuning::{TuningConfig, TuningState};

#[cfg(test)]
mod tests;
