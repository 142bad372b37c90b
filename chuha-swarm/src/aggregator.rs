//! Agregador ponderado
//!
//! ```text
//! comportamentos ──Σ w·f──► força ──+ emergência──► tração diferencial ──► suavização ──► (L, R)
//! ```
//!
//! A emergência soma repulsões fortes por cima da soma dos comportamentos
//! (não as substitui). O passo nunca falha: a saída é sempre um par finito.

use crate::behavior::BehaviorSet;
use crate::config::EmergencyConfig;
use chuha_actuator::{CommandSmoother, DifferentialDrive, WheelCommand};
use chuha_core::geometry::Vec2;
use chuha_core::{Agent, BehaviorWeights, Obstacle};

/// Resultado de um passo de agregação
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOutput {
    /// Soma ponderada dos comportamentos
    pub behavior_force: Vec2,
    /// Repulsão de emergência adicionada
    pub emergency_force: Vec2,
    /// Força líquida convertida em comando
    pub net_force: Vec2,
    /// Vizinhos dentro do raio de emergência
    pub close_neighbors: usize,
    /// Comando antes da suavização
    pub raw_command: WheelCommand,
    /// Comando suavizado enviado às rodas
    pub command: WheelCommand,
}

/// Repulsão de emergência e número de vizinhos em emergência.
///
/// A direção é `−û(alvo − self)`. Um alvo exatamente na posição do robô
/// tem ângulo `atan2(0, 0) = 0`, então a repulsão sai em −x: o resultado
/// continua finito e determinístico.
pub fn emergency_force(
    config: &EmergencyConfig,
    agent: &Agent,
    neighbors: &[Agent],
    obstacles: &[Obstacle],
) -> (Vec2, usize) {
    let mut force = Vec2::ZERO;
    let mut close = 0;

    for n in neighbors {
        let offset = n.position - agent.position;
        if offset.length() < config.neighbor_distance {
            force -= Vec2::unit(offset.angle()) * config.neighbor_force;
            close += 1;
        }
    }
    for o in obstacles {
        let offset = o.position - agent.position;
        if offset.length() < config.obstacle_distance {
            force -= Vec2::unit(offset.angle()) * config.obstacle_force;
        }
    }
    (force, close)
}

/// Combina os comportamentos em um comando de roda
#[derive(Debug)]
pub struct WeightedAggregator {
    behaviors: BehaviorSet,
    emergency: EmergencyConfig,
    drive: DifferentialDrive,
    smoother: CommandSmoother,
}

impl WeightedAggregator {
    pub fn new(behaviors: BehaviorSet, emergency: EmergencyConfig, max_velocity: f64, smoothing: f64) -> Self {
        Self {
            behaviors,
            emergency,
            drive: DifferentialDrive::new(max_velocity),
            smoother: CommandSmoother::new(smoothing),
        }
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorSet {
        &mut self.behaviors
    }

    pub fn drive(&self) -> &DifferentialDrive {
        &self.drive
    }

    pub fn emergency(&self) -> &EmergencyConfig {
        &self.emergency
    }

    /// Último comando suavizado
    pub fn last_command(&self) -> WheelCommand {
        self.smoother.last()
    }

    /// Zera o estado de suavização
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    /// Um passo completo: pesos, soma, emergência, tração e suavização
    pub fn step(
        &mut self,
        agent: &Agent,
        neighbors: &[Agent],
        obstacles: &[Obstacle],
        weights: &BehaviorWeights,
    ) -> AggregateOutput {
        self.behaviors.set_weights(weights);
        let mut behavior_force = self.behaviors.net_force(agent, neighbors, obstacles);
        if !behavior_force.is_finite() {
            behavior_force = Vec2::ZERO;
        }

        let (emergency_force, close_neighbors) =
            emergency_force(&self.emergency, agent, neighbors, obstacles);
        let net_force = behavior_force + emergency_force;

        let raw_command = self.drive.command(net_force);
        let command = self.smoother.apply(raw_command);

        AggregateOutput {
            behavior_force,
            emergency_force,
            net_force,
            close_neighbors,
            raw_command,
            command,
        }
    }
}
