//! Tipos de comportamento e perfis de peso

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipos de comportamento que produzem força
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    /// Afastamento de vizinhos muito próximos
    Separation,
    /// Casamento de velocidade com vizinhos
    Alignment,
    /// Atração ao centro de massa local
    Cohesion,
    /// Campo potencial repulsivo de obstáculos
    ObstacleAvoidance,
    /// Seguir o líder designado
    LeaderFollowing,
    /// Manter formação (círculo, linha)
    Formation,
    /// Viés de passeio aleatório
    Exploration,
}

impl BehaviorKind {
    /// Todos os tipos, na ordem de composição
    pub const ALL: [BehaviorKind; 7] = [
        Self::Separation,
        Self::Alignment,
        Self::Cohesion,
        Self::ObstacleAvoidance,
        Self::LeaderFollowing,
        Self::Formation,
        Self::Exploration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Separation => "separation",
            Self::Alignment => "alignment",
            Self::Cohesion => "cohesion",
            Self::ObstacleAvoidance => "obstacle_avoidance",
            Self::LeaderFollowing => "leader_following",
            Self::Formation => "formation",
            Self::Exploration => "exploration",
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Um peso escalar por comportamento.
///
/// Sempre presente como perfil completo e substituído por inteiro
/// quando o modo de missão muda.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorWeights {
    pub separation: f64,
    pub alignment: f64,
    pub cohesion: f64,
    pub obstacle_avoidance: f64,
    pub leader_following: f64,
    pub formation: f64,
    pub exploration: f64,
}

impl Default for BehaviorWeights {
    fn default() -> Self {
        Self {
            separation: 2.0,
            alignment: 1.0,
            cohesion: 1.0,
            obstacle_avoidance: 3.0,
            leader_following: 1.5,
            formation: 1.0,
            exploration: 0.5,
        }
    }
}

impl BehaviorWeights {
    /// Peso associado a um tipo de comportamento
    pub fn get(&self, kind: BehaviorKind) -> f64 {
        match kind {
            BehaviorKind::Separation => self.separation,
            BehaviorKind::Alignment => self.alignment,
            BehaviorKind::Cohesion => self.cohesion,
            BehaviorKind::ObstacleAvoidance => self.obstacle_avoidance,
            BehaviorKind::LeaderFollowing => self.leader_following,
            BehaviorKind::Formation => self.formation,
            BehaviorKind::Exploration => self.exploration,
        }
    }

    /// Perfil com todos os pesos zerados
    pub fn zeroed() -> Self {
        Self {
            separation: 0.0,
            alignment: 0.0,
            cohesion: 0.0,
            obstacle_avoidance: 0.0,
            leader_following: 0.0,
            formation: 0.0,
            exploration: 0.0,
        }
    }

    /// Perfil com um único comportamento ativo (útil para isolar forças)
    pub fn only(kind: BehaviorKind, weight: f64) -> Self {
        let mut w = Self::zeroed();
        w.set(kind, weight);
        w
    }

    fn set(&mut self, kind: BehaviorKind, weight: f64) {
        match kind {
            BehaviorKind::Separation => self.separation = weight,
            BehaviorKind::Alignment => self.alignment = weight,
            BehaviorKind::Cohesion => self.cohesion = weight,
            BehaviorKind::ObstacleAvoidance => self.obstacle_avoidance = weight,
            BehaviorKind::LeaderFollowing => self.leader_following = weight,
            BehaviorKind::Formation => self.formation = weight,
            BehaviorKind::Exploration => self.exploration = weight,
        }
    }

    /// Itera (tipo, peso) na ordem de [`BehaviorKind::ALL`]
    pub fn iter(&self) -> impl Iterator<Item = (BehaviorKind, f64)> + '_ {
        BehaviorKind::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = BehaviorWeights::default();
        assert_eq!(w.get(BehaviorKind::Separation), 2.0);
        assert_eq!(w.get(BehaviorKind::ObstacleAvoidance), 3.0);
        assert_eq!(w.iter().count(), 7);
    }

    #[test]
    fn test_only() {
        let w = BehaviorWeights::only(BehaviorKind::Cohesion, 4.0);
        assert_eq!(w.cohesion, 4.0);
        assert_eq!(w.iter().filter(|(_, v)| *v != 0.0).count(), 1);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let w: BehaviorWeights = serde_json::from_str(r#"{"separation": 3.0}"#).unwrap();
        assert_eq!(w.separation, 3.0);
        assert_eq!(w.exploration, 0.5);
    }
}
