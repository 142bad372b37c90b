//! Modelo de agentes e obstáculos

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Papel de um agente no enxame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Leader,
    #[default]
    Follower,
    Scout,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Follower => "follower",
            Self::Scout => "scout",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot local de pose/velocidade de um robô em um passo de controle.
///
/// O robô dono do controlador está sempre na origem do próprio referencial;
/// vizinhos são observados a cada ciclo de detecção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Posição relativa (m)
    pub position: Vec2,
    /// Velocidade estimada (m/s)
    pub velocity: Vec2,
    /// Orientação (rad)
    pub heading: f64,
    /// Identificador
    pub id: String,
    pub role: Role,
}

impl Agent {
    /// Robô dono do referencial: origem, parado, heading 0
    pub fn at_origin(id: impl Into<String>) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            heading: 0.0,
            id: id.into(),
            role: Role::Follower,
        }
    }

    /// Vizinho observado nesta varredura; heading = bearing a partir do robô
    pub fn observed(id: impl Into<String>, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            heading: position.angle(),
            id: id.into(),
            role: Role::Follower,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn distance_to(&self, other: &Agent) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// Distância até a origem (o robô dono)
    pub fn range(&self) -> f64 {
        self.position.length()
    }

    pub fn is_leader(&self) -> bool {
        self.role == Role::Leader
    }
}

/// Obstáculo: centróide de um cluster de pontos que não pertencem a vizinhos.
/// Efêmero, recalculado a cada passo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
}

impl Obstacle {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { position: Vec2::new(x, y) }
    }

    pub fn range(&self) -> f64 {
        self.position.length()
    }
}

impl From<Vec2> for Obstacle {
    fn from(position: Vec2) -> Self {
        Self { position }
    }
}
