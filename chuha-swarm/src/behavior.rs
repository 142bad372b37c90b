//! Comportamentos de enxame
//!
//! Cada comportamento implementa [`ForceBehavior`]: produz uma força 2D a
//! partir do agente, dos vizinhos e dos obstáculos, escalada pelo seu peso.
//!
//! | Comportamento | Lei |
//! |:--------------|:----|
//! | Separation | `Σ û(self − n) · (r_s − d)/(d² + ε)` para `0 < d < r_s` |
//! | Alignment | `média(v_n) − v_self` para `d < r_a` |
//! | Cohesion | `média(p_n) − p_self` para `d < r_c` |
//! | ObstacleAvoidance | `Σ û(self − o) · 2(r_o − d)/(d² + ε)` para `0 < d < r_o` |
//! | Formation | círculo, linha ou V (sem geometria) |
//! | LeaderFollowing | `p_líder − p_self` |
//! | Exploration | passeio aleatório de magnitude fixa |

use crate::config::{BehaviorRadii, ExplorationConfig};
use crate::mission::FormationType;
use chuha_core::geometry::Vec2;
use chuha_core::traits::ForceBehavior;
use chuha_core::{Agent, BehaviorKind, BehaviorWeights, Obstacle, Role};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Termo que evita divisão por zero nas leis de repulsão
pub const REPULSION_EPSILON: f64 = 0.001;

macro_rules! weighted {
    ($ty:ty, $kind:expr) => {
        impl $ty {
            /// Substitui o peso inicial
            pub fn with_weight(mut self, weight: f64) -> Self {
                self.weight = weight;
                self
            }
        }

        impl ForceBehavior for $ty {
            fn kind(&self) -> BehaviorKind {
                $kind
            }

            fn weight(&self) -> f64 {
                self.weight
            }

            fn set_weight(&mut self, weight: f64) {
                self.weight = weight;
            }

            fn raw_force(&mut self, agent: &Agent, neighbors: &[Agent], obstacles: &[Obstacle]) -> Vec2 {
                self.compute(agent, neighbors, obstacles)
            }
        }
    };
}

fn repulsion(from: Vec2, to: Vec2, radius: f64) -> Vec2 {
    let offset = to - from;
    let d = offset.length();
    if d > 0.0 && d < radius {
        offset / d * ((radius - d) / (d * d + REPULSION_EPSILON))
    } else {
        Vec2::ZERO
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEPARAÇÃO / ALINHAMENTO / COESÃO
// ═══════════════════════════════════════════════════════════════════════════

/// Repulsão de vizinhos muito próximos
#[derive(Debug, Clone)]
pub struct Separation {
    pub radius: f64,
    weight: f64,
}

impl Separation {
    pub fn new(radius: f64) -> Self {
        Self { radius, weight: 2.0 }
    }

    fn compute(&self, agent: &Agent, neighbors: &[Agent], _: &[Obstacle]) -> Vec2 {
        neighbors.iter().fold(Vec2::ZERO, |acc, n| {
            acc + repulsion(n.position, agent.position, self.radius)
        })
    }
}

weighted!(Separation, BehaviorKind::Separation);

/// Ajuste de velocidade à média dos vizinhos
#[derive(Debug, Clone)]
pub struct Alignment {
    pub radius: f64,
    weight: f64,
}

impl Alignment {
    pub fn new(radius: f64) -> Self {
        Self { radius, weight: 1.0 }
    }

    fn compute(&self, agent: &Agent, neighbors: &[Agent], _: &[Obstacle]) -> Vec2 {
        let in_range = neighbors
            .iter()
            .filter(|n| agent.distance_to(n) < self.radius)
            .map(|n| &n.velocity);
        match Vec2::mean(in_range) {
            Some(mean) => mean - agent.velocity,
            None => Vec2::ZERO,
        }
    }
}

weighted!(Alignment, BehaviorKind::Alignment);

/// Atração ao centro dos vizinhos
#[derive(Debug, Clone)]
pub struct Cohesion {
    pub radius: f64,
    weight: f64,
}

impl Cohesion {
    pub fn new(radius: f64) -> Self {
        Self { radius, weight: 1.0 }
    }

    fn compute(&self, agent: &Agent, neighbors: &[Agent], _: &[Obstacle]) -> Vec2 {
        let in_range = neighbors
            .iter()
            .filter(|n| agent.distance_to(n) < self.radius)
            .map(|n| &n.position);
        match Vec2::mean(in_range) {
            Some(center) => center - agent.position,
            None => Vec2::ZERO,
        }
    }
}

weighted!(Cohesion, BehaviorKind::Cohesion);

// ═══════════════════════════════════════════════════════════════════════════
// OBSTÁCULOS / FORMAÇÃO / LÍDER / EXPLORAÇÃO
// ═══════════════════════════════════════════════════════════════════════════

/// Campo potencial repulsivo em torno de obstáculos
#[derive(Debug, Clone)]
pub struct ObstacleAvoidance {
    pub radius: f64,
    weight: f64,
}

impl ObstacleAvoidance {
    pub fn new(radius: f64) -> Self {
        Self { radius, weight: 3.0 }
    }

    fn compute(&self, agent: &Agent, _: &[Agent], obstacles: &[Obstacle]) -> Vec2 {
        obstacles.iter().fold(Vec2::ZERO, |acc, o| {
            acc + repulsion(o.position, agent.position, self.radius) * 2.0
        })
    }
}

weighted!(ObstacleAvoidance, BehaviorKind::ObstacleAvoidance);

/// Manutenção de formação
#[derive(Debug, Clone)]
pub struct Formation {
    pub shape: FormationType,
    /// Raio do círculo (m)
    pub radius: f64,
    weight: f64,
}

impl Formation {
    pub fn new(shape: FormationType, radius: f64) -> Self {
        Self {
            shape,
            radius,
            weight: 1.0,
        }
    }

    fn compute(&self, agent: &Agent, neighbors: &[Agent], _: &[Obstacle]) -> Vec2 {
        let Some(center) = Vec2::mean(neighbors.iter().map(|n| &n.position)) else {
            return Vec2::ZERO;
        };
        match self.shape {
            FormationType::Circle => {
                let bearing = (agent.position - center).angle();
                let desired = center + Vec2::from_polar(self.radius, bearing);
                desired - agent.position
            }
            // Só o eixo transversal: alinha y com a média dos vizinhos
            FormationType::Line => Vec2::new(0.0, center.y - agent.position.y),
            FormationType::VShape => Vec2::ZERO,
        }
    }
}

weighted!(Formation, BehaviorKind::Formation);

/// Atração ao vizinho designado líder
#[derive(Debug, Clone)]
pub struct LeaderFollowing {
    weight: f64,
}

impl LeaderFollowing {
    pub fn new() -> Self {
        Self { weight: 1.5 }
    }

    fn compute(&self, agent: &Agent, neighbors: &[Agent], _: &[Obstacle]) -> Vec2 {
        if agent.is_leader() {
            return Vec2::ZERO;
        }
        neighbors
            .iter()
            .find(|n| n.role == Role::Leader)
            .map(|leader| leader.position - agent.position)
            .unwrap_or(Vec2::ZERO)
    }
}

impl Default for LeaderFollowing {
    fn default() -> Self {
        Self::new()
    }
}

weighted!(LeaderFollowing, BehaviorKind::LeaderFollowing);

/// Passeio aleatório: o ângulo de deriva varia até `jitter` por passo
#[derive(Debug, Clone)]
pub struct Exploration {
    pub strength: f64,
    pub jitter: f64,
    wander: f64,
    rng: StdRng,
    weight: f64,
}

impl Exploration {
    pub fn new(config: &ExplorationConfig) -> Self {
        Self {
            strength: config.strength,
            jitter: config.jitter.abs(),
            wander: std::f64::consts::FRAC_PI_2,
            rng: StdRng::seed_from_u64(config.seed),
            weight: 0.5,
        }
    }

    /// Ângulo de deriva corrente
    pub fn wander(&self) -> f64 {
        self.wander
    }

    fn compute(&mut self, _: &Agent, _: &[Agent], _: &[Obstacle]) -> Vec2 {
        if self.jitter > 0.0 {
            self.wander += self.rng.gen_range(-self.jitter..=self.jitter);
        }
        Vec2::from_polar(self.strength, self.wander)
    }
}

weighted!(Exploration, BehaviorKind::Exploration);

// ═══════════════════════════════════════════════════════════════════════════
// CONJUNTO
// ═══════════════════════════════════════════════════════════════════════════

/// Conjunto de comportamentos ativos, no máximo um por tipo
#[derive(Debug, Default)]
pub struct BehaviorSet {
    behaviors: Vec<Box<dyn ForceBehavior>>,
    formation_radius: f64,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Os sete comportamentos com pesos default
    pub fn standard(radii: &BehaviorRadii, shape: FormationType, exploration: &ExplorationConfig) -> Self {
        let mut set = Self {
            behaviors: Vec::with_capacity(BehaviorKind::ALL.len()),
            formation_radius: radii.formation,
        };
        set.insert(Box::new(Separation::new(radii.separation)));
        set.insert(Box::new(Alignment::new(radii.alignment)));
        set.insert(Box::new(Cohesion::new(radii.cohesion)));
        set.insert(Box::new(ObstacleAvoidance::new(radii.obstacle)));
        set.insert(Box::new(LeaderFollowing::new()));
        set.insert(Box::new(Formation::new(shape, radii.formation)));
        set.insert(Box::new(Exploration::new(exploration)));
        set.set_weights(&BehaviorWeights::default());
        set
    }

    /// Adiciona ou substitui o comportamento do mesmo tipo
    pub fn insert(&mut self, behavior: Box<dyn ForceBehavior>) {
        let kind = behavior.kind();
        match self.behaviors.iter_mut().find(|b| b.kind() == kind) {
            Some(slot) => *slot = behavior,
            None => self.behaviors.push(behavior),
        }
    }

    pub fn remove(&mut self, kind: BehaviorKind) -> Option<Box<dyn ForceBehavior>> {
        let index = self.behaviors.iter().position(|b| b.kind() == kind)?;
        Some(self.behaviors.remove(index))
    }

    pub fn contains(&self, kind: BehaviorKind) -> bool {
        self.behaviors.iter().any(|b| b.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = BehaviorKind> + '_ {
        self.behaviors.iter().map(|b| b.kind())
    }

    /// Substitui todos os pesos de uma vez
    pub fn set_weights(&mut self, weights: &BehaviorWeights) {
        for behavior in &mut self.behaviors {
            let w = weights.get(behavior.kind());
            behavior.set_weight(w);
        }
    }

    /// Pesos correntes (tipos ausentes valem zero)
    pub fn weights(&self) -> BehaviorWeights {
        let mut weights = BehaviorWeights::zeroed();
        for b in &self.behaviors {
            let w = b.weight();
            match b.kind() {
                BehaviorKind::Separation => weights.separation = w,
                BehaviorKind::Alignment => weights.alignment = w,
                BehaviorKind::Cohesion => weights.cohesion = w,
                BehaviorKind::ObstacleAvoidance => weights.obstacle_avoidance = w,
                BehaviorKind::LeaderFollowing => weights.leader_following = w,
                BehaviorKind::Formation => weights.formation = w,
                BehaviorKind::Exploration => weights.exploration = w,
            }
        }
        weights
    }

    /// Troca a geometria do comportamento de formação, mantendo o peso
    pub fn set_formation(&mut self, shape: FormationType) {
        let weight = self
            .behaviors
            .iter()
            .find(|b| b.kind() == BehaviorKind::Formation)
            .map(|b| b.weight());
        if let Some(weight) = weight {
            self.insert(Box::new(Formation::new(shape, self.formation_radius).with_weight(weight)));
        }
    }

    /// Força ponderada de cada comportamento
    pub fn forces(&mut self, agent: &Agent, neighbors: &[Agent], obstacles: &[Obstacle]) -> Vec<(BehaviorKind, Vec2)> {
        self.behaviors
            .iter_mut()
            .map(|b| (b.kind(), b.force(agent, neighbors, obstacles)))
            .collect()
    }

    /// Soma das forças ponderadas
    pub fn net_force(&mut self, agent: &Agent, neighbors: &[Agent], obstacles: &[Obstacle]) -> Vec2 {
        self.behaviors
            .iter_mut()
            .fold(Vec2::ZERO, |acc, b| acc + b.force(agent, neighbors, obstacles))
    }
}
