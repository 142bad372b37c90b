//! Máquina de estados de missão
//!
//! Cada modo seleciona um perfil de pesos (base configurável + ajustes
//! adaptativos). O modo só muda automaticamente nas fronteiras de passo:
//!
//! ```text
//! exploration ──(≥3 vizinhos)──► formation ──(qualidade > 0.8)──► patrol
//!      ▲                                                            │
//!      └───────────────────(ciclo de patrulha)──────────────────────┘
//! ```
//!
//! O tipo de formação se adapta a cada passo: ≥4 vizinhos → círculo,
//! 2–3 → linha, caso contrário inalterado.

use chuha_core::geometry::Vec2;
use chuha_core::{Agent, BehaviorWeights};
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// MODOS E FORMAÇÕES
// ═══════════════════════════════════════════════════════════════════════════

/// Estratégia de alto nível ativa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionMode {
    #[default]
    Exploration,
    Formation,
    Following,
    Patrol,
    Search,
}

impl MissionMode {
    pub const ALL: [MissionMode; 5] = [
        MissionMode::Exploration,
        MissionMode::Formation,
        MissionMode::Following,
        MissionMode::Patrol,
        MissionMode::Search,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Exploration => "exploration",
            Self::Formation => "formation",
            Self::Following => "following",
            Self::Patrol => "patrol",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for MissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometria alvo do comportamento de formação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationType {
    #[default]
    Circle,
    Line,
    /// Reservado: ainda sem geometria definida
    VShape,
}

impl FormationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Line => "line",
            Self::VShape => "v_shape",
        }
    }
}

impl fmt::Display for FormationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualidade da formação em [0, 1].
///
/// Só o círculo é medido: `max(0, 1 − σ/(μ + 0.001))` sobre as distâncias
/// dos vizinhos ao centróide. Outras formações valem 0.5; com menos de dois
/// vizinhos a qualidade é 0.
pub fn formation_quality(formation: FormationType, neighbors: &[Agent]) -> f64 {
    if neighbors.len() < 2 {
        return 0.0;
    }
    if formation != FormationType::Circle {
        return 0.5;
    }

    let Some(center) = Vec2::mean(neighbors.iter().map(|n| &n.position)) else {
        return 0.0;
    };
    let distances: Vec<f64> = neighbors
        .iter()
        .map(|n| n.position.distance_to(&center))
        .collect();
    let count = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / count;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / count;

    (1.0 - variance.sqrt() / (mean + 0.001)).max(0.0)
}

// ═══════════════════════════════════════════════════════════════════════════
// CONFIGURAÇÃO
// ═══════════════════════════════════════════════════════════════════════════

/// Perfis base de pesos por modo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionProfiles {
    pub exploration: BehaviorWeights,
    pub formation: BehaviorWeights,
    pub following: BehaviorWeights,
    pub patrol: BehaviorWeights,
    pub search: BehaviorWeights,
    /// Perfil usado quando nenhum modo se aplica (ex.: seguir sem vizinhos)
    pub balanced: BehaviorWeights,
}

impl Default for MissionProfiles {
    fn default() -> Self {
        let base = BehaviorWeights::default();
        Self {
            exploration: BehaviorWeights {
                separation: 2.5,
                alignment: 0.8,
                cohesion: 1.2,
                obstacle_avoidance: 3.5,
                exploration: 2.0,
                ..base
            },
            formation: BehaviorWeights {
                separation: 1.5,
                alignment: 2.0,
                cohesion: 1.8,
                obstacle_avoidance: 3.0,
                formation: 2.5,
                ..base
            },
            following: BehaviorWeights {
                separation: 2.0,
                alignment: 1.5,
                cohesion: 2.5,
                obstacle_avoidance: 3.0,
                leader_following: 3.0,
                ..base
            },
            patrol: BehaviorWeights {
                separation: 3.0,
                alignment: 1.2,
                cohesion: 0.8,
                obstacle_avoidance: 4.0,
                exploration: 1.5,
                ..base
            },
            search: BehaviorWeights {
                separation: 2.0,
                alignment: 2.5,
                cohesion: 1.5,
                obstacle_avoidance: 3.5,
                exploration: 2.5,
                ..base
            },
            balanced: base,
        }
    }
}

impl MissionProfiles {
    pub fn base(&self, mode: MissionMode) -> BehaviorWeights {
        match mode {
            MissionMode::Exploration => self.exploration,
            MissionMode::Formation => self.formation,
            MissionMode::Following => self.following,
            MissionMode::Patrol => self.patrol,
            MissionMode::Search => self.search,
        }
    }
}

/// Parâmetros da máquina de estados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub initial_mode: MissionMode,
    pub initial_formation: FormationType,
    /// Passos entre reavaliações automáticas de modo
    pub switch_interval: u64,
    /// Nenhuma troca automática até este passo
    pub switch_warmup: u64,
    /// Ciclo de retorno patrol → exploration
    pub patrol_cycle: u64,
    /// Taxa de aprendizado do perfil balanceado
    pub learning_rate: f64,
    /// Passos entre registros de status
    pub status_interval: u64,
    /// Passos entre resumos de desempenho
    pub summary_interval: u64,
    pub profiles: MissionProfiles,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            initial_mode: MissionMode::Exploration,
            initial_formation: FormationType::Circle,
            switch_interval: 800,
            switch_warmup: 500,
            patrol_cycle: 1600,
            learning_rate: 0.01,
            status_interval: 150,
            summary_interval: 1000,
            profiles: MissionProfiles::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ESTADO
// ═══════════════════════════════════════════════════════════════════════════

/// Troca de modo efetivada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: MissionMode,
    pub to: MissionMode,
    pub step: u64,
}

/// Modo, formação e contador de passos de um robô
#[derive(Debug, Clone)]
pub struct MissionState {
    mode: MissionMode,
    formation: FormationType,
    step: u64,
    config: MissionConfig,
}

impl MissionState {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            mode: config.initial_mode,
            formation: config.initial_formation,
            step: 0,
            config,
        }
    }

    pub fn mode(&self) -> MissionMode {
        self.mode
    }

    pub fn formation(&self) -> FormationType {
        self.formation
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Avança o contador e retorna o novo passo
    pub fn advance(&mut self) -> u64 {
        self.step += 1;
        self.step
    }

    /// Qualidade da formação corrente
    pub fn quality(&self, neighbors: &[Agent]) -> f64 {
        formation_quality(self.formation, neighbors)
    }

    /// Perfil de pesos para o modo corrente e as observações do passo
    pub fn weights_for(&self, neighbors: &[Agent]) -> BehaviorWeights {
        let profiles = &self.config.profiles;
        let n = neighbors.len();
        let q = self.quality(neighbors);

        match self.mode {
            MissionMode::Exploration => {
                let mut w = profiles.exploration;
                if n > 3 {
                    w.separation += 0.5;
                }
                if n > 4 {
                    w.cohesion -= 0.3;
                }
                if n < 2 {
                    w.exploration += 1.0;
                }
                w
            }
            MissionMode::Formation => {
                let mut w = profiles.formation;
                if q < 0.5 {
                    w.formation += 1.0;
                    w.cohesion += 0.7;
                }
                if q < 0.6 {
                    w.alignment += 0.5;
                }
                w
            }
            MissionMode::Following if n > 0 => {
                let mean_range = neighbors.iter().map(Agent::range).sum::<f64>() / n as f64;
                let mut w = profiles.following;
                if mean_range < 0.2 {
                    w.separation += 1.0;
                }
                if mean_range > 0.5 {
                    w.cohesion -= 0.5;
                }
                if mean_range > 0.4 {
                    w.leader_following += 1.0;
                }
                w
            }
            MissionMode::Patrol => profiles.patrol,
            MissionMode::Search => profiles.search,
            MissionMode::Following => self.balanced(q),
        }
    }

    fn balanced(&self, quality: f64) -> BehaviorWeights {
        let lr = self.config.learning_rate;
        let mut w = self.config.profiles.balanced;
        w.separation += lr * quality;
        w.cohesion += lr * (1.0 - quality);
        w
    }

    /// Adapta o tipo de formação à contagem de vizinhos.
    ///
    /// Retorna o novo tipo quando houve troca.
    pub fn adapt_formation(&mut self, neighbor_count: usize) -> Option<FormationType> {
        let target = match neighbor_count {
            n if n >= 4 => FormationType::Circle,
            2 | 3 => FormationType::Line,
            _ => return None,
        };
        if target == self.formation {
            return None;
        }
        self.formation = target;
        Some(target)
    }

    /// `true` se o passo corrente é uma fronteira de reavaliação
    pub fn at_boundary(&self) -> bool {
        let c = &self.config;
        self.step > c.switch_warmup && (self.step - c.switch_warmup) % c.switch_interval == 0
    }

    /// Reavalia o modo na fronteira de passo segundo a tabela de transições.
    ///
    /// O ciclo de patrulha conta a partir do aquecimento
    /// (`(passo − switch_warmup) % patrol_cycle == 0`), não de múltiplos
    /// absolutos de `patrol_cycle`: as fronteiras caem em 500 + 800k, que
    /// nunca é múltiplo de 1600.
    pub fn evaluate_transition(&mut self, neighbor_count: usize, quality: f64) -> Option<ModeChange> {
        if !self.at_boundary() {
            return None;
        }
        let since_warmup = self.step - self.config.switch_warmup;
        let next = match self.mode {
            MissionMode::Exploration if neighbor_count >= 3 => MissionMode::Formation,
            MissionMode::Formation if quality > 0.8 => MissionMode::Patrol,
            MissionMode::Patrol if since_warmup % self.config.patrol_cycle == 0 => {
                MissionMode::Exploration
            }
            _ => return None,
        };
        self.switch_mode(next)
    }

    /// Troca manual de modo; retorna a troca se o modo mudou
    pub fn switch_mode(&mut self, mode: MissionMode) -> Option<ModeChange> {
        if mode == self.mode {
            return None;
        }
        let change = ModeChange {
            from: self.mode,
            to: mode,
            step: self.step,
        };
        self.mode = mode;
        Some(change)
    }

    /// Força um tipo de formação
    pub fn set_formation(&mut self, formation: FormationType) {
        self.formation = formation;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PROGRAMA DE MISSÃO
// ═══════════════════════════════════════════════════════════════════════════

/// Sequência de `(passo, modo)` aplicada em ordem entre passos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSchedule {
    entries: Vec<(u64, MissionMode)>,
    #[serde(skip)]
    cursor: usize,
}

impl MissionSchedule {
    pub fn new(mut entries: Vec<(u64, MissionMode)>) -> Self {
        entries.sort_by_key(|(step, _)| *step);
        Self { entries, cursor: 0 }
    }

    /// Programa de demonstração: percorre todos os modos a cada 600 passos
    pub fn demo() -> Self {
        Self::new(vec![
            (0, MissionMode::Exploration),
            (600, MissionMode::Formation),
            (1200, MissionMode::Patrol),
            (1800, MissionMode::Search),
            (2400, MissionMode::Following),
        ])
    }

    pub fn entries(&self) -> &[(u64, MissionMode)] {
        &self.entries
    }

    /// Entradas ainda não aplicadas
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Consome as entradas vencidas até `step` e retorna o último modo
    pub fn due(&mut self, step: u64) -> Option<MissionMode> {
        let mut mode = None;
        while let Some(&(at, m)) = self.entries.get(self.cursor) {
            if at > step {
                break;
            }
            mode = Some(m);
            self.cursor += 1;
        }
        mode
    }
}
