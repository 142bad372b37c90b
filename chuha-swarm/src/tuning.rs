//! Auto-ajuste da sensibilidade de detecção
//!
//! A cada `interval` passos, a média de vizinhos dos últimos `window` passos
//! decide se o limiar epsilon desce (mais sensível) ou sobe (menos sensível).
//! O limiar nunca sai de `[min_epsilon, max_epsilon]`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Parâmetros do auto-ajuste
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Passos entre ajustes
    pub interval: u64,
    /// Número de passos recentes considerados
    pub window: usize,
    /// Incremento aplicado ao limiar
    pub step: f64,
    pub min_epsilon: f64,
    pub max_epsilon: f64,
    /// Média abaixo disso torna a detecção mais sensível
    pub low_neighbors: f64,
    /// Média acima disso torna a detecção menos sensível
    pub high_neighbors: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            interval: 200,
            window: 5,
            step: 0.1,
            min_epsilon: 0.3,
            max_epsilon: 0.9,
            low_neighbors: 1.0,
            high_neighbors: 4.0,
        }
    }
}

/// Ajuste realizado em um passo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub previous: f64,
    pub current: f64,
    /// Média de vizinhos que motivou o ajuste
    pub mean_neighbors: f64,
}

impl Adjustment {
    /// `true` quando a detecção ficou mais sensível
    pub fn more_sensitive(&self) -> bool {
        self.current < self.previous
    }
}

/// Limiar corrente e contagens recentes de vizinhos
#[derive(Debug, Clone)]
pub struct TuningState {
    epsilon: f64,
    recent: VecDeque<usize>,
    config: TuningConfig,
}

impl TuningState {
    /// O limiar inicial é trazido para `[min_epsilon, max_epsilon]`
    pub fn new(epsilon: f64, config: TuningConfig) -> Self {
        Self {
            epsilon: epsilon.max(config.min_epsilon).min(config.max_epsilon),
            recent: VecDeque::with_capacity(config.window),
            config,
        }
    }

    /// Limiar de detecção corrente
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    /// Registra a contagem de vizinhos de um passo
    pub fn record(&mut self, neighbor_count: usize) {
        self.recent.push_back(neighbor_count);
        while self.recent.len() > self.config.window {
            self.recent.pop_front();
        }
    }

    /// Média das contagens recentes (0 sem registros)
    pub fn mean_neighbors(&self) -> f64 {
        if self.recent.is_empty() {
            return 0.0;
        }
        self.recent.iter().sum::<usize>() as f64 / self.recent.len() as f64
    }

    /// `true` se o passo é um ponto de ajuste
    pub fn is_due(&self, step: u64) -> bool {
        step > 0 && self.config.interval > 0 && step % self.config.interval == 0
    }

    /// Ajusta o limiar se o passo for um ponto de ajuste.
    ///
    /// Retorna o ajuste quando o limiar efetivamente mudou.
    pub fn maybe_tune(&mut self, step: u64) -> Option<Adjustment> {
        if self.is_due(step) { self.tune() } else { None }
    }

    /// Ajusta o limiar com base na média recente, respeitando os limites
    pub fn tune(&mut self) -> Option<Adjustment> {
        let mean = self.mean_neighbors();
        let c = &self.config;
        let target = if mean < c.low_neighbors {
            (self.epsilon - c.step).max(c.min_epsilon)
        } else if mean > c.high_neighbors {
            (self.epsilon + c.step).min(c.max_epsilon)
        } else {
            return None;
        };

        if (target - self.epsilon).abs() < f64::EPSILON {
            return None;
        }
        let previous = self.epsilon;
        self.epsilon = target;
        Some(Adjustment {
            previous,
            current: target,
            mean_neighbors: mean,
        })
    }
}
