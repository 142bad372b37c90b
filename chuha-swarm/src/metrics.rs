//! Métricas de desempenho acumuladas

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contadores monotônicos, zerados apenas na criação do controlador
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Distância percorrida (m), integrada pela odometria
    pub distance_traveled: f64,
    /// Passos com qualidade de formação > 0.7
    pub time_in_formation: f64,
    /// Incrementos de quase-colisão
    pub collision_count: f64,
    /// Cobertura de exploração acumulada
    pub exploration_coverage: f64,
}

/// Observações de um passo que alimentam as métricas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepObservation {
    pub neighbor_count: usize,
    pub formation_quality: f64,
    /// Vizinhos dentro do raio de emergência
    pub close_neighbors: usize,
    /// Incremento por vizinho em emergência
    pub collision_increment: f64,
    /// Velocidade própria (m/s)
    pub speed: f64,
    /// Duração do passo (s)
    pub dt: f64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acumula as métricas de um passo
    pub fn record(&mut self, obs: &StepObservation) {
        self.exploration_coverage += if obs.neighbor_count < 3 { 0.1 } else { 0.05 };
        if obs.formation_quality > 0.7 {
            self.time_in_formation += 1.0;
        }
        self.collision_count += obs.close_neighbors as f64 * obs.collision_increment;
        if obs.speed.is_finite() {
            self.distance_traveled += obs.speed.abs() * obs.dt;
        }
    }
}

impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance={:.2}m formation_time={:.0} collisions={:.1} coverage={:.1}",
            self.distance_traveled,
            self.time_in_formation,
            self.collision_count,
            self.exploration_coverage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(neighbor_count: usize, quality: f64, close: usize) -> StepObservation {
        StepObservation {
            neighbor_count,
            formation_quality: quality,
            close_neighbors: close,
            collision_increment: 0.1,
            speed: 0.5,
            dt: 0.032,
        }
    }

    #[test]
    fn test_coverage_depends_on_crowding() {
        let mut m = PerformanceMetrics::new();
        m.record(&obs(1, 0.0, 0));
        assert!((m.exploration_coverage - 0.1).abs() < 1e-12);
        m.record(&obs(5, 0.0, 0));
        assert!((m.exploration_coverage - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_formation_time_counts_good_quality_once() {
        let mut m = PerformanceMetrics::new();
        m.record(&obs(4, 0.9, 0));
        m.record(&obs(4, 0.6, 0));
        assert_eq!(m.time_in_formation, 1.0);
    }

    #[test]
    fn test_collisions_and_distance() {
        let mut m = PerformanceMetrics::new();
        m.record(&obs(2, 0.0, 2));
        assert!((m.collision_count - 0.2).abs() < 1e-12);
        assert!((m.distance_traveled - 0.016).abs() < 1e-12);
    }
}
