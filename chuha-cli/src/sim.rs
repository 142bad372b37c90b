//! Mundo simulado visto do referencial do robô
//!
//! Vizinhos orbitam o robô em raios fixos; obstáculos ficam parados. A cada
//! leitura o mundo avança um passo e é desenhado numa varredura por ray
//! casting sobre o alcance de referência de cada camada.

use chuha_core::geometry::Vec2;
use chuha_core::scan::{Calibration, RangeScan};
use chuha_core::traits::{ChuhaComponent, RangeSensor, SensorError};
use std::f64::consts::TAU;

/// Raio do corpo de um robô (m)
pub const ROBOT_RADIUS: f64 = 0.035;

/// Raio de um obstáculo (m)
pub const OBSTACLE_RADIUS: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
struct Orbit {
    radius: f64,
    phase: f64,
    /// rad por passo
    rate: f64,
}

impl Orbit {
    fn position(&self, step: u64) -> Vec2 {
        Vec2::from_polar(self.radius, self.phase + self.rate * step as f64)
    }
}

/// LIDAR simulado
#[derive(Debug)]
pub struct SimulatedLidar {
    calibration: Calibration,
    sectors: usize,
    orbits: Vec<Orbit>,
    obstacles: Vec<Vec2>,
    step: u64,
    /// Falha uma leitura a cada N (0 = nunca)
    dropout: u64,
}

impl SimulatedLidar {
    /// `neighbors` robôs entre 0.18 m e 0.45 m, `obstacles` a ~0.75 m
    pub fn new(calibration: Calibration, sectors: usize, neighbors: usize, obstacles: usize) -> Self {
        let orbits = (0..neighbors)
            .map(|i| {
                let spread = if neighbors > 1 { i as f64 / (neighbors - 1) as f64 } else { 0.5 };
                Orbit {
                    radius: 0.18 + 0.27 * spread,
                    phase: i as f64 * TAU / neighbors as f64,
                    rate: if i % 2 == 0 { 0.004 } else { -0.003 },
                }
            })
            .collect();
        let obstacles = (0..obstacles)
            .map(|i| Vec2::from_polar(0.75, 0.4 + i as f64 * TAU / obstacles as f64))
            .collect();

        Self {
            calibration,
            sectors: sectors.max(1),
            orbits,
            obstacles,
            step: 0,
            dropout: 0,
        }
    }

    pub fn with_dropout(mut self, every: u64) -> Self {
        self.dropout = every;
        self
    }

    /// Posições verdadeiras dos vizinhos no passo corrente
    pub fn neighbor_positions(&self) -> Vec<Vec2> {
        self.orbits.iter().map(|o| o.position(self.step)).collect()
    }

    pub fn obstacle_positions(&self) -> &[Vec2] {
        &self.obstacles
    }

    /// Desenha o mundo no passo corrente
    pub fn render(&self) -> RangeScan {
        let mut scan = RangeScan::ambient(&self.calibration, self.sectors);
        for p in self.neighbor_positions() {
            scan.paint_disc(p, ROBOT_RADIUS);
        }
        for p in &self.obstacles {
            scan.paint_disc(*p, OBSTACLE_RADIUS);
        }
        scan
    }
}

impl ChuhaComponent for SimulatedLidar {
    fn name(&self) -> &str {
        "simulated lidar"
    }
}

impl RangeSensor for SimulatedLidar {
    fn read(&mut self) -> Result<RangeScan, SensorError> {
        self.step += 1;
        if self.dropout > 0 && self.step % self.dropout == 0 {
            return Err(SensorError::ReadFailed(format!("simulated dropout at step {}", self.step)));
        }
        Ok(self.render())
    }

    fn sectors(&self) -> usize {
        self.sectors
    }
}
