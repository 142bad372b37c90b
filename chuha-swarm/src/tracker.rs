//! Rastreador de vizinhos
//!
//! Converte a varredura do LIDAR em vizinhos:
//!
//! 1. **Filtro**: leitura `r < referência[camada] · ε` ocupa o setor
//!    (camadas posteriores sobrescrevem as anteriores)
//! 2. **Alinhamento**: setor `s` → `θ = π/2 − 2π·s/setores` (frente = +y)
//! 3. **Segmentação**: pontos consecutivos com `|Δθ| < δθ` e `|Δr| < δr/r`
//!    pertencem ao mesmo robô; o último segmento funde com o primeiro se
//!    der a volta
//! 4. **Centróide** de cada segmento = posição do vizinho
//!
//! A velocidade de cada vizinho é estimada por diferença finita contra a
//! posição de mesmo índice dois passos antes no histórico. A correspondência
//! por índice é uma aproximação: se a ordem dos vizinhos mudar entre passos,
//! a estimativa sai errada.

use crate::config::DetectionConfig;
use chuha_core::geometry::Vec2;
use chuha_core::scan::{Calibration, RangeScan};
use chuha_core::{Agent, Role};
use std::collections::VecDeque;

/// Ponto ocupado em coordenadas polares alinhadas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub theta: f64,
    pub range: f64,
}

impl PolarPoint {
    pub fn to_cartesian(&self) -> Vec2 {
        Vec2::from_polar(self.range, self.theta)
    }
}

/// Setores ocupados por robôs, em ordem de setor.
///
/// Camadas sem alcance de referência são ignoradas.
pub fn occupied_sectors(scan: &RangeScan, calibration: &Calibration, epsilon: f64) -> Vec<PolarPoint> {
    let mut occupied: Vec<Option<f64>> = vec![None; scan.sectors()];
    for layer in 0..scan.layers().min(calibration.layers()) {
        let threshold = calibration.baseline(layer) * epsilon;
        for (sector, slot) in occupied.iter_mut().enumerate() {
            let r = scan.get(layer, sector);
            if r.is_finite() && r > 0.0 && r < threshold {
                *slot = Some(r);
            }
        }
    }

    occupied
        .into_iter()
        .enumerate()
        .filter_map(|(sector, r)| {
            r.map(|range| PolarPoint {
                theta: scan.bearing(sector),
                range,
            })
        })
        .collect()
}

fn continues(prev: &PolarPoint, next: &PolarPoint, delta_theta: f64, delta_r: f64, wrap: f64) -> bool {
    (prev.theta - next.theta - wrap).abs() < delta_theta
        && (prev.range - next.range).abs() < delta_r / next.range
}

/// Agrupa pontos consecutivos que pertencem ao mesmo robô
pub fn segment(points: &[PolarPoint], delta_theta: f64, delta_r: f64) -> Vec<Vec<PolarPoint>> {
    let mut segments: Vec<Vec<PolarPoint>> = Vec::new();
    for point in points {
        match segments.last_mut() {
            Some(current) => {
                let prev = current[current.len() - 1];
                if continues(&prev, point, delta_theta, delta_r, 0.0) {
                    current.push(*point);
                } else {
                    segments.push(vec![*point]);
                }
            }
            None => segments.push(vec![*point]),
        }
    }

    // Um robô atravessando o setor zero aparece nas duas pontas
    if segments.len() > 1 {
        let first = segments[0][0];
        let last_segment = &segments[segments.len() - 1];
        let last = last_segment[last_segment.len() - 1];
        if continues(&first, &last, delta_theta, delta_r, std::f64::consts::TAU) {
            if let Some(tail) = segments.pop() {
                segments[0].extend(tail);
            }
        }
    }
    segments
}

/// Posições dos vizinhos detectados em uma varredura
pub fn extract_positions(
    scan: &RangeScan,
    detection: &DetectionConfig,
    calibration: &Calibration,
    epsilon: f64,
) -> Vec<Vec2> {
    let points = occupied_sectors(scan, calibration, epsilon);
    segment(&points, detection.delta_theta, detection.delta_r)
        .iter()
        .filter_map(|seg| {
            let cartesian: Vec<Vec2> = seg.iter().map(PolarPoint::to_cartesian).collect();
            Vec2::mean(&cartesian)
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// HISTÓRICO
// ═══════════════════════════════════════════════════════════════════════════

/// Snapshots de posições por passo, FIFO de capacidade fixa
#[derive(Debug, Clone)]
pub struct NeighborHistory {
    entries: VecDeque<Vec<Vec2>>,
    capacity: usize,
}

impl NeighborHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adiciona um snapshot, descartando o mais antigo se cheio
    pub fn push(&mut self, snapshot: Vec<Vec2>) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot `back` passos atrás (1 = mais recente)
    pub fn back(&self, back: usize) -> Option<&[Vec2]> {
        if back == 0 || back > self.entries.len() {
            return None;
        }
        self.entries.get(self.entries.len() - back).map(Vec::as_slice)
    }

    /// Contagens de vizinhos dos snapshots, do mais antigo ao mais recente
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(Vec::len)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RASTREADOR
// ═══════════════════════════════════════════════════════════════════════════

/// Detecta vizinhos e estima suas velocidades
#[derive(Debug, Clone)]
pub struct NeighborTracker {
    detection: DetectionConfig,
    calibration: Calibration,
    history: NeighborHistory,
    /// Duração do passo (s)
    dt: f64,
    leader: Option<String>,
}

impl NeighborTracker {
    pub fn new(detection: DetectionConfig, dt: f64) -> Self {
        let calibration = detection.calibration();
        let history = NeighborHistory::new(detection.history_capacity);
        Self {
            detection,
            calibration,
            history,
            dt,
            leader: None,
        }
    }

    pub fn history(&self) -> &NeighborHistory {
        &self.history
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Designa o id de vizinho tratado como líder
    pub fn designate_leader(&mut self, id: Option<String>) {
        self.leader = id;
    }

    pub fn leader(&self) -> Option<&str> {
        self.leader.as_deref()
    }

    /// Detecta vizinhos na varredura com a sensibilidade dada
    pub fn detect(&mut self, scan: &RangeScan, epsilon: f64) -> Vec<Agent> {
        let positions = extract_positions(scan, &self.detection, &self.calibration, epsilon);
        self.track(positions)
    }

    /// Monta os agentes vizinhos e registra o snapshot no histórico
    pub fn track(&mut self, positions: Vec<Vec2>) -> Vec<Agent> {
        let neighbors = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let id = format!("neighbor_{}", i);
                let role = if self.leader.as_deref() == Some(id.as_str()) {
                    Role::Leader
                } else {
                    Role::Follower
                };
                Agent::observed(id, position)
                    .with_velocity(self.estimate_velocity(i, position))
                    .with_role(role)
            })
            .collect();
        self.history.push(positions);
        neighbors
    }

    /// Registra vizinhos já percebidos por outra fonte
    pub fn record(&mut self, neighbors: &[Agent]) {
        self.history.push(neighbors.iter().map(|n| n.position).collect());
    }

    /// Registra um passo sem dados de sensor
    pub fn record_absent(&mut self) {
        self.history.push(Vec::new());
    }

    /// Diferença finita contra o mesmo índice dois snapshots atrás
    pub fn estimate_velocity(&self, index: usize, position: Vec2) -> Vec2 {
        if self.history.len() < 2 || !(self.dt > 0.0) {
            return Vec2::ZERO;
        }
        match self.history.back(2).and_then(|snapshot| snapshot.get(index)) {
            Some(previous) => (position - *previous) / self.dt,
            None => Vec2::ZERO,
        }
    }
}
