//! Detector de obstáculos
//!
//! Leituras mais curtas que `referência · ratio` são candidatas. Candidatas a
//! menos de `neighbor_exclusion_radius` de um vizinho são descartadas (são o
//! próprio robô vizinho); as restantes são agrupadas gulosamente em torno de
//! um centróide corrente.
//!
//! O resultado depende da ordem dos pontos de entrada.

use crate::config::DetectionConfig;
use chuha_core::geometry::Vec2;
use chuha_core::scan::{Calibration, RangeScan};
use chuha_core::{Agent, Obstacle};

/// Agrupa pontos: cada ponto livre abre um grupo e os pontos livres seguintes
/// a menos de `radius` do centróide corrente entram nele. O centróide é
/// atualizado como média móvel a cada adesão.
pub fn cluster_points(points: &[Vec2], radius: f64) -> Vec<Vec2> {
    let mut assigned = vec![false; points.len()];
    let mut centroids = Vec::new();

    for i in 0..points.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut centroid = points[i];
        let mut count = 1.0;

        for j in (i + 1)..points.len() {
            if assigned[j] {
                continue;
            }
            if points[j].distance_to(&centroid) < radius {
                assigned[j] = true;
                count += 1.0;
                centroid += (points[j] - centroid) / count;
            }
        }
        centroids.push(centroid);
    }
    centroids
}

/// Detecta obstáculos que não são vizinhos
#[derive(Debug, Clone)]
pub struct ObstacleDetector {
    calibration: Calibration,
    ratio: f64,
    exclusion_radius: f64,
    cluster_radius: f64,
}

impl ObstacleDetector {
    pub fn new(detection: &DetectionConfig) -> Self {
        Self {
            calibration: detection.calibration(),
            ratio: detection.obstacle_ratio,
            exclusion_radius: detection.neighbor_exclusion_radius,
            cluster_radius: detection.cluster_radius,
        }
    }

    /// Pontos candidatos, no referencial alinhado, em ordem camada/setor
    pub fn candidates(&self, scan: &RangeScan) -> Vec<Vec2> {
        let mut points = Vec::new();
        for layer in 0..scan.layers().min(self.calibration.layers()) {
            let threshold = self.calibration.baseline(layer) * self.ratio;
            for sector in 0..scan.sectors() {
                let r = scan.get(layer, sector);
                if r.is_finite() && r > 0.0 && r < threshold {
                    points.push(scan.point(sector, r));
                }
            }
        }
        points
    }

    /// Remove candidatos próximos de algum vizinho
    pub fn exclude_neighbors(&self, points: Vec<Vec2>, neighbors: &[Agent]) -> Vec<Vec2> {
        points
            .into_iter()
            .filter(|p| {
                neighbors
                    .iter()
                    .all(|n| p.distance_to(&n.position) >= self.exclusion_radius)
            })
            .collect()
    }

    /// Obstáculos da varredura dados os vizinhos já detectados
    pub fn detect(&self, scan: &RangeScan, neighbors: &[Agent]) -> Vec<Obstacle> {
        let points = self.exclude_neighbors(self.candidates(scan), neighbors);
        self.cluster(&points)
    }

    pub fn cluster(&self, points: &[Vec2]) -> Vec<Obstacle> {
        cluster_points(points, self.cluster_radius)
            .into_iter()
            .map(Obstacle::from)
            .collect()
    }
}

impl Default for ObstacleDetector {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}
