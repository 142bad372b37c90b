//! # Varredura de LIDAR
//!
//! Imagem de alcance `camadas × setores`, como entregue pelo LIDAR do
//! ChuhaBot (16 camadas × 512 setores), mais a calibração por camada: o
//! alcance medido por aquela camada em um mundo vazio.
//!
//! ## Alinhamento
//!
//! O zero angular do LIDAR fica em +x, mas o robô anda ao longo de +y.
//! O setor `s` corresponde ao bearing alinhado
//!
//! ```text
//! θ(s) = π/2 − 2π·s / setores
//! ```
//!
//! de modo que o setor 0 aponta para frente e os setores crescem no
//! sentido horário.

use crate::geometry::Vec2;
use crate::traits::SensorError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Número padrão de camadas do LIDAR
pub const DEFAULT_LAYERS: usize = 16;

/// Número padrão de setores angulares
pub const DEFAULT_SECTORS: usize = 512;

/// Alcance de cada camada sem nenhum objeto à vista (m)
pub const DEFAULT_BASELINE: [f64; DEFAULT_LAYERS] = [
    1.13114178, 0.85820043, 0.57785118, 0.43461093, 0.38639969, 0.31585345, 0.2667459,
    0.23062678, 0.21593061, 0.19141567, 0.17178488, 0.15571462, 0.14872716, 0.13643947,
    0.12597121, 0.11696267,
];

/// Calibração: alcance de referência por camada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub baseline: Vec<f64>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self { baseline: DEFAULT_BASELINE.to_vec() }
    }
}

impl Calibration {
    pub fn new(baseline: Vec<f64>) -> Self {
        Self { baseline }
    }

    pub fn layers(&self) -> usize {
        self.baseline.len()
    }

    /// Alcance de referência da camada (infinito se a camada não existe)
    pub fn baseline(&self, layer: usize) -> f64 {
        self.baseline.get(layer).copied().unwrap_or(f64::INFINITY)
    }

    /// Maior alcance entre todas as camadas
    pub fn max_range(&self) -> f64 {
        self.baseline.iter().copied().fold(0.0, f64::max)
    }
}

/// Imagem de alcance de uma varredura (row-major por camada)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeScan {
    layers: usize,
    sectors: usize,
    ranges: Vec<f64>,
}

impl RangeScan {
    /// Cria a partir de um buffer plano `layers * sectors`
    pub fn new(layers: usize, sectors: usize, ranges: Vec<f64>) -> Result<Self, SensorError> {
        if layers == 0 || sectors == 0 {
            return Err(SensorError::InvalidConfig(format!(
                "scan must have at least one layer and one sector, got {}x{}",
                layers, sectors
            )));
        }
        if ranges.len() != layers * sectors {
            return Err(SensorError::ReadFailed(format!(
                "expected {} readings ({}x{}), got {}",
                layers * sectors,
                layers,
                sectors,
                ranges.len()
            )));
        }
        Ok(Self { layers, sectors, ranges })
    }

    /// Cria a partir de linhas `[camada][setor]`
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SensorError> {
        let layers = rows.len();
        let sectors = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != sectors) {
            return Err(SensorError::ReadFailed("ragged range image".into()));
        }
        Self::new(layers, sectors, rows.into_iter().flatten().collect())
    }

    /// Varredura de mundo vazio: cada camada lê seu alcance de referência
    pub fn ambient(calibration: &Calibration, sectors: usize) -> Self {
        let layers = calibration.layers().max(1);
        let mut ranges = Vec::with_capacity(layers * sectors);
        for layer in 0..layers {
            let r = calibration.baseline(layer);
            ranges.extend(std::iter::repeat_n(r, sectors));
        }
        Self { layers, sectors, ranges }
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    pub fn sectors(&self) -> usize {
        self.sectors
    }

    #[inline]
    pub fn get(&self, layer: usize, sector: usize) -> f64 {
        self.ranges[layer * self.sectors + sector]
    }

    #[inline]
    pub fn set(&mut self, layer: usize, sector: usize, range: f64) {
        self.ranges[layer * self.sectors + sector] = range;
    }

    /// Bearing alinhado (frente = +y) do setor
    #[inline]
    pub fn bearing(&self, sector: usize) -> f64 {
        FRAC_PI_2 - TAU * sector as f64 / self.sectors as f64
    }

    /// Ponto cartesiano de uma leitura
    pub fn point(&self, sector: usize, range: f64) -> Vec2 {
        Vec2::from_polar(range, self.bearing(sector))
    }

    /// Desenha um disco (robô ou obstáculo) na varredura por ray casting.
    ///
    /// Cada setor cujo raio intercepta o disco passa a ler a distância do
    /// impacto em todas as camadas cujo valor atual é maior.
    pub fn paint_disc(&mut self, center: Vec2, radius: f64) {
        for sector in 0..self.sectors {
            let dir = Vec2::unit(self.bearing(sector));
            let along = dir.dot(&center);
            if along <= 0.0 {
                continue;
            }
            let perp_sq = center.length_squared() - along * along;
            let disc = radius * radius - perp_sq;
            if disc < 0.0 {
                continue;
            }
            let hit = (along - disc.sqrt()).max(0.0);
            for layer in 0..self.layers {
                if hit < self.get(layer, sector) {
                    self.set(layer, sector, hit);
                }
            }
        }
    }
}
