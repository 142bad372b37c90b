//! Tipos de dados para atuadores

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lado da roda em um robô de tração diferencial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelSide {
    Left,
    Right,
}

impl WheelSide {
    pub fn device_name(&self) -> &'static str {
        match self {
            Self::Left => "left motor",
            Self::Right => "right motor",
        }
    }
}

/// Par de velocidades angulares de roda (rad/s)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelCommand {
    pub left: f64,
    pub right: f64,
}

impl WheelCommand {
    pub const STOP: WheelCommand = WheelCommand { left: 0.0, right: 0.0 };

    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Maior magnitude entre as duas rodas
    pub fn peak(&self) -> f64 {
        self.left.abs().max(self.right.abs())
    }

    /// Escala ambas as rodas para que a maior fique em `max` exatamente,
    /// se ultrapassar. Preserva a razão L/R.
    pub fn saturate(self, max: f64) -> Self {
        let peak = self.peak();
        if peak > max && peak > 0.0 {
            Self::new(self.left / peak * max, self.right / peak * max)
        } else {
            self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.right.is_finite()
    }

    pub fn get(&self, side: WheelSide) -> f64 {
        match side {
            WheelSide::Left => self.left,
            WheelSide::Right => self.right,
        }
    }
}

impl fmt::Display for WheelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L={:.2} R={:.2}", self.left, self.right)
    }
}
