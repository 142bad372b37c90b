//! # Prelude — Re-exportações Convenientes
//!
//! ```
//! use chuha_core::prelude::*;
//! ```

// Modelo
pub use crate::agent::{Agent, Obstacle, Role};
pub use crate::behavior::{BehaviorKind, BehaviorWeights};
pub use crate::geometry::Vec2;
pub use crate::scan::{Calibration, RangeScan, DEFAULT_BASELINE, DEFAULT_LAYERS, DEFAULT_SECTORS};

// Traits fundamentais
pub use crate::traits::{
    // Base
    ChuhaComponent,
    // Percepção
    RangeSensor,
    SensorError,
    // Decisão
    ForceBehavior,
    // Atuação
    Actuator,
    ActuatorError,
    ActuatorStatus,
    // Visualização
    SwarmFrame,
    VisualizationSink,
};
