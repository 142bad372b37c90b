//! # 🤖 Chuha-Core
//!
//! Fundamentos do controlador de enxame ChuhaBot: geometria 2D, modelo de
//! agentes, varredura de LIDAR e os traits que as camadas implementam.
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! ## Referencial
//!
//! Todo cálculo acontece no referencial local do robô: o próprio robô está
//! sempre na origem e o eixo +y aponta para frente.
//!
//! ```text
//!            +y (frente)
//!             ▲
//!             │   • vizinho
//!             │
//!   ──────────●──────────▶ +x
//!           robô
//! ```
//!
//! ## Módulos
//!
//! - [`geometry`]: `Vec2` — vetores e forças 2D
//! - [`agent`]: `Agent`, `Role`, `Obstacle`
//! - [`behavior`]: `BehaviorKind` e perfis `BehaviorWeights`
//! - [`scan`]: `RangeScan` e `Calibration` — imagem de alcance do LIDAR
//! - [`traits`]: `ChuhaComponent`, `RangeSensor`, `Actuator`, `ForceBehavior`, `VisualizationSink`
//! - [`config`]: overrides via variáveis de ambiente / `.env`
//!
//! ## Quick Start
//!
//! ```
//! use chuha_core::prelude::*;
//!
//! let me = Agent::at_origin("chuha_1");
//! let neighbor = Agent::observed("neighbor_0", Vec2::new(0.1, 0.2));
//! assert!(me.distance_to(&neighbor) > 0.2);
//! ```

pub mod agent;
pub mod behavior;
pub mod config;
pub mod geometry;
pub mod prelude;
pub mod scan;
pub mod traits;

pub use agent::{Agent, Obstacle, Role};
pub use behavior::{BehaviorKind, BehaviorWeights};
pub use geometry::Vec2;
pub use scan::{Calibration, RangeScan};
