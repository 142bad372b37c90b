//! Laço de controle de um robô
//!
//! [`SwarmController`] é dono de todo o estado mutável de um robô: histórico
//! de vizinhos, máquina de missão, auto-ajuste, suavização e métricas. Um
//! passo é síncrono e nunca falha.
//!
//! Ordem de um passo:
//!
//! 1. avança o contador e aplica o programa de missão, se houver
//! 2. auto-ajuste da sensibilidade (a cada `tuning.interval`)
//! 3. percepção de vizinhos e obstáculos
//! 4. pesos do modo corrente, depois adaptação do tipo de formação
//! 5. qualidade da formação
//! 6. agregação + emergência + tração + suavização
//! 7. métricas, visualização, status
//! 8. reavaliação de modo na fronteira de passo

use crate::aggregator::WeightedAggregator;
use crate::behavior::BehaviorSet;
use crate::config::SwarmConfig;
use crate::error::SwarmResult;
use crate::metrics::{PerformanceMetrics, StepObservation};
use crate::mission::{FormationType, MissionMode, MissionSchedule, MissionState, ModeChange};
use crate::obstacle::ObstacleDetector;
use crate::tracker::NeighborTracker;
use crate::tuning::{Adjustment, TuningState};
use chuha_actuator::WheelCommand;
use chuha_core::geometry::Vec2;
use chuha_core::scan::RangeScan;
use chuha_core::traits::{ChuhaComponent, RangeSensor, SwarmFrame, VisualizationSink};
use chuha_core::{Agent, BehaviorWeights, Obstacle, Role};

/// Resultado de um passo de controle
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: u64,
    pub neighbors: Vec<Agent>,
    pub obstacles: Vec<Obstacle>,
    /// Modo em vigor durante o passo
    pub mode: MissionMode,
    /// Tipo de formação após a adaptação do passo
    pub formation: FormationType,
    pub formation_quality: f64,
    pub weights: BehaviorWeights,
    pub behavior_force: Vec2,
    pub emergency_force: Vec2,
    pub net_force: Vec2,
    /// Comando suavizado das rodas
    pub command: WheelCommand,
    /// Sensibilidade usada na detecção
    pub epsilon: f64,
    pub tuned: Option<Adjustment>,
    pub formation_change: Option<FormationType>,
    /// Troca de modo avaliada ao fim do passo
    pub mode_change: Option<ModeChange>,
}

impl StepReport {
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }
}

/// `true` se o nome indica o líder do enxame
pub fn is_leader_name(name: &str) -> bool {
    name.ends_with("_0") || name.to_lowercase().contains("leader")
}

/// Controlador de enxame de um robô
#[derive(Debug)]
pub struct SwarmController {
    name: String,
    config: SwarmConfig,
    role: Role,
    /// Velocidade própria vinda da odometria
    velocity: Vec2,
    tracker: NeighborTracker,
    obstacles: ObstacleDetector,
    aggregator: WeightedAggregator,
    mission: MissionState,
    tuning: TuningState,
    metrics: PerformanceMetrics,
    schedule: Option<MissionSchedule>,
    sink: Option<Box<dyn VisualizationSink>>,
}

impl SwarmController {
    pub fn new(name: impl Into<String>, config: SwarmConfig) -> SwarmResult<Self> {
        config.validate()?;
        let name = name.into();

        let behaviors = BehaviorSet::standard(
            &config.radii,
            config.mission.initial_formation,
            &config.exploration,
        );
        let aggregator =
            WeightedAggregator::new(behaviors, config.emergency, config.max_velocity, config.smoothing);
        let role = if is_leader_name(&name) { Role::Leader } else { Role::Follower };

        tracing::debug!(robot = %name, ?role, "controller initialized");
        Ok(Self {
            role,
            velocity: Vec2::ZERO,
            tracker: NeighborTracker::new(config.detection.clone(), config.timestep_secs()),
            obstacles: ObstacleDetector::new(&config.detection),
            aggregator,
            mission: MissionState::new(config.mission.clone()),
            tuning: TuningState::new(config.detection.epsilon, config.tuning),
            metrics: PerformanceMetrics::new(),
            schedule: None,
            sink: None,
            name,
            config,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Acesso
    // ─────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn step_count(&self) -> u64 {
        self.mission.step()
    }

    pub fn mode(&self) -> MissionMode {
        self.mission.mode()
    }

    pub fn formation(&self) -> FormationType {
        self.mission.formation()
    }

    /// Sensibilidade de detecção corrente
    pub fn epsilon(&self) -> f64 {
        self.tuning.epsilon()
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn tracker(&self) -> &NeighborTracker {
        &self.tracker
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        self.aggregator.behaviors()
    }

    /// Último comando suavizado
    pub fn last_command(&self) -> WheelCommand {
        self.aggregator.last_command()
    }

    /// O próprio robô: origem, heading 0
    pub fn own_agent(&self) -> Agent {
        Agent::at_origin(self.name.clone())
            .with_velocity(self.velocity)
            .with_role(self.role)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Controle externo
    // ─────────────────────────────────────────────────────────────────────

    /// Velocidade própria medida pela odometria
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Designa o vizinho seguido por LeaderFollowing
    pub fn designate_leader(&mut self, id: Option<String>) {
        self.tracker.designate_leader(id);
    }

    /// Troca manual de modo
    pub fn switch_mode(&mut self, mode: MissionMode) -> Option<ModeChange> {
        let change = self.mission.switch_mode(mode)?;
        tracing::info!(robot = %self.name, from = %change.from, to = %change.to, "switched mission mode");
        Some(change)
    }

    pub fn set_schedule(&mut self, schedule: MissionSchedule) {
        self.schedule = Some(schedule);
    }

    pub fn set_visualization(&mut self, sink: Box<dyn VisualizationSink>) {
        self.sink = Some(sink);
    }

    pub fn take_visualization(&mut self) -> Option<Box<dyn VisualizationSink>> {
        self.sink.take()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Passo
    // ─────────────────────────────────────────────────────────────────────

    /// Passo a partir de uma varredura; `None` = sensor indisponível
    pub fn step(&mut self, scan: Option<&RangeScan>) -> StepReport {
        let (step, tuned) = self.begin();
        let epsilon = self.tuning.epsilon();
        let (neighbors, obstacles) = match scan {
            Some(scan) => {
                let neighbors = self.tracker.detect(scan, epsilon);
                let obstacles = self.obstacles.detect(scan, &neighbors);
                (neighbors, obstacles)
            }
            None => {
                self.tracker.record_absent();
                (Vec::new(), Vec::new())
            }
        };
        self.finish(step, tuned, neighbors, obstacles)
    }

    /// Lê o sensor; em falha, registra e segue sem percepção
    pub fn step_with_sensor<S: RangeSensor + ?Sized>(&mut self, sensor: &mut S) -> StepReport {
        match sensor.read() {
            Ok(scan) => self.step(Some(&scan)),
            Err(e) => {
                tracing::warn!(
                    robot = %self.name,
                    sensor = sensor.name(),
                    error = %e,
                    "sensor read failed, stepping without perception"
                );
                self.step(None)
            }
        }
    }

    /// Passo a partir de vizinhos e obstáculos já percebidos
    pub fn step_observed(&mut self, neighbors: Vec<Agent>, obstacles: Vec<Obstacle>) -> StepReport {
        let (step, tuned) = self.begin();
        self.tracker.record(&neighbors);
        self.finish(step, tuned, neighbors, obstacles)
    }

    fn begin(&mut self) -> (u64, Option<Adjustment>) {
        let step = self.mission.advance();

        let scheduled = self.schedule.as_mut().and_then(|s| s.due(step));
        if let Some(mode) = scheduled {
            self.switch_mode(mode);
        }

        let tuned = self.tuning.maybe_tune(step);
        if let Some(adj) = &tuned {
            tracing::info!(
                robot = %self.name,
                step,
                epsilon = adj.current,
                mean_neighbors = adj.mean_neighbors,
                "auto-tuned detection sensitivity ({})",
                if adj.more_sensitive() { "more sensitive" } else { "less sensitive" }
            );
        }
        (step, tuned)
    }

    fn finish(
        &mut self,
        step: u64,
        tuned: Option<Adjustment>,
        neighbors: Vec<Agent>,
        obstacles: Vec<Obstacle>,
    ) -> StepReport {
        self.tuning.record(neighbors.len());
        let agent = self.own_agent();

        // Pesos usam o tipo de formação anterior à adaptação
        let weights = self.mission.weights_for(&neighbors);
        let formation_change = self.mission.adapt_formation(neighbors.len());
        if let Some(shape) = formation_change {
            self.aggregator.behaviors_mut().set_formation(shape);
            tracing::info!(
                robot = %self.name,
                neighbors = neighbors.len(),
                "switched to {} formation",
                shape
            );
        }
        let quality = self.mission.quality(&neighbors);

        let out = self.aggregator.step(&agent, &neighbors, &obstacles, &weights);

        self.metrics.record(&StepObservation {
            neighbor_count: neighbors.len(),
            formation_quality: quality,
            close_neighbors: out.close_neighbors,
            collision_increment: self.config.emergency.collision_increment,
            speed: agent.velocity.length(),
            dt: self.config.timestep_secs(),
        });

        let mode = self.mission.mode();
        if let Some(sink) = self.sink.as_mut() {
            sink.render(&SwarmFrame {
                step,
                robot: self.name.clone(),
                mode: mode.name().to_string(),
                formation: self.mission.formation().name().to_string(),
                neighbors: neighbors.iter().map(|n| n.position).collect(),
                obstacles: obstacles.iter().map(|o| o.position).collect(),
                force: out.net_force,
                formation_quality: quality,
            });
        }

        tracing::debug!(
            robot = %self.name,
            step,
            neighbors = neighbors.len(),
            obstacles = obstacles.len(),
            fx = out.net_force.x,
            fy = out.net_force.y,
            left = out.command.left,
            right = out.command.right,
            "step"
        );
        self.log_status(step, &neighbors, &obstacles, quality, out.net_force);

        let mode_change = self.mission.evaluate_transition(neighbors.len(), quality);
        if let Some(change) = &mode_change {
            tracing::info!(
                robot = %self.name,
                step,
                from = %change.from,
                to = %change.to,
                "switched mission mode"
            );
        }

        StepReport {
            step,
            neighbors,
            obstacles,
            mode,
            formation: self.mission.formation(),
            formation_quality: quality,
            weights,
            behavior_force: out.behavior_force,
            emergency_force: out.emergency_force,
            net_force: out.net_force,
            command: out.command,
            epsilon: self.tuning.epsilon(),
            tuned,
            formation_change,
            mode_change,
        }
    }

    fn log_status(&self, step: u64, neighbors: &[Agent], obstacles: &[Obstacle], quality: f64, force: Vec2) {
        let m = &self.config.mission;
        if m.status_interval > 0 && step % m.status_interval == 0 {
            tracing::info!(
                robot = %self.name,
                step,
                neighbors = neighbors.len(),
                obstacles = obstacles.len(),
                mode = %self.mission.mode(),
                formation = %self.mission.formation(),
                "status: quality {:.2}, force ({:.2}, {:.2})",
                quality,
                force.x,
                force.y
            );
        }
        if m.summary_interval > 0 && step % m.summary_interval == 0 {
            tracing::info!(robot = %self.name, step, "performance summary: {}", self.metrics);
        }
    }
}

impl ChuhaComponent for SwarmController {
    fn name(&self) -> &str {
        &self.name
    }
}
