//! Testes integrados para chuha-swarm

use crate::*;
use chuha_actuator::DifferentialDrive;
use chuha_core::prelude::*;
use std::f64::consts::TAU;
use std::sync::{Arc, Mutex};

fn controller(name: &str) -> SwarmController {
    SwarmController::new(name, SwarmConfig::default()).unwrap()
}

fn ring(n: usize, radius: f64) -> Vec<Agent> {
    (0..n)
        .map(|i| {
            let theta = i as f64 * TAU / n as f64 + 0.3;
            Agent::observed(format!("neighbor_{}", i), Vec2::from_polar(radius, theta))
        })
        .collect()
}

#[derive(Debug)]
struct DeadLidar;

impl ChuhaComponent for DeadLidar {
    fn name(&self) -> &str {
        "dead lidar"
    }
}

impl RangeSensor for DeadLidar {
    fn read(&mut self) -> Result<RangeScan, SensorError> {
        Err(SensorError::Unavailable("unplugged".into()))
    }
}

#[derive(Debug, Clone, Default)]
struct Recorder {
    frames: Arc<Mutex<Vec<SwarmFrame>>>,
}

impl VisualizationSink for Recorder {
    fn render(&mut self, frame: &SwarmFrame) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CENÁRIOS DE PASSO
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_close_neighbor_pushes_away_and_counts_collision() {
    let mut c = controller("chuha_1");
    let neighbor = Agent::observed("neighbor_0", Vec2::new(0.05, 0.0));
    let report = c.step_observed(vec![neighbor], vec![]);

    assert!(report.behavior_force.x < 0.0);
    assert!(report.emergency_force.x < 0.0);
    assert!(report.net_force.x < 0.0);
    assert!((c.metrics().collision_count - 0.1).abs() < 1e-12);
}

#[test]
fn test_near_collision_escapes_despite_cohesion_and_formation() {
    let mut c = controller("chuha_1");
    c.switch_mode(MissionMode::Formation);
    let neighbors = vec![
        Agent::observed("neighbor_0", Vec2::new(0.07, 0.0)),
        Agent::observed("neighbor_1", Vec2::new(0.4, 0.05)),
        Agent::observed("neighbor_2", Vec2::new(0.45, -0.05)),
    ];
    let report = c.step_observed(neighbors, vec![]);

    // Coesão e formação puxam para +x, na direção do vizinho a 7 cm
    assert!(report.weights.cohesion >= 1.8);
    assert!(report.weights.formation >= 2.5);
    assert!(report.emergency_force.x < 0.0);
    assert!(report.net_force.x < 0.0);
    assert!((c.metrics().collision_count - 0.1).abs() < 1e-12);

    let report = c.step_observed(
        vec![Agent::observed("neighbor_0", Vec2::new(0.3, 0.0))],
        vec![],
    );
    assert!(report.emergency_force.is_zero());
    assert!((c.metrics().collision_count - 0.1).abs() < 1e-12);
}

#[test]
fn test_exploration_switches_to_formation_at_1300() {
    let mut c = controller("chuha_1");
    let neighbors = ring(3, 0.3);

    for _ in 0..1299 {
        let report = c.step_observed(neighbors.clone(), vec![]);
        assert!(report.mode_change.is_none(), "early switch at {}", report.step);
        assert_eq!(report.mode, MissionMode::Exploration);
    }
    let report = c.step_observed(neighbors, vec![]);
    assert_eq!(report.step, 1300);
    assert_eq!(report.mode_change.map(|m| m.to), Some(MissionMode::Formation));
    assert_eq!(c.mode(), MissionMode::Formation);
}

#[test]
fn test_auto_tune_lowers_epsilon_without_neighbors() {
    let mut c = controller("chuha_1");
    assert!((c.epsilon() - 0.6).abs() < 1e-12);

    for _ in 0..199 {
        assert!(c.step(None).tuned.is_none());
    }
    let report = c.step(None);
    assert!(report.tuned.is_some());
    assert!((c.epsilon() - 0.5).abs() < 1e-9);

    for _ in 0..1000 {
        c.step(None);
    }
    assert!((c.epsilon() - 0.3).abs() < 1e-9);
}

#[test]
fn test_auto_tune_raises_epsilon_when_crowded() {
    let mut c = controller("chuha_1");
    let crowd = ring(6, 0.4);
    for _ in 0..200 {
        c.step_observed(crowd.clone(), vec![]);
    }
    assert!((c.epsilon() - 0.7).abs() < 1e-9);
}

#[test]
fn test_sensor_failure_degrades_to_empty_perception() {
    let mut c = controller("chuha_1");
    let mut lidar = DeadLidar;
    let report = c.step_with_sensor(&mut lidar);

    assert!(report.neighbors.is_empty());
    assert!(report.obstacles.is_empty());
    assert!(report.command.is_finite());
    assert_eq!(c.tracker().history().len(), 1);
}

#[test]
fn test_scan_pipeline_detects_robots_and_wall() {
    let mut c = controller("chuha_1");
    let cal = Calibration::default();
    let mut scan = RangeScan::ambient(&cal, 512);
    scan.paint_disc(Vec2::new(0.3, 0.0), 0.035);
    scan.paint_disc(Vec2::new(-0.25, 0.1), 0.035);
    scan.paint_disc(Vec2::new(0.0, -0.4), 0.06);

    let report = c.step(Some(&scan));
    // A parede em (0, −0.4) também está perto o suficiente para ser vizinho
    assert!(report.neighbor_count() >= 2);
    for o in &report.obstacles {
        for n in &report.neighbors {
            assert!(o.position.distance_to(&n.position) >= 0.1);
        }
    }
    assert!(report.command.peak() <= 60.0 + 1e-9);
}

#[test]
fn test_formation_type_adapts_to_neighbor_count() {
    let mut c = controller("chuha_1");
    let report = c.step_observed(ring(2, 0.3), vec![]);
    assert_eq!(report.formation_change, Some(FormationType::Line));
    assert_eq!(report.formation_quality, 0.5);

    let report = c.step_observed(ring(5, 0.3), vec![]);
    assert_eq!(report.formation_change, Some(FormationType::Circle));
    assert!(report.formation_quality > 0.99);
    assert_eq!(c.metrics().time_in_formation, 1.0);
}

#[test]
fn test_weights_use_formation_type_before_adaptation() {
    let mut c = controller("chuha_1");
    c.switch_mode(MissionMode::Formation);
    // Círculo perfeito, mas o tipo ainda é linha: qualidade 0.5 → ajustes
    c.step_observed(ring(2, 0.3), vec![]);
    let report = c.step_observed(ring(4, 0.3), vec![]);
    assert_eq!(report.weights.alignment, 2.5);
    assert_eq!(report.formation, FormationType::Circle);
    assert!(report.formation_quality > 0.99);
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPRIEDADES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_wheel_commands_never_exceed_max() {
    let mut c = controller("chuha_1");
    for i in 0..300 {
        let theta = i as f64 * 0.37;
        let d = 0.02 + (i % 40) as f64 * 0.012;
        let neighbors = vec![
            Agent::observed("a", Vec2::from_polar(d, theta)),
            Agent::observed("b", Vec2::from_polar(0.3, -theta)),
        ];
        let obstacles = vec![Obstacle::from(Vec2::from_polar(0.05 + d / 2.0, theta + 1.0))];
        let report = c.step_observed(neighbors, obstacles);
        assert!(report.command.peak() <= 60.0 + 1e-9);
    }
}

#[test]
fn test_emergency_never_weakens_command() {
    let weights = BehaviorWeights::only(BehaviorKind::Separation, 1.0);
    let radii = BehaviorRadii::default();
    let quiet = EmergencyConfig {
        neighbor_force: 0.0,
        obstacle_force: 0.0,
        ..EmergencyConfig::default()
    };
    let me = Agent::at_origin("chuha_1");

    for i in 0..36 {
        let theta = i as f64 * TAU / 36.0;
        for d in [0.01, 0.03, 0.05, 0.079] {
            let neighbors = [Agent::observed("n", Vec2::from_polar(d, theta))];
            let set = || BehaviorSet::standard(&radii, FormationType::Circle, &ExplorationConfig::default());
            let mut with = WeightedAggregator::new(set(), EmergencyConfig::default(), 60.0, 0.7);
            let mut without = WeightedAggregator::new(set(), quiet, 60.0, 0.7);

            let a = with.step(&me, &neighbors, &[], &weights);
            let b = without.step(&me, &neighbors, &[], &weights);
            assert!(b.net_force.length() > 0.0);
            assert!(a.raw_command.peak() >= b.raw_command.peak() - 1e-9);
            assert!(DifferentialDrive::speed(a.net_force) >= DifferentialDrive::speed(b.net_force));
        }
    }
}

#[test]
fn test_same_inputs_same_outputs() {
    let mut a = controller("chuha_1");
    let mut b = controller("chuha_1");
    for i in 0..100 {
        let neighbors = ring(1 + i % 5, 0.2 + (i % 7) as f64 * 0.03);
        let ra = a.step_observed(neighbors.clone(), vec![]);
        let rb = b.step_observed(neighbors, vec![]);
        assert_eq!(ra.command, rb.command);
    }
}

#[test]
fn test_visualization_sink_is_optional() {
    let recorder = Recorder::default();
    let frames = recorder.frames.clone();

    let mut plain = controller("chuha_1");
    let mut drawn = controller("chuha_1");
    drawn.set_visualization(Box::new(recorder));

    for i in 0..20 {
        let neighbors = ring(3, 0.25 + i as f64 * 0.005);
        let obstacles = vec![Obstacle::new(0.0, 0.15)];
        let a = plain.step_observed(neighbors.clone(), obstacles.clone());
        let b = drawn.step_observed(neighbors, obstacles);
        assert_eq!(a.command, b.command);
    }

    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 20);
    assert_eq!(frames[0].step, 1);
    assert_eq!(frames[0].neighbors.len(), 3);
    assert_eq!(frames[0].obstacles, vec![Vec2::new(0.0, 0.15)]);
    assert_eq!(frames[19].mode, "exploration");
}

// ═══════════════════════════════════════════════════════════════════════════
// MISSÃO / LIDERANÇA / CONFIGURAÇÃO
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_schedule_drives_modes() {
    let mut c = controller("chuha_1");
    c.set_schedule(MissionSchedule::demo());
    let mut seen = Vec::new();
    for _ in 0..2500 {
        let report = c.step_observed(vec![], vec![]);
        if seen.last() != Some(&report.mode) {
            seen.push(report.mode);
        }
    }
    assert_eq!(
        seen,
        vec![
            MissionMode::Exploration,
            MissionMode::Formation,
            MissionMode::Patrol,
            MissionMode::Search,
            MissionMode::Following,
        ]
    );
}

#[test]
fn test_leader_by_name() {
    assert_eq!(controller("chuha_0").role(), Role::Leader);
    assert_eq!(controller("Swarm-Leader").role(), Role::Leader);
    assert_eq!(controller("chuha_3").role(), Role::Follower);
    assert_eq!(controller("chuha_10").role(), Role::Follower);
}

#[test]
fn test_following_pulls_toward_designated_leader() {
    let mut c = controller("chuha_2");
    c.switch_mode(MissionMode::Following);
    c.designate_leader(Some("neighbor_0".into()));

    let cal = Calibration::default();
    let mut scan = RangeScan::ambient(&cal, 512);
    scan.paint_disc(Vec2::new(0.0, -0.3), 0.035);
    scan.paint_disc(Vec2::new(0.35, 0.35), 0.035);

    // Ordem de setor: frente-direita (setor 64) vem antes de trás (setor 384)
    let report = c.step(Some(&scan));
    assert_eq!(report.neighbor_count(), 2);
    let leader = report.neighbors.iter().find(|n| n.is_leader()).unwrap();
    assert_eq!(leader.id, "neighbor_0");
    assert!(leader.position.x > 0.2);
}

#[test]
fn test_odometry_feeds_distance_metric() {
    let mut c = controller("chuha_1");
    c.set_velocity(Vec2::new(0.0, 0.5));
    for _ in 0..10 {
        c.step(None);
    }
    assert!((c.metrics().distance_traveled - 10.0 * 0.5 * 0.032).abs() < 1e-9);
    assert!((c.metrics().exploration_coverage - 1.0).abs() < 1e-9);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SwarmConfig::default();
    config.smoothing = 0.0;
    assert!(matches!(
        SwarmController::new("chuha_1", config),
        Err(SwarmError::InvalidConfig(_))
    ));
}

#[test]
fn test_out_of_bounds_epsilon_rejected() {
    for epsilon in [2.0, 0.1] {
        let mut config = SwarmConfig::default();
        config.detection.epsilon = epsilon;
        assert!(matches!(
            SwarmController::new("chuha_1", config),
            Err(SwarmError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_epsilon_stays_within_bounds_from_the_edges() {
    let mut config = SwarmConfig::default();
    config.detection.epsilon = 0.9;
    let mut crowded = SwarmController::new("chuha_1", config).unwrap();
    for _ in 0..400 {
        crowded.step_observed(ring(6, 0.4), vec![]);
        assert!(crowded.epsilon() <= 0.9 + 1e-12);
    }
    assert!((crowded.epsilon() - 0.9).abs() < 1e-12);

    let mut config = SwarmConfig::default();
    config.detection.epsilon = 0.3;
    let mut sparse = SwarmController::new("chuha_1", config).unwrap();
    for _ in 0..400 {
        sparse.step(None);
        assert!(sparse.epsilon() >= 0.3 - 1e-12);
    }
    assert!((sparse.epsilon() - 0.3).abs() < 1e-12);

    let mut config = SwarmConfig::default();
    config.detection.epsilon = 0.9;
    let mut thinning = SwarmController::new("chuha_1", config).unwrap();
    for _ in 0..200 {
        thinning.step(None);
    }
    assert!((thinning.epsilon() - 0.8).abs() < 1e-9);
}

#[test]
fn test_controller_from_toml() {
    let config = SwarmConfig::from_toml_str(
        r#"
        max_velocity = 20.0

        [mission]
        initial_mode = "search"
        initial_formation = "line"
        "#,
    )
    .unwrap();
    let mut c = SwarmController::new("chuha_1", config).unwrap();
    assert_eq!(c.mode(), MissionMode::Search);
    assert_eq!(c.formation(), FormationType::Line);
    assert_eq!(c.name(), "chuha_1");

    let report = c.step_observed(vec![Agent::observed("n", Vec2::new(0.0, 0.04))], vec![]);
    assert!(report.command.peak() <= 20.0 + 1e-9);
}
