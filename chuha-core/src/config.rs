//! Environment configuration loading from .env files
//!
//! Loads override values from `.env` or environment variables. Unset or
//! unparsable variables yield `None` so the caller keeps its own default.
//!
//! | Variável | Tipo | Efeito |
//! |:---------|:-----|:-------|
//! | `CHUHA_MAX_VELOCITY` | f64 | velocidade máxima das rodas (rad/s) |
//! | `CHUHA_TIMESTEP_MS` | u32 | duração do passo de controle |
//! | `CHUHA_EPSILON` | f64 | sensibilidade inicial de detecção |
//! | `CHUHA_EXPLORATION_SEED` | u64 | semente do passeio aleatório |

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

// Automatically load .env when config module is accessed
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

/// Ensure environment is loaded
#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Velocidade máxima das rodas
pub fn max_velocity() -> Option<f64> {
    parsed("CHUHA_MAX_VELOCITY")
}

/// Duração do passo de controle (ms)
pub fn timestep_ms() -> Option<u32> {
    parsed("CHUHA_TIMESTEP_MS")
}

/// Sensibilidade inicial de detecção de vizinhos
pub fn epsilon() -> Option<f64> {
    parsed("CHUHA_EPSILON")
}

/// Semente do gerador do comportamento de exploração
pub fn exploration_seed() -> Option<u64> {
    parsed("CHUHA_EXPLORATION_SEED")
}

/// Cached values
pub static MAX_VELOCITY: Lazy<Option<f64>> = Lazy::new(max_velocity);
pub static TIMESTEP_MS: Lazy<Option<u32>> = Lazy::new(timestep_ms);
pub static EPSILON: Lazy<Option<f64>> = Lazy::new(epsilon);
pub static EXPLORATION_SEED: Lazy<Option<u64>> = Lazy::new(exploration_seed);
