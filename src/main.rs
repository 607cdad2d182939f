//! Asteroid Dodge headless driver
//!
//! Runs a session at 60 Hz with a simple autopilot steering the ship, logs
//! every event and prints the final snapshot as JSON.
//!
//! Usage: `asteroid-dodge [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Dodge (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use asteroid_dodge::GameConfig;
    use asteroid_dodge::sim::{GameEvent, GameSession, SessionState, SpatialEntity};

    /// Frame step (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this many seconds even if the ship survives
    const MAX_RUN_SECONDS: f32 = 120.0;
    /// Autopilot re-targets this often
    const STEER_INTERVAL_TICKS: u64 = 15;
    /// Candidate rows the autopilot considers
    const STEER_ROWS: usize = 12;
    /// How far ahead of the ship the autopilot looks
    const LOOKAHEAD: f32 = 300.0;

    const DEFAULT_SEED: u64 = 0x5EED;

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);

        let config = match args.next() {
            Some(path) => {
                log::info!("Loading config from {}", path);
                GameConfig::from_json(&std::fs::read_to_string(&path)?)?
            }
            None => GameConfig::default(),
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => DEFAULT_SEED,
        };

        let mut session = GameSession::new(config, seed)?;
        let max_ticks = (MAX_RUN_SECONDS / FRAME_DT) as u64;

        for tick in 0..max_ticks {
            if tick % STEER_INTERVAL_TICKS == 0 {
                let (x, y) = steer(&session);
                session.set_player_target(x, y)?;
            }

            for event in session.tick(FRAME_DT)? {
                match event {
                    GameEvent::Collision {
                        obstacle_id,
                        hits,
                        shake_duration,
                        ..
                    } => log::info!(
                        "Hit by {} ({} total), shake {:.1}s",
                        obstacle_id,
                        hits,
                        shake_duration
                    ),
                    GameEvent::GameOver { reason } => log::info!("Game over: {:?}", reason),
                    other => log::trace!("{:?}", other),
                }
            }

            if session.state() == SessionState::GameOver {
                break;
            }
        }

        let snapshot = session.snapshot();
        log::info!(
            "Finished after {:.2}s: score {}, hits {}",
            snapshot.elapsed,
            snapshot.score,
            snapshot.hit_count
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }

    /// Pick the row farthest from every obstacle approaching the ship
    fn steer(session: &GameSession) -> (f32, f32) {
        let config = session.config();
        let player_x = session
            .entity(session.player_id())
            .map(|p| p.pos.x)
            .unwrap_or_else(|_| config.player_start_position().x);

        let threats: Vec<&SpatialEntity> = session
            .entities()
            .obstacles()
            .filter(|o| o.pos.x > player_x - o.size.x && o.pos.x < player_x + LOOKAHEAD)
            .collect();

        let margin = config.player_size.y * 0.5;
        let span = config.field_height - 2.0 * margin;
        let best_y = (0..STEER_ROWS)
            .map(|i| margin + span * i as f32 / (STEER_ROWS - 1) as f32)
            .max_by(|&a, &b| {
                clearance(&threats, a)
                    .partial_cmp(&clearance(&threats, b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(config.field_height * 0.5);

        (player_x, best_y)
    }

    fn clearance(threats: &[&SpatialEntity], y: f32) -> f32 {
        threats
            .iter()
            .map(|o| (o.pos.y - y).abs())
            .fold(f32::INFINITY, f32::min)
    }

}
