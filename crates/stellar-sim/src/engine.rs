//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the galaxy world, the hecs world holding AI
//! agents, the scheduler and the RNG. It processes player commands, runs
//! all systems and produces `GalaxySnapshot`s. Completely headless, so
//! runs are deterministic for a given seed and input sequence.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use stellar_core::commands::PlayerCommand;
use stellar_core::components::Position;
use stellar_core::constants::MAX_AI_STEPS_PER_TICK;
use stellar_core::error::CommandError;
use stellar_core::events::{Journal, LogBook, SimEvent};
use stellar_core::state::GalaxySnapshot;
use stellar_core::types::{AgentId, Point, SimTime, SystemId};
use stellar_core::world::WorldState;

use crate::config::{ConfigError, SimConfig};
use crate::galaxy;
use crate::orders::{self, OrderContext};
use crate::scheduler::{ScheduledEvent, Scheduler};
use crate::systems;

const MAX_TIME_SCALE: f64 = 4.0;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: WorldState,
    agents: World,
    time: SimTime,
    /// Simulated time up to which AI steps have run (ms).
    ai_clock_ms: f64,
    paused: bool,
    time_scale: f64,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    journal: Journal,
    command_queue: VecDeque<PlayerCommand>,
    next_agent_id: AgentId,
}

impl SimulationEngine {
    /// Create an engine with a freshly generated galaxy and agent
    /// population.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration is out of
    /// range.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = galaxy::generate(&config, &mut rng);
        let mut engine = Self::assemble(config, world, rng);
        engine.populate_agents();
        engine.scheduler.schedule(
            engine.config.pirate_respawn_ms,
            ScheduledEvent::PirateSweep,
        );
        engine
            .scheduler
            .schedule(engine.config.raid_interval_ms, ScheduledEvent::EnemyRaid);
        engine
            .journal
            .note(format!("Welcome to {}", galaxy::HOME_SYSTEM_NAME));
        info!(
            seed = engine.config.seed,
            systems = engine.world.systems.len(),
            agents = engine.agents.len(),
            "Simulation started"
        );
        Ok(engine)
    }

    /// Create an engine around a hand-built world. No agents are spawned
    /// and no recurring events are armed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration is out of
    /// range.
    pub fn with_world(config: SimConfig, world: WorldState) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, world, rng))
    }

    fn assemble(config: SimConfig, world: WorldState, rng: ChaCha8Rng) -> Self {
        Self {
            time_scale: config.time_scale,
            config,
            world,
            agents: World::new(),
            time: SimTime::default(),
            ai_clock_ms: 0.0,
            paused: false,
            rng,
            scheduler: Scheduler::default(),
            journal: Journal::default(),
            command_queue: VecDeque::new(),
            next_agent_id: 1,
        }
    }

    /// Spawn the configured pirates plus defenders for every enemy system.
    pub fn populate_agents(&mut self) {
        self.next_agent_id = galaxy::populate_agents(
            &mut self.agents,
            &self.world,
            &mut self.rng,
            self.next_agent_id,
            self.config.max_pirates,
            self.config.max_defenders_per_system,
        );
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately. A rejected command leaves the world
    /// untouched, writes a log line and returns false.
    pub fn execute(&mut self, command: PlayerCommand) -> bool {
        match self.apply(&command) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, ?command, "Command rejected");
                self.journal.note(format!("Order failed: {err}"));
                self.journal.emit(SimEvent::CommandRejected {
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    fn apply(&mut self, command: &PlayerCommand) -> Result<(), CommandError> {
        match *command {
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
                Ok(())
            }
            PlayerCommand::Pause => {
                self.paused = true;
                Ok(())
            }
            PlayerCommand::Resume => {
                self.paused = false;
                Ok(())
            }
            _ => OrderContext {
                world: &mut self.world,
                scheduler: &mut self.scheduler,
                rng: &mut self.rng,
                journal: &mut self.journal,
                now_ms: self.time.now_ms(),
                fleet_speed: self.config.fleet_speed,
            }
            .apply(command),
        }
    }

    /// Advance the simulation by `dt_secs` of wall time and return the
    /// resulting snapshot.
    pub fn tick(&mut self, dt_secs: f64) -> GalaxySnapshot {
        self.process_commands();

        if !self.paused {
            let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
                dt_secs * self.time_scale
            } else {
                0.0
            };
            self.run_systems(dt);
        }

        self.snapshot()
    }

    /// Snapshot of the current state. Pending events move into it.
    pub fn snapshot(&mut self) -> GalaxySnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.agents,
            &self.time,
            self.paused,
            self.time_scale,
            &mut self.journal,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable world access for scenario setup.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Read-only reference to the agent ECS world.
    pub fn agents(&self) -> &World {
        &self.agents
    }

    pub fn log(&self) -> &LogBook {
        &self.journal.log
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Spawn one pirate and move it to `position`. Returns its id.
    pub fn spawn_pirate_at(&mut self, position: Point) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        let bounds = self.world.bounds;
        let entity = galaxy::spawn_pirate(&mut self.agents, &mut self.rng, &bounds, id);
        if let Ok(mut pos) = self.agents.get::<&mut Position>(entity) {
            pos.0 = position;
        }
        id
    }

    /// Spawn one defender orbiting system `home`. Returns its id, or `None`
    /// when the system does not exist.
    pub fn spawn_defender(&mut self, home: SystemId) -> Option<AgentId> {
        let center = self.world.system(home)?.position;
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        galaxy::spawn_defender(&mut self.agents, &mut self.rng, home, center, id);
        Some(id)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.execute(command);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_secs: f64) {
        self.time.advance(dt_secs);
        let now_ms = self.time.now_ms();

        // 1. Fleet movement with mid-flight and arrival triggers
        systems::movement::run(
            &mut self.world,
            &mut self.rng,
            &mut self.journal,
            now_ms,
            dt_secs,
        );
        // 2. Area triggers around player territory
        systems::triggers::area(&mut self.world, &mut self.rng, &mut self.journal, now_ms);
        // 3. Conflict progress and resolution
        systems::battle::run(&mut self.world, &mut self.rng, &mut self.journal, now_ms);
        // 4. AI steps on a fixed interval
        self.run_ai(now_ms);
        // 5. Scheduled effects
        self.process_scheduled(now_ms);
    }

    /// Run the AI steps owed up to `now_ms`, at most
    /// `MAX_AI_STEPS_PER_TICK` of them. Steps past the cap are skipped.
    fn run_ai(&mut self, now_ms: f64) {
        let tick = self.config.ai_tick_ms;
        let mut steps = 0;
        while self.ai_clock_ms + tick <= now_ms {
            if steps == MAX_AI_STEPS_PER_TICK {
                let skipped = ((now_ms - self.ai_clock_ms) / tick).floor();
                self.ai_clock_ms += skipped * tick;
                warn!(skipped, "AI backlog dropped");
                break;
            }
            steps += 1;
            self.ai_clock_ms += tick;
            systems::agents::run(
                &mut self.agents,
                &mut self.world,
                &mut self.rng,
                &mut self.journal,
                self.ai_clock_ms,
            );
        }
    }

    fn process_scheduled(&mut self, now_ms: f64) {
        while let Some(event) = self.scheduler.pop_due(now_ms) {
            match event {
                ScheduledEvent::ShipArrival { ship_id, system_id } => {
                    let docked = orders::complete_ship_move(
                        &mut self.world,
                        &mut self.journal,
                        ship_id,
                        system_id,
                    );
                    if !docked {
                        debug!(ship_id, system_id, "Stale ship arrival dropped");
                    }
                }
                ScheduledEvent::PirateSweep => {
                    systems::population::replenish_pirates(
                        &mut self.agents,
                        &mut self.rng,
                        &self.world.bounds,
                        &mut self.journal,
                        &mut self.next_agent_id,
                        self.config.max_pirates,
                    );
                    self.scheduler.schedule(
                        now_ms + self.config.pirate_respawn_ms,
                        ScheduledEvent::PirateSweep,
                    );
                }
                ScheduledEvent::EnemyRaid => {
                    systems::raids::launch_raid(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.journal,
                        self.config.raid_chance,
                        self.config.fleet_speed,
                    );
                    self.scheduler
                        .schedule(now_ms + self.config.raid_interval_ms, ScheduledEvent::EnemyRaid);
                }
            }
        }
    }
}
