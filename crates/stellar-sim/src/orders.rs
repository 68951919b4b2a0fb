//! Player order handlers.
//!
//! Each handler validates against the current world, then mutates it. A
//! rejected order leaves the world untouched.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use stellar_core::commands::PlayerCommand;
use stellar_core::constants::*;
use stellar_core::enums::*;
use stellar_core::error::CommandError;
use stellar_core::events::{Journal, SimEvent};
use stellar_core::types::*;
use stellar_core::world::{Cost, MovingFleet, Outpost, Ship, StarSystem, WorldState};

use crate::scheduler::{ScheduledEvent, Scheduler};
use crate::systems::agents::damage_ship;

const SYSTEM_UPGRADE_COST: Cost = Cost::new(100, 50);
const OUTPOST_BUILD_COST: Cost = Cost::new(150, 100);
const SHIP_MOVE_COST: Cost = Cost::new(SHIP_MOVE_ENERGY, 0);

fn outpost_upgrade_cost(level: u8) -> Cost {
    let level = u32::from(level);
    Cost::new(100 * level, 75 * level)
}

/// Mutable view of the engine state an order may touch.
pub struct OrderContext<'a> {
    pub world: &'a mut WorldState,
    pub scheduler: &'a mut Scheduler,
    pub rng: &'a mut ChaCha8Rng,
    pub journal: &'a mut Journal,
    pub now_ms: f64,
    pub fleet_speed: f64,
}

impl OrderContext<'_> {
    /// Apply one world-changing order. Clock controls are the engine's and
    /// pass through as no-ops.
    pub fn apply(&mut self, command: &PlayerCommand) -> Result<(), CommandError> {
        match *command {
            PlayerCommand::DispatchShip {
                ship_id,
                destination,
            } => self.dispatch_ship(ship_id, destination).map(|_| ()),
            PlayerCommand::RedirectFleet {
                fleet_id,
                destination,
            } => self.redirect_fleet(fleet_id, destination),
            PlayerCommand::MoveShip { ship_id, system_id } => self.move_ship(ship_id, system_id),
            PlayerCommand::BuildShip { class } => self.build_ship(class).map(|_| ()),
            PlayerCommand::DismantleShip { ship_id } => self.dismantle_ship(ship_id),
            PlayerCommand::Colonize {
                system_id,
                ref ship_ids,
            } => self.colonize(system_id, ship_ids),
            PlayerCommand::AssaultSystem { system_id } => self.assault(system_id).map(|_| ()),
            PlayerCommand::UpgradeSystem { system_id } => self.upgrade_system(system_id),
            PlayerCommand::PlaceOutpost { position } => {
                self.place_outpost(position).map(|_| ())
            }
            PlayerCommand::BuildOutpost { system_id } => {
                self.build_outpost(system_id).map(|_| ())
            }
            PlayerCommand::UpgradeOutpost { outpost_id } => self.upgrade_outpost(outpost_id),
            PlayerCommand::RepairOutpost { outpost_id } => self.repair_outpost(outpost_id),
            PlayerCommand::DemolishOutpost { outpost_id } => self.demolish_outpost(outpost_id),
            PlayerCommand::SetTimeScale { .. } | PlayerCommand::Pause | PlayerCommand::Resume => {
                Ok(())
            }
        }
    }

    // --- Fleets ---

    /// Launch a docked ship as a patrol fleet. Returns the fleet id.
    pub fn dispatch_ship(
        &mut self,
        ship_id: ShipId,
        destination: Point,
    ) -> Result<FleetId, CommandError> {
        if !destination.is_finite() {
            return Err(CommandError::InvalidDestination);
        }
        let ship = docked_player_ship(self.world, ship_id)?;
        let origin = self
            .world
            .system(ship.system_id)
            .map(|s| s.position)
            .ok_or(CommandError::UnknownSystem(ship.system_id))?;

        let mut fleet = MovingFleet::new(
            0,
            ship.class,
            Owner::Player,
            origin,
            destination,
            self.fleet_speed,
        );
        fleet.hp = Some(ship.hp);
        fleet.attack = Some(ship.attack);
        fleet.ship_id = Some(ship.id);
        let class = ship.class;
        let fleet_id = self.world.add_fleet(fleet);
        if let Some(ship) = self.world.ship_mut(ship_id) {
            ship.status = ShipStatus::Deployed;
        }

        info!(ship_id, fleet_id, "Ship dispatched");
        self.journal.note(format!(
            "{class:?} dispatched toward ({:.0}, {:.0})",
            destination.x, destination.y
        ));
        Ok(fleet_id)
    }

    pub fn redirect_fleet(
        &mut self,
        fleet_id: FleetId,
        destination: Point,
    ) -> Result<(), CommandError> {
        if !destination.is_finite() {
            return Err(CommandError::InvalidDestination);
        }
        let fleet = self
            .world
            .fleet_mut(fleet_id)
            .ok_or(CommandError::UnknownFleet(fleet_id))?;
        if fleet.owner != Owner::Player {
            return Err(CommandError::NotOwned(format!("fleet {fleet_id}")));
        }
        fleet.redirect(destination);
        self.journal.note(format!("Fleet {fleet_id} redirected"));
        Ok(())
    }

    /// Start a system-to-system hop. Docking happens when the scheduled
    /// arrival fires.
    pub fn move_ship(&mut self, ship_id: ShipId, system_id: SystemId) -> Result<(), CommandError> {
        let ship = docked_player_ship(self.world, ship_id)?;
        if ship.system_id == system_id {
            return Err(CommandError::SameSystem(ship_id, system_id));
        }
        let name = self
            .world
            .system(system_id)
            .map(|s| s.name.clone())
            .ok_or(CommandError::UnknownSystem(system_id))?;
        spend(self.world, SHIP_MOVE_COST)?;

        if let Some(ship) = self.world.ship_mut(ship_id) {
            ship.status = ShipStatus::InTransit;
        }
        self.scheduler.schedule(
            self.now_ms + SHIP_MOVE_DELAY_MS,
            ScheduledEvent::ShipArrival { ship_id, system_id },
        );
        self.journal.note(format!("Ship {ship_id} moving to {name}"));
        Ok(())
    }

    // --- Shipyard ---

    /// Build a ship of `class`. It docks at the first player system, which
    /// is the home system while it stands.
    pub fn build_ship(&mut self, class: ShipClass) -> Result<ShipId, CommandError> {
        let (system_id, name) = self
            .world
            .systems
            .iter()
            .find(|s| s.owner == Owner::Player)
            .map(|s| (s.id, s.name.clone()))
            .ok_or(CommandError::NoShipyard)?;
        spend(self.world, class.build_cost())?;
        let ship_id = self.world.add_ship(class, Owner::Player, system_id);
        info!(ship_id, ?class, system_id, "Ship built");
        self.journal.note(format!("{class:?} built at {name}"));
        Ok(ship_id)
    }

    /// Scrap a docked ship, recovering part of its build cost.
    pub fn dismantle_ship(&mut self, ship_id: ShipId) -> Result<(), CommandError> {
        let ship = docked_player_ship(self.world, ship_id)?;
        let (energy, materials) = ship.class.salvage();
        self.world.remove_ship(ship_id);
        self.world.treasury.refund(energy, materials);
        info!(ship_id, energy, materials, "Ship dismantled");
        self.journal.note(format!(
            "{:?} dismantled for {energy} energy and {materials} materials",
            ship.class
        ));
        Ok(())
    }

    // --- Systems ---

    /// Send docked ships toward a system: colonize when neutral, attack
    /// otherwise.
    pub fn colonize(
        &mut self,
        system_id: SystemId,
        ship_ids: &[ShipId],
    ) -> Result<(), CommandError> {
        let system = self
            .world
            .system(system_id)
            .ok_or(CommandError::UnknownSystem(system_id))?;
        if system.owner == Owner::Player {
            return Err(CommandError::AlreadyOwned(system_id));
        }
        if ship_ids.is_empty() {
            return Err(CommandError::NoShipsPresent(system_id));
        }
        let mission = if system.owner == Owner::Neutral {
            FleetMission::Colonize { system: system_id }
        } else {
            FleetMission::Attack {
                target: TargetRef::System(system_id),
            }
        };
        let (destination, name) = (system.position, system.name.clone());

        let mut fleet_ships: Vec<ShipId> = Vec::with_capacity(ship_ids.len());
        for &ship_id in ship_ids {
            if !fleet_ships.contains(&ship_id) {
                docked_player_ship(self.world, ship_id)?;
                fleet_ships.push(ship_id);
            }
        }
        for &ship_id in &fleet_ships {
            let fleet_id = self.dispatch_ship(ship_id, destination)?;
            if let Some(fleet) = self.world.fleet_mut(fleet_id) {
                fleet.mission = mission;
            }
        }
        self.journal.note(format!("{} ships sent to {name}", fleet_ships.len()));
        Ok(())
    }

    /// Instant assault with the player ships docked at a system. Returns
    /// true when the system fell.
    pub fn assault(&mut self, system_id: SystemId) -> Result<bool, CommandError> {
        let system = self
            .world
            .system(system_id)
            .ok_or(CommandError::UnknownSystem(system_id))?;
        if system.owner == Owner::Player {
            return Err(CommandError::AlreadyOwned(system_id));
        }
        let defense = f64::from(system.defense) + f64::from(system.population) / 10.0;

        let ships: Vec<ShipId> = self
            .world
            .ships
            .iter()
            .filter(|s| s.owner == Owner::Player && s.system_id == system_id && s.is_docked())
            .map(|s| s.id)
            .collect();
        if ships.is_empty() {
            return Err(CommandError::NoShipsPresent(system_id));
        }
        let attack: f64 = ships
            .iter()
            .filter_map(|&id| self.world.ship(id))
            .map(|s| s.attack)
            .sum();

        if attack > defense {
            let Some(system) = self.world.system_mut(system_id) else {
                return Err(CommandError::UnknownSystem(system_id));
            };
            system.owner = Owner::Player;
            system.population =
                (f64::from(system.population) * CONQUEST_POPULATION_FACTOR).floor() as u32;
            info!(system_id, attack, defense, "Assault succeeded");
            self.journal.note(format!("{} conquered", system.name));
            self.journal.emit(SimEvent::SystemConquered {
                system_id,
                owner: Owner::Player,
            });
            return Ok(true);
        }

        info!(system_id, attack, defense, "Assault repelled");
        self.journal.note("Assault repelled");
        for ship_id in ships {
            let damage = self
                .rng
                .gen_range(ASSAULT_REPEL_DAMAGE_MIN..=ASSAULT_REPEL_DAMAGE_MAX);
            damage_ship(self.world, self.journal, ship_id, f64::from(damage));
        }
        Ok(false)
    }

    pub fn upgrade_system(&mut self, system_id: SystemId) -> Result<(), CommandError> {
        let system = player_system(self.world, system_id)?;
        if system.development >= SYSTEM_MAX_DEVELOPMENT {
            return Err(CommandError::MaxDevelopment(system_id));
        }
        spend(self.world, SYSTEM_UPGRADE_COST)?;
        if let Some(system) = self.world.system_mut(system_id) {
            system.development += 1;
            system.defense += SYSTEM_UPGRADE_DEFENSE;
            system.population += SYSTEM_UPGRADE_POPULATION;
            self.journal.note(format!(
                "{} upgraded to development {}",
                system.name, system.development
            ));
        }
        Ok(())
    }

    // --- Outposts ---

    /// Build a free-standing level 1 outpost.
    pub fn place_outpost(&mut self, position: Point) -> Result<OutpostId, CommandError> {
        let bounds = self.world.bounds;
        let inside = position.is_finite()
            && (0.0..=bounds.width).contains(&position.x)
            && (0.0..=bounds.height).contains(&position.y);
        if !inside {
            return Err(CommandError::InvalidDestination);
        }
        if !self.world.is_free_site(position, OUTPOST_MIN_SPACING) {
            return Err(CommandError::SiteOccupied);
        }
        spend(self.world, OUTPOST_BUILD_COST)?;
        let id = self
            .world
            .add_outpost(position, Owner::Player, OUTPOST_MIN_LEVEL, None);
        self.journal.note(format!(
            "Outpost established at ({:.0}, {:.0})",
            position.x, position.y
        ));
        Ok(id)
    }

    /// Build a level 1 outpost linked to a player system.
    pub fn build_outpost(&mut self, system_id: SystemId) -> Result<OutpostId, CommandError> {
        let system = player_system(self.world, system_id)?;
        if system.outpost_level.is_some() {
            return Err(CommandError::AlreadyHasOutpost(system_id));
        }
        let (position, name) = (system.position, system.name.clone());
        spend(self.world, OUTPOST_BUILD_COST)?;
        let id = self
            .world
            .add_outpost(position, Owner::Player, OUTPOST_MIN_LEVEL, Some(system_id));
        self.journal.note(format!("Outpost built at {name}"));
        Ok(id)
    }

    pub fn upgrade_outpost(&mut self, outpost_id: OutpostId) -> Result<(), CommandError> {
        let outpost = player_outpost(self.world, outpost_id)?;
        if outpost.is_max_level() {
            return Err(CommandError::MaxLevel(outpost_id));
        }
        spend(self.world, outpost_upgrade_cost(outpost.level))?;

        let Some(outpost) = self.world.outpost_mut(outpost_id) else {
            return Err(CommandError::UnknownOutpost(outpost_id));
        };
        outpost.level_up();
        let (level, system_id) = (outpost.level, outpost.system_id);
        if let Some(system) = system_id.and_then(|id| self.world.system_mut(id)) {
            system.outpost_level = Some(level);
        }
        self.journal
            .note(format!("Outpost {outpost_id} upgraded to level {level}"));
        Ok(())
    }

    pub fn repair_outpost(&mut self, outpost_id: OutpostId) -> Result<(), CommandError> {
        player_outpost(self.world, outpost_id)?;
        if let Some(outpost) = self.world.outpost_mut(outpost_id) {
            outpost.health = OUTPOST_MAX_HEALTH;
        }
        self.journal.note(format!("Outpost {outpost_id} repaired"));
        Ok(())
    }

    pub fn demolish_outpost(&mut self, outpost_id: OutpostId) -> Result<(), CommandError> {
        player_outpost(self.world, outpost_id)?;
        self.world.remove_outpost(outpost_id);
        self.journal.note(format!("Outpost {outpost_id} demolished"));
        Ok(())
    }
}

/// Dock a hopping ship at its new system. Does nothing when the ship is
/// gone, no longer in transit or the system vanished.
pub fn complete_ship_move(
    world: &mut WorldState,
    journal: &mut Journal,
    ship_id: ShipId,
    system_id: SystemId,
) -> bool {
    let Some(name) = world.system(system_id).map(|s| s.name.clone()) else {
        return false;
    };
    let Some(ship) = world.ship_mut(ship_id) else {
        return false;
    };
    if ship.status != ShipStatus::InTransit {
        return false;
    }
    ship.system_id = system_id;
    ship.status = ShipStatus::Docked;
    journal.note(format!("Ship {ship_id} arrived at {name}"));
    journal.emit(SimEvent::ShipDocked { ship_id, system_id });
    true
}

// --- Validation helpers ---

fn docked_player_ship(world: &WorldState, ship_id: ShipId) -> Result<Ship, CommandError> {
    let ship = world
        .ship(ship_id)
        .ok_or(CommandError::UnknownShip(ship_id))?;
    if ship.owner != Owner::Player {
        return Err(CommandError::NotOwned(format!("ship {ship_id}")));
    }
    if !ship.is_docked() {
        return Err(CommandError::ShipUnavailable(ship_id));
    }
    Ok(ship.clone())
}

fn player_system(world: &WorldState, system_id: SystemId) -> Result<&StarSystem, CommandError> {
    let system = world
        .system(system_id)
        .ok_or(CommandError::UnknownSystem(system_id))?;
    if system.owner != Owner::Player {
        return Err(CommandError::NotOwned(system.name.clone()));
    }
    Ok(system)
}

fn player_outpost(world: &WorldState, outpost_id: OutpostId) -> Result<Outpost, CommandError> {
    let outpost = world
        .outpost(outpost_id)
        .ok_or(CommandError::UnknownOutpost(outpost_id))?;
    if outpost.owner != Owner::Player {
        return Err(CommandError::NotOwned(format!("outpost {outpost_id}")));
    }
    Ok(outpost.clone())
}

fn spend(world: &mut WorldState, cost: Cost) -> Result<(), CommandError> {
    if world.treasury.try_spend(cost) {
        Ok(())
    } else {
        Err(CommandError::InsufficientResources {
            energy: cost.energy,
            materials: cost.materials,
            crystals: cost.crystals,
        })
    }
}
