//! The spatial world model: systems, outposts, ships, moving fleets and
//! the treasury, plus the distance queries the trigger logic runs on.
//!
//! Collections are ordered `Vec`s. Storage order is significant: every
//! "first match" scan walks them front to back.

use serde::{Deserialize, Serialize};

use crate::conflict::ConflictBoard;
use crate::constants::*;
use crate::enums::*;
use crate::types::*;

/// A stationary strategic location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub position: Point,
    pub owner: Owner,
    pub population: u32,
    pub resources: u32,
    pub development: u32,
    pub defense: u32,
    pub star_type: StarType,
    /// Level of the linked outpost, if one exists.
    pub outpost_level: Option<u8>,
}

/// A defensive structure with its own radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outpost {
    pub id: OutpostId,
    pub position: Point,
    pub owner: Owner,
    pub level: u8,
    pub health: u32,
    pub defense_radius: f64,
    /// System this outpost was built for.
    pub system_id: Option<SystemId>,
}

impl Outpost {
    pub fn new(
        id: OutpostId,
        position: Point,
        owner: Owner,
        level: u8,
        system_id: Option<SystemId>,
    ) -> Self {
        let level = level.clamp(OUTPOST_MIN_LEVEL, OUTPOST_MAX_LEVEL);
        Self {
            id,
            position,
            owner,
            level,
            health: OUTPOST_MAX_HEALTH,
            defense_radius: Self::radius_for_level(level),
            system_id,
        }
    }

    /// Defense radius at a given level: 150 at level 1, +50 per level.
    pub fn radius_for_level(level: u8) -> f64 {
        OUTPOST_BASE_RADIUS + f64::from(level.saturating_sub(1)) * OUTPOST_RADIUS_PER_LEVEL
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= OUTPOST_MAX_LEVEL
    }

    /// Raise the level by one. Returns false, changing nothing, at max level.
    pub fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;
        self.defense_radius += OUTPOST_RADIUS_PER_LEVEL;
        true
    }
}

/// A location-based unit stationed at a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub class: ShipClass,
    pub owner: Owner,
    pub system_id: SystemId,
    pub hp: f64,
    pub max_hp: f64,
    pub attack: f64,
    pub status: ShipStatus,
}

impl Ship {
    /// A fresh, docked ship with full class stats.
    pub fn new(id: ShipId, class: ShipClass, owner: Owner, system_id: SystemId) -> Self {
        let stats = class.stats();
        Self {
            id,
            class,
            owner,
            system_id,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            status: ShipStatus::Docked,
        }
    }

    pub fn is_docked(&self) -> bool {
        self.status == ShipStatus::Docked
    }
}

/// A fleet in transit between two world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingFleet {
    pub id: FleetId,
    pub class: ShipClass,
    pub hull: HullSize,
    pub owner: Owner,
    pub origin: Point,
    pub destination: Point,
    /// Percent of the leg covered, in [0, 100].
    pub progress: f64,
    /// Units per second.
    pub speed: f64,
    pub position: Point,
    pub mission: FleetMission,
    /// Set when a trigger froze the fleet short of its destination.
    pub intercepted: bool,
    pub hp: Option<f64>,
    pub attack: Option<f64>,
    /// Ship this fleet was dispatched from.
    pub ship_id: Option<ShipId>,
}

impl MovingFleet {
    pub fn new(
        id: FleetId,
        class: ShipClass,
        owner: Owner,
        origin: Point,
        destination: Point,
        speed: f64,
    ) -> Self {
        Self {
            id,
            class,
            hull: class.hull_size(),
            owner,
            origin,
            destination,
            progress: 0.0,
            speed,
            position: origin,
            mission: FleetMission::Patrol,
            intercepted: false,
            hp: None,
            attack: None,
            ship_id: None,
        }
    }

    pub fn total_distance(&self) -> f64 {
        self.origin.distance(self.destination)
    }

    pub fn has_arrived(&self) -> bool {
        self.progress >= PROGRESS_COMPLETE
    }

    /// Stop the fleet at `point`, short of its destination.
    pub fn freeze_at(&mut self, point: Point) {
        self.progress = PROGRESS_COMPLETE;
        self.position = point;
        self.intercepted = true;
    }

    /// Start a new leg from the current position.
    pub fn redirect(&mut self, destination: Point) {
        self.origin = self.position;
        self.destination = destination;
        self.progress = 0.0;
        self.intercepted = false;
        self.mission = FleetMission::Patrol;
    }
}

/// A resource price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub energy: u32,
    pub materials: u32,
    pub crystals: u32,
}

impl Cost {
    pub const fn new(energy: u32, materials: u32) -> Self {
        Self {
            energy,
            materials,
            crystals: 0,
        }
    }

    pub const fn with_crystals(self, crystals: u32) -> Self {
        Self { crystals, ..self }
    }
}

/// Player stockpile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    pub energy: u32,
    pub materials: u32,
    pub crystals: u32,
}

impl Default for Treasury {
    fn default() -> Self {
        Self {
            energy: 1000,
            materials: 500,
            crystals: 100,
        }
    }
}

impl Treasury {
    pub fn can_afford(&self, cost: Cost) -> bool {
        self.energy >= cost.energy
            && self.materials >= cost.materials
            && self.crystals >= cost.crystals
    }

    /// Deduct `cost` if affordable. Nothing changes otherwise.
    pub fn try_spend(&mut self, cost: Cost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.energy -= cost.energy;
        self.materials -= cost.materials;
        self.crystals -= cost.crystals;
        true
    }

    pub fn refund(&mut self, energy: u32, materials: u32) {
        self.energy += energy;
        self.materials += materials;
    }
}

/// Everything the simulation mutates, owned by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub bounds: MapBounds,
    pub systems: Vec<StarSystem>,
    pub outposts: Vec<Outpost>,
    pub ships: Vec<Ship>,
    pub fleets: Vec<MovingFleet>,
    pub conflicts: ConflictBoard,
    pub treasury: Treasury,
    next_outpost_id: OutpostId,
    next_ship_id: ShipId,
    next_fleet_id: FleetId,
}

impl WorldState {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            bounds,
            next_outpost_id: 1,
            next_ship_id: 1,
            next_fleet_id: 1,
            ..Default::default()
        }
    }

    // --- Lookups ---

    pub fn system(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn system_mut(&mut self, id: SystemId) -> Option<&mut StarSystem> {
        self.systems.iter_mut().find(|s| s.id == id)
    }

    pub fn outpost(&self, id: OutpostId) -> Option<&Outpost> {
        self.outposts.iter().find(|o| o.id == id)
    }

    pub fn outpost_mut(&mut self, id: OutpostId) -> Option<&mut Outpost> {
        self.outposts.iter_mut().find(|o| o.id == id)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    pub fn fleet(&self, id: FleetId) -> Option<&MovingFleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    pub fn fleet_mut(&mut self, id: FleetId) -> Option<&mut MovingFleet> {
        self.fleets.iter_mut().find(|f| f.id == id)
    }

    /// Position of a ship, resolved through the system it is stationed at.
    pub fn ship_position(&self, id: ShipId) -> Option<Point> {
        let ship = self.ship(id)?;
        self.system(ship.system_id).map(|s| s.position)
    }

    // --- Spatial queries ---

    /// First system (storage order) within `radius` of `point` that passes `filter`.
    pub fn first_system_within(
        &self,
        point: Point,
        radius: f64,
        filter: impl Fn(&StarSystem) -> bool,
    ) -> Option<&StarSystem> {
        self.systems
            .iter()
            .find(|s| s.position.distance(point) <= radius && filter(s))
    }

    /// First outpost (storage order) within `radius` of `point` that passes `filter`.
    pub fn first_outpost_within(
        &self,
        point: Point,
        radius: f64,
        filter: impl Fn(&Outpost) -> bool,
    ) -> Option<&Outpost> {
        self.outposts
            .iter()
            .find(|o| o.position.distance(point) <= radius && filter(o))
    }

    /// System sitting at `point`: both axes strictly closer than `tolerance`.
    pub fn system_at(&self, point: Point, tolerance: f64) -> Option<&StarSystem> {
        self.systems.iter().find(|s| {
            (s.position.x - point.x).abs() < tolerance
                && (s.position.y - point.y).abs() < tolerance
        })
    }

    /// Ids of fleets owned by `owner` within `radius` of `point`.
    pub fn fleets_within(&self, point: Point, radius: f64, owner: Owner) -> Vec<FleetId> {
        self.fleets
            .iter()
            .filter(|f| f.owner == owner && f.position.distance(point) <= radius)
            .map(|f| f.id)
            .collect()
    }

    /// True when no outpost already stands within `radius` of `point`.
    pub fn is_free_site(&self, point: Point, radius: f64) -> bool {
        self.outposts
            .iter()
            .all(|o| o.position.distance(point) > radius)
    }

    // --- Mutation ---

    pub fn add_outpost(
        &mut self,
        position: Point,
        owner: Owner,
        level: u8,
        system_id: Option<SystemId>,
    ) -> OutpostId {
        let id = self.next_outpost_id;
        self.next_outpost_id += 1;
        let outpost = Outpost::new(id, position, owner, level, system_id);
        if let Some(system) = system_id.and_then(|sid| self.system_mut(sid)) {
            system.outpost_level = Some(outpost.level);
        }
        self.outposts.push(outpost);
        id
    }

    /// Remove an outpost and clear the link on its system.
    pub fn remove_outpost(&mut self, id: OutpostId) -> Option<Outpost> {
        let index = self.outposts.iter().position(|o| o.id == id)?;
        let outpost = self.outposts.remove(index);
        if let Some(system) = outpost.system_id.and_then(|sid| self.system_mut(sid)) {
            system.outpost_level = None;
        }
        Some(outpost)
    }

    pub fn add_ship(&mut self, class: ShipClass, owner: Owner, system_id: SystemId) -> ShipId {
        let id = self.next_ship_id;
        self.next_ship_id += 1;
        self.ships.push(Ship::new(id, class, owner, system_id));
        id
    }

    pub fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        let index = self.ships.iter().position(|s| s.id == id)?;
        Some(self.ships.remove(index))
    }

    /// Append a fleet and hand back its id. The fleet's own id is overwritten.
    pub fn add_fleet(&mut self, mut fleet: MovingFleet) -> FleetId {
        let id = self.next_fleet_id;
        self.next_fleet_id += 1;
        fleet.id = id;
        self.fleets.push(fleet);
        id
    }

    pub fn next_fleet_id(&self) -> FleetId {
        self.next_fleet_id
    }
}
