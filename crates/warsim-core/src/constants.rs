//! Simulation constants and tuning parameters.

// --- Geography ---

/// Meters per degree of latitude (flat-earth approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Knots to meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514444;

// --- Tick cadence ---

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 100;

// --- Units ---

/// Health of an undamaged unit. Health fractions are relative to this.
pub const MAX_HEALTH: f64 = 100.0;

/// Default vision range (meters).
pub const DEFAULT_VISION_RANGE_M: f64 = 2000.0;

// --- Projectiles ---

/// Hit radius for bullets (meters).
pub const BULLET_HIT_RADIUS_M: f64 = 10.0;

/// Hit radius for shells (meters).
pub const SHELL_HIT_RADIUS_M: f64 = 30.0;

/// Hit radius for missiles (meters).
pub const MISSILE_HIT_RADIUS_M: f64 = 50.0;

/// Caliber stamped on pooled bullets (mm).
pub const BULLET_CALIBER_MM: f64 = 7.62;

/// Mass stamped on pooled shells (kg).
pub const SHELL_MASS_KG: f64 = 10.0;

/// Guidance range stamped on pooled missiles (meters).
pub const MISSILE_GUIDANCE_RANGE_M: f64 = 5000.0;

/// Fallback fire parameters when a unit carries no known weapon.
pub const DEFAULT_PROJECTILE_SPEED_MPS: f64 = 400.0;
pub const DEFAULT_PROJECTILE_DAMAGE: f64 = 10.0;
pub const DEFAULT_PROJECTILE_RANGE_M: f64 = 2000.0;

// --- Opportunistic fire (simple mode) ---

/// Per-tick fire chance for aircraft.
pub const AIRCRAFT_FIRE_CHANCE: f64 = 0.01;

/// Per-tick fire chance for ground vehicles.
pub const VEHICLE_FIRE_CHANCE: f64 = 0.002;

pub const OPPORTUNISTIC_SHELL_SPEED_MPS: f64 = 250.0;
pub const OPPORTUNISTIC_SHELL_DAMAGE: f64 = 50.0;
pub const OPPORTUNISTIC_SHELL_MASS_KG: f64 = 15.0;
pub const OPPORTUNISTIC_SHELL_RANGE_M: f64 = 4000.0;

// --- Damage model ---

/// Armor points are scaled by this before being subtracted from damage.
pub const ARMOR_DAMAGE_FACTOR: f64 = 0.1;

/// Fraction of base damage that always applies regardless of armor.
pub const MIN_DAMAGE_FRACTION: f64 = 0.1;

// --- AI timing ---

/// Seconds an idle unit waits before starting a patrol.
pub const IDLE_PATROL_DWELL_SECS: f64 = 10.0;

/// Minimum aggression required for an idle unit to engage.
pub const IDLE_ENGAGE_AGGRESSION: f64 = 0.3;

/// Seconds between patrol heading changes.
pub const PATROL_LEG_SECS: f64 = 30.0;

/// Minimum seconds between shots while engaging.
pub const ENGAGE_FIRE_COOLDOWN_SECS: f64 = 1.0;

/// Contact is lost when the target is beyond vision range times this.
pub const CONTACT_LOST_RANGE_FACTOR: f64 = 1.5;

/// Retreating units look for threats out to vision range times this.
pub const RETREAT_THREAT_RANGE_FACTOR: f64 = 2.0;

/// Health margin above the retreat threshold required to resume patrol.
pub const RETREAT_RECOVERY_MARGIN: f64 = 0.2;

/// Seconds without threats before a retreating unit stands down.
pub const RETREAT_CALM_SECS: f64 = 20.0;

/// Seconds needed to rearm.
pub const REARM_DURATION_SECS: f64 = 10.0;

/// Health fraction below which a rearming unit under threat retreats.
pub const REARM_RETREAT_HEALTH: f64 = 0.5;

// --- Category speeds (m/s for air and land, knots for sea) ---

pub const AIR_CRUISE_SPEED: f64 = 150.0;
pub const LAND_CRUISE_SPEED: f64 = 10.0;
pub const SEA_CRUISE_SPEED_KNOTS: f64 = 15.0;

pub const AIR_MAX_SPEED: f64 = 300.0;
pub const LAND_MAX_SPEED: f64 = 20.0;
pub const SEA_MAX_SPEED_KNOTS: f64 = 25.0;

pub const AIR_REARM_SPEED: f64 = 100.0;
pub const LAND_REARM_SPEED: f64 = 5.0;
pub const SEA_REARM_SPEED_KNOTS: f64 = 10.0;

// --- Simple AI ---

/// Speed requested for idle units picking a random heading.
pub const SIMPLE_WANDER_SPEED: f64 = 5.0;

/// Maximum heading jitter per tick for moving units (degrees, total span).
pub const SIMPLE_HEADING_JITTER_DEG: f64 = 5.0;

/// Range at which the simple AI opens fire (meters).
pub const SIMPLE_FIRE_RANGE_M: f64 = 2000.0;
