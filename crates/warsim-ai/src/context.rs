//! Per-unit AI memory carried from tick to tick.

use warsim_core::enums::AiStateKind;
use warsim_core::types::UnitId;

use crate::profiles::BehaviorProfile;

/// Timers owned by the individual states. Each state resets the fields it
/// uses on entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateData {
    /// `time_in_state` at the last shot fired while engaging.
    pub last_fire_at: f64,
    /// Seconds since the current patrol leg started.
    pub patrol_leg_elapsed: f64,
    /// Seconds without any threat in range while retreating.
    pub calm_elapsed: f64,
}

/// State machine context for one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AiContext {
    pub state: AiStateKind,
    pub profile: BehaviorProfile,
    /// Unit currently being engaged, resolved against each new snapshot.
    pub target: Option<UnitId>,
    pub time_in_state: f64,
    pub last_state: Option<AiStateKind>,
    pub scratch: StateData,
    /// False until the initial state's entry actions have run.
    pub(crate) entered: bool,
}

impl AiContext {
    pub fn new(profile: BehaviorProfile) -> Self {
        Self {
            state: profile.initial_state,
            profile,
            target: None,
            time_in_state: 0.0,
            last_state: None,
            scratch: StateData::default(),
            entered: false,
        }
    }
}
