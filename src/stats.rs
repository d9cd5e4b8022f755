//! Player progression data: health, coins and level unlocks
//!
//! Health and coins are only reachable through explicit mutators that return
//! what happened as a value (`HealthChange`, `CoinChange`). The hat stack is
//! driven from those events (one add/remove per unit of actual health
//! change), so there is no hidden callback wiring between this module and
//! the cosmetic layer.
//!
//! Invariants:
//! - `health` stays in `[0, max_health]`; increases clamp at the cap,
//!   decreases stop at 0 (death is `health() == 0`, never a negative value)
//! - `coins` is never observably >= 100: crossing the threshold immediately
//!   converts 100 coins into one health point, cascading for large gains

/// Hat-stack side effects of a health mutation, one event per unit of
/// actual health change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthChange {
    pub hats_added: u32,
    pub hats_removed: u32,
}

impl HealthChange {
    pub fn is_empty(&self) -> bool {
        self.hats_added == 0 && self.hats_removed == 0
    }

    fn merge(&mut self, other: HealthChange) {
        self.hats_added += other.hats_added;
        self.hats_removed += other.hats_removed;
    }
}

/// Result of a coin mutation: how many 100-coin thresholds were crossed and
/// the health events those conversions produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinChange {
    pub cascades: u32,
    pub hats: HealthChange,
}

#[derive(Debug, Clone)]
pub struct PlayerData {
    health: i32,
    coins: i32,
    max_health: i32,
    /// Highest level reachable on the overworld
    pub unlocked_level: u32,
    /// Level the player is currently standing on / playing
    pub current_level: u32,
}

impl PlayerData {
    /// Fresh run: 2 health of a maximum 5, no coins, nothing unlocked
    pub fn new() -> Self {
        PlayerData {
            health: 2,
            coins: 0,
            max_health: 5,
            unlocked_level: 0,
            current_level: 0,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn coins(&self) -> i32 {
        self.coins
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Applies a health delta one unit at a time so every unit of actual
    /// change produces exactly one hat event. Clamped units (raising at the
    /// cap, lowering at 0) produce no event.
    pub fn apply_health_delta(&mut self, delta: i32) -> HealthChange {
        let mut change = HealthChange::default();

        if delta > 0 {
            for _ in 0..delta {
                if self.health >= self.max_health {
                    break;
                }
                self.health += 1;
                change.hats_added += 1;
            }
        } else {
            for _ in 0..(-delta) {
                if self.health <= 0 {
                    break;
                }
                self.health -= 1;
                change.hats_removed += 1;
            }
        }

        change
    }

    /// Adds (or removes) coins, converting every full 100 into one health
    /// point. A gain of 200+ cascades multiple conversions in one call.
    /// Negative deltas floor at zero coins.
    pub fn apply_coins(&mut self, delta: i32) -> CoinChange {
        let mut change = CoinChange::default();

        self.coins = (self.coins + delta).max(0);
        while self.coins >= 100 {
            self.coins -= 100;
            change.cascades += 1;
            change.hats.merge(self.apply_health_delta(1));
        }

        change
    }
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new()
    }
}
