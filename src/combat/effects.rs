//! Per-combatant status effects: damage over time, healing over time and
//! timed stat modifiers.

use crate::character::{StatKey, Stats};
use crate::core::constants::DOT_BASE_CHANCE;
use crate::plugins::damage_types::DamageType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed damage every tick for a number of turns. Instances sharing an `id`
/// stack independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOverTime {
    pub name: String,
    pub damage: u32,
    pub turns: u32,
    pub id: String,
}

impl DamageOverTime {
    pub fn new(name: impl Into<String>, damage: u32, turns: u32, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage,
            turns,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealingOverTime {
    pub name: String,
    pub healing: u32,
    pub turns: u32,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum StatusKind {
    /// The owner cannot act while stunned.
    Stun,
    /// Fractional attack change, negative for a debuff.
    Attack(f64),
    /// Fractional defense change, negative for a debuff.
    Defense(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub id: String,
    pub turns: u32,
    pub kind: StatusKind,
    /// Absolute stat delta applied on insertion, reverted on expiry.
    #[serde(default)]
    applied: i64,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, id: impl Into<String>, turns: u32, kind: StatusKind) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            turns,
            kind,
            applied: 0,
        }
    }

    fn stat_key(&self) -> Option<StatKey> {
        match self.kind {
            StatusKind::Stun => None,
            StatusKind::Attack(_) => Some(StatKey::Atk),
            StatusKind::Defense(_) => Some(StatKey::Defense),
        }
    }

    fn fraction(&self) -> f64 {
        match self.kind {
            StatusKind::Stun => 0.0,
            StatusKind::Attack(f) | StatusKind::Defense(f) => f,
        }
    }
}

/// What happened during one [`EffectManager::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub damage: u32,
    pub healed: u32,
    pub expired: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectManager {
    pub dots: Vec<DamageOverTime>,
    pub hots: Vec<HealingOverTime>,
    pub statuses: Vec<StatusEffect>,
    /// Effect damage this combatant's inflicted effects dealt to opponents.
    #[serde(default)]
    pub effect_damage_dealt: u64,
}

impl EffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dot(&mut self, dot: DamageOverTime) {
        if dot.turns > 0 {
            self.dots.push(dot);
        }
    }

    pub fn add_hot(&mut self, hot: HealingOverTime) {
        if hot.turns > 0 {
            self.hots.push(hot);
        }
    }

    /// Applies a status to `owner`, recording the stat delta for later revert.
    pub fn add_status(&mut self, owner: &mut Stats, mut status: StatusEffect) {
        if status.turns == 0 {
            return;
        }
        if let Some(key) = status.stat_key() {
            let before = owner.get(key);
            if owner.apply_bonus(key, status.fraction()).is_ok() {
                status.applied = (owner.get(key) - before) as i64;
            }
        }
        self.statuses.push(status);
    }

    pub fn dot_stacks(&self, id: &str) -> usize {
        self.dots.iter().filter(|d| d.id == id).count()
    }

    pub fn is_stunned(&self) -> bool {
        self.statuses
            .iter()
            .any(|s| matches!(s.kind, StatusKind::Stun))
    }

    /// Advances every effect by one turn.
    ///
    /// DOTs and HOTs resolve first, then every duration counts down. Statuses
    /// that ran out on a previous tick are removed before counting, so an
    /// N-turn stun blocks exactly N actions. Damage from effects other than
    /// enrage bleed is credited to `opponent`.
    pub fn tick(
        &mut self,
        owner: &mut Stats,
        opponent: &mut EffectManager,
        enrage_id: &str,
    ) -> TickReport {
        let mut report = TickReport::default();

        for dot in &mut self.dots {
            let dealt = owner.take_effect_damage(dot.damage);
            report.damage += dealt;
            if dot.id != enrage_id {
                opponent.effect_damage_dealt += dealt as u64;
            }
            dot.turns = dot.turns.saturating_sub(1);
        }
        for hot in &mut self.hots {
            report.healed += owner.apply_healing(hot.healing);
            hot.turns = hot.turns.saturating_sub(1);
        }

        let (expired, kept): (Vec<_>, Vec<_>) =
            self.statuses.drain(..).partition(|s| s.turns == 0);
        self.statuses = kept;
        for status in &mut self.statuses {
            status.turns -= 1;
        }
        for status in expired {
            revert(owner, &status);
            report.expired.push(status.name);
        }

        self.dots.retain(|d| {
            if d.turns == 0 {
                report.expired.push(d.name.clone());
            }
            d.turns > 0
        });
        self.hots.retain(|h| h.turns > 0);

        if report.damage > 0 || report.healed > 0 {
            debug!(
                combatant = owner.label(),
                damage = report.damage,
                healed = report.healed,
                "effects ticked"
            );
        }
        report
    }

    /// Whether the owner may act this turn.
    pub fn on_action(&self) -> bool {
        !self.is_stunned()
    }

    /// Rolls for `attacker`'s damage type to leave a lingering effect on
    /// `owner` after a hit of `damage`.
    ///
    /// Chance is `0.25 * effect_hit_rate - effect_resistance`, clamped to
    /// `[0, 1]`. The DOT and the optional status roll independently.
    pub fn maybe_inflict_dot(
        &mut self,
        owner: &mut Stats,
        attacker: &Stats,
        damage_type: &dyn DamageType,
        damage: u32,
        rng: &mut impl Rng,
    ) -> bool {
        if damage == 0 || !owner.is_alive() {
            return false;
        }
        let chance = (DOT_BASE_CHANCE * attacker.effect_hit_rate - owner.effect_resistance)
            .clamp(0.0, 1.0);
        let mut inflicted = false;
        if rng.gen::<f64>() < chance {
            if let Some(dot) = damage_type.create_dot(damage, attacker) {
                debug!(combatant = owner.label(), dot = %dot.name, "dot inflicted");
                self.add_dot(dot);
                inflicted = true;
            }
        }
        if rng.gen::<f64>() < chance {
            if let Some(status) = damage_type.create_status(owner) {
                debug!(combatant = owner.label(), status = %status.name, "status inflicted");
                self.add_status(owner, status);
                inflicted = true;
            }
        }
        inflicted
    }
}

fn revert(owner: &mut Stats, status: &StatusEffect) {
    let Some(key) = status.stat_key() else {
        return;
    };
    let restored = owner.get(key) - status.applied as f64;
    if let Err(err) = owner.set(key, restored.max(0.0)) {
        warn!(
            combatant = owner.label(),
            status = %status.name,
            error = %err,
            "status revert skipped"
        );
    }
}
