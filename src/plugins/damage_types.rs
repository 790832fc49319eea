//! Elemental damage types.
//!
//! A damage type decides what a combatant does with its turn and which
//! lingering effects its hits leave behind. Types are looked up by id through
//! [`DamageTypeRegistry`].

use crate::combat::effects::{DamageOverTime, StatusEffect, StatusKind};
use crate::combat::fighter::Fighter;
use crate::character::Stats;
use crate::core::constants::{DOT_DAMAGE_FRACTION, DOT_TURNS};
use crate::error::{AutofighterError, Result};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::HashMap;
use tracing::warn;

/// Element ids a foe may roll when its own element is unset.
pub const ELEMENTS: [&str; 6] = ["Fire", "Ice", "Lightning", "Light", "Dark", "Wind"];

pub const GENERIC: &str = "Generic";

/// Allies below this HP fraction are healed by Light instead of attacking.
const LIGHT_HEAL_THRESHOLD: f64 = 0.25;

/// Wind's gust hits every enemy for this fraction of attack.
const WIND_GUST_FRACTION: f64 = 0.25;

/// The acting combatant's view of the field.
///
/// `actor` indexes into `allies`, which always contains the actor itself.
pub struct ActionContext<'a> {
    pub actor: usize,
    pub allies: &'a mut [Fighter],
    pub enemies: &'a mut [Fighter],
}

pub trait DamageType: Send + Sync {
    fn id(&self) -> &'static str;

    fn dot_name(&self) -> &'static str;

    fn dot_id(&self) -> &'static str;

    /// Damage over time left by a hit of `damage`.
    fn create_dot(&self, damage: u32, _source: &Stats) -> Option<DamageOverTime> {
        let per_tick = ((damage as f64 * DOT_DAMAGE_FRACTION) as u32).max(1);
        Some(DamageOverTime::new(
            self.dot_name(),
            per_tick,
            DOT_TURNS,
            self.dot_id(),
        ))
    }

    fn create_status(&self, _target: &Stats) -> Option<StatusEffect> {
        None
    }

    /// Runs the actor's ability. Returns whether the regular attack follows.
    fn on_action(&self, _ctx: ActionContext<'_>, _rng: &mut dyn RngCore) -> bool {
        true
    }
}

pub struct Generic;

impl DamageType for Generic {
    fn id(&self) -> &'static str {
        GENERIC
    }
    fn dot_name(&self) -> &'static str {
        "Bleed"
    }
    fn dot_id(&self) -> &'static str {
        "bleed"
    }
}

pub struct Fire;

impl DamageType for Fire {
    fn id(&self) -> &'static str {
        "Fire"
    }
    fn dot_name(&self) -> &'static str {
        "Blazing Torment"
    }
    fn dot_id(&self) -> &'static str {
        "blazing_torment"
    }
}

pub struct Ice;

impl DamageType for Ice {
    fn id(&self) -> &'static str {
        "Ice"
    }
    fn dot_name(&self) -> &'static str {
        "Frozen Wound"
    }
    fn dot_id(&self) -> &'static str {
        "frozen_wound"
    }
    fn create_status(&self, _target: &Stats) -> Option<StatusEffect> {
        Some(StatusEffect::new("Frozen", "frozen", 1, StatusKind::Stun))
    }
}

pub struct Lightning;

impl DamageType for Lightning {
    fn id(&self) -> &'static str {
        "Lightning"
    }
    fn dot_name(&self) -> &'static str {
        "Charged Decay"
    }
    fn dot_id(&self) -> &'static str {
        "charged_decay"
    }
    fn create_status(&self, _target: &Stats) -> Option<StatusEffect> {
        Some(StatusEffect::new(
            "Shocked",
            "shocked",
            2,
            StatusKind::Defense(-0.10),
        ))
    }
}

pub struct Light;

impl DamageType for Light {
    fn id(&self) -> &'static str {
        "Light"
    }
    fn dot_name(&self) -> &'static str {
        "Celestial Atrophy"
    }
    fn dot_id(&self) -> &'static str {
        "celestial_atrophy"
    }

    fn on_action(&self, ctx: ActionContext<'_>, _rng: &mut dyn RngCore) -> bool {
        let heal = ctx.allies[ctx.actor].stats.atk;
        let wounded = ctx.allies.iter_mut().find(|ally| {
            ally.is_alive()
                && (ally.stats.hp as f64) < ally.stats.max_hp as f64 * LIGHT_HEAL_THRESHOLD
        });
        match wounded {
            Some(ally) => {
                ally.stats.apply_healing(heal);
                false
            }
            None => true,
        }
    }
}

pub struct Dark;

impl DamageType for Dark {
    fn id(&self) -> &'static str {
        "Dark"
    }
    fn dot_name(&self) -> &'static str {
        "Abyssal Corruption"
    }
    fn dot_id(&self) -> &'static str {
        "abyssal_corruption"
    }
    fn create_status(&self, _target: &Stats) -> Option<StatusEffect> {
        Some(StatusEffect::new(
            "Weakened",
            "weakened",
            2,
            StatusKind::Attack(-0.10),
        ))
    }
}

pub struct Wind;

impl DamageType for Wind {
    fn id(&self) -> &'static str {
        "Wind"
    }
    fn dot_name(&self) -> &'static str {
        "Gale Erosion"
    }
    fn dot_id(&self) -> &'static str {
        "gale_erosion"
    }

    fn on_action(&self, ctx: ActionContext<'_>, mut rng: &mut dyn RngCore) -> bool {
        let attacker = &ctx.allies[ctx.actor].stats;
        let gust = ((attacker.atk as f64 * WIND_GUST_FRACTION) as u32).max(1);
        let mut dealt = 0u64;
        for enemy in ctx.enemies.iter_mut().filter(|e| e.is_alive()) {
            dealt += enemy.stats.apply_damage(gust, attacker, &mut rng) as u64;
        }
        ctx.allies[ctx.actor].stats.damage_dealt += dealt;
        true
    }
}

/// Damage types by id. Always contains [`Generic`].
pub struct DamageTypeRegistry {
    types: HashMap<&'static str, Box<dyn DamageType>>,
}

impl DamageTypeRegistry {
    pub fn empty() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.register(Box::new(Generic));
        registry
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(Fire));
        registry.register(Box::new(Ice));
        registry.register(Box::new(Lightning));
        registry.register(Box::new(Light));
        registry.register(Box::new(Dark));
        registry.register(Box::new(Wind));
        registry
    }

    pub fn register(&mut self, damage_type: Box<dyn DamageType>) {
        self.types.insert(damage_type.id(), damage_type);
    }

    pub fn get(&self, id: &str) -> Result<&dyn DamageType> {
        self.types
            .get(id)
            .map(|t| t.as_ref())
            .ok_or_else(|| AutofighterError::UnknownDamageType(id.to_string()))
    }

    /// Looks up `id`, falling back to [`Generic`] for unknown ids.
    pub fn get_or_generic(&self, id: &str) -> &dyn DamageType {
        match self.get(id) {
            Ok(t) => t,
            Err(_) => {
                warn!(damage_type = id, "unknown damage type, using Generic");
                &Generic
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// A random element among the registered non-generic types.
    pub fn random_element(&self, rng: &mut impl Rng) -> &'static str {
        let registered: Vec<&'static str> = ELEMENTS
            .iter()
            .copied()
            .filter(|id| self.contains(id))
            .collect();
        registered.choose(rng).copied().unwrap_or(GENERIC)
    }
}

impl Default for DamageTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fighter(id: &str, damage_type: &str) -> Fighter {
        Fighter::new(Stats::new(id, id).with_damage_type(damage_type))
    }

    #[test]
    fn test_registry_builtins() {
        let registry = DamageTypeRegistry::with_builtins();
        assert_eq!(registry.len(), 7);
        for id in ELEMENTS {
            assert_eq!(registry.get(id).unwrap().id(), id);
        }
    }

    #[test]
    fn test_unknown_damage_type() {
        let registry = DamageTypeRegistry::with_builtins();
        assert!(matches!(
            registry.get("Plasma"),
            Err(AutofighterError::UnknownDamageType(_))
        ));
        assert_eq!(registry.get_or_generic("Plasma").id(), GENERIC);
    }

    #[test]
    fn test_random_element_only_registered() {
        let mut rng = StdRng::seed_from_u64(11);
        let registry = DamageTypeRegistry::with_builtins();
        for _ in 0..50 {
            assert!(ELEMENTS.contains(&registry.random_element(&mut rng)));
        }
        assert_eq!(DamageTypeRegistry::empty().random_element(&mut rng), GENERIC);
    }

    #[test]
    fn test_dot_damage_has_floor() {
        let dot = Fire.create_dot(1, &Stats::default()).unwrap();
        assert_eq!(dot.damage, 1);
        assert_eq!(dot.turns, DOT_TURNS);
        let dot = Fire.create_dot(400, &Stats::default()).unwrap();
        assert_eq!(dot.damage, 100);
        assert_eq!(dot.id, "blazing_torment");
    }

    #[test]
    fn test_light_heals_wounded_ally_instead_of_attacking() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut allies = vec![fighter("healer", "Light"), fighter("tank", "Generic")];
        allies[1].stats.hp = 100;
        let mut enemies = vec![fighter("foe", "Generic")];
        let attacked = Light.on_action(
            ActionContext {
                actor: 0,
                allies: &mut allies,
                enemies: &mut enemies,
            },
            &mut rng,
        );
        assert!(!attacked);
        assert_eq!(allies[1].stats.hp, 100 + allies[0].stats.atk);
    }

    #[test]
    fn test_light_attacks_when_nobody_is_wounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut allies = vec![fighter("healer", "Light")];
        let mut enemies = vec![fighter("foe", "Generic")];
        assert!(Light.on_action(
            ActionContext {
                actor: 0,
                allies: &mut allies,
                enemies: &mut enemies,
            },
            &mut rng,
        ));
    }

    #[test]
    fn test_wind_gust_hits_enemies() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut allies = vec![fighter("gale", "Wind")];
        allies[0].stats.crit_rate = 0.0;
        let mut enemies = vec![fighter("foe", "Generic")];
        enemies[0].stats.dodge_odds = 0.0;
        let attacked = Wind.on_action(
            ActionContext {
                actor: 0,
                allies: &mut allies,
                enemies: &mut enemies,
            },
            &mut rng,
        );
        assert!(attacked);
        assert!(enemies[0].stats.hp < enemies[0].stats.max_hp);
        assert!(allies[0].stats.damage_dealt > 0);
    }
}
