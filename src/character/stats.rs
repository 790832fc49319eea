use crate::core::combat_math::{exp_to_level, mitigate_damage, roll_crit};
use crate::core::constants::*;
use crate::error::{AutofighterError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric combat stats addressable by cards, relics and the foe scaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Hp,
    MaxHp,
    Atk,
    Defense,
    Mitigation,
    CritRate,
    CritDamage,
    Regain,
    DodgeOdds,
    EffectHitRate,
    EffectResistance,
}

impl StatKey {
    /// Every stat the foe scaler multiplies. Experience, level and the
    /// experience multiplier are deliberately absent.
    pub const SCALABLE: [StatKey; 11] = [
        StatKey::Hp,
        StatKey::MaxHp,
        StatKey::Atk,
        StatKey::Defense,
        StatKey::Mitigation,
        StatKey::CritRate,
        StatKey::CritDamage,
        StatKey::Regain,
        StatKey::DodgeOdds,
        StatKey::EffectHitRate,
        StatKey::EffectResistance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::MaxHp => "max_hp",
            StatKey::Atk => "atk",
            StatKey::Defense => "defense",
            StatKey::Mitigation => "mitigation",
            StatKey::CritRate => "crit_rate",
            StatKey::CritDamage => "crit_damage",
            StatKey::Regain => "regain",
            StatKey::DodgeOdds => "dodge_odds",
            StatKey::EffectHitRate => "effect_hit_rate",
            StatKey::EffectResistance => "effect_resistance",
        }
    }

    fn is_integral(&self) -> bool {
        matches!(
            self,
            StatKey::Hp | StatKey::MaxHp | StatKey::Atk | StatKey::Defense
        )
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A combatant: party member or foe.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` so older
/// snapshots keep deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub defense: u32,
    pub mitigation: f64,
    pub level: u32,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub exp: u64,
    pub exp_multiplier: f64,
    #[serde(default)]
    pub regain: f64,
    #[serde(default)]
    pub dodge_odds: f64,
    #[serde(default)]
    pub effect_hit_rate: f64,
    #[serde(default)]
    pub effect_resistance: f64,
    /// Damage type id, resolved through the damage type registry.
    pub damage_type: String,
    #[serde(default)]
    pub passives: Vec<String>,
    #[serde(default)]
    pub damage_dealt: u64,
    #[serde(default)]
    pub damage_taken: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            hp: DEFAULT_MAX_HP,
            max_hp: DEFAULT_MAX_HP,
            atk: DEFAULT_ATK,
            defense: DEFAULT_DEFENSE,
            mitigation: 1.0,
            level: 1,
            crit_rate: DEFAULT_CRIT_RATE,
            crit_damage: DEFAULT_CRIT_DAMAGE,
            exp: 0,
            exp_multiplier: 1.0,
            regain: DEFAULT_REGAIN,
            dodge_odds: 0.0,
            effect_hit_rate: DEFAULT_EFFECT_HIT_RATE,
            effect_resistance: DEFAULT_EFFECT_RESISTANCE,
            damage_type: "Generic".to_string(),
            passives: Vec::new(),
            damage_dealt: 0,
            damage_taken: 0,
        }
    }
}

impl Stats {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_damage_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage_type = damage_type.into();
        self
    }

    /// Display label: name, then id, then a fixed placeholder.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.id.is_empty() {
            &self.id
        } else {
            "unknown"
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Resolves an attack of `amount` raw damage from `attacker`.
    ///
    /// Rolls dodge, then the attacker's crit, then applies defense and
    /// mitigation. Returns the HP actually removed.
    pub fn apply_damage(&mut self, amount: u32, attacker: &Stats, rng: &mut impl Rng) -> u32 {
        if !self.is_alive() || amount == 0 {
            return 0;
        }
        if self.dodge_odds > 0.0 && rng.gen::<f64>() < self.dodge_odds {
            return 0;
        }
        let mut raw = amount as f64;
        if roll_crit(attacker.crit_rate, rng) {
            raw *= attacker.crit_damage;
        }
        let damage = mitigate_damage(raw, self.defense, self.mitigation);
        self.remove_hp(damage)
    }

    /// Effect damage ignores defense and mitigation.
    pub fn take_effect_damage(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.remove_hp(amount)
    }

    fn remove_hp(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        self.damage_taken += dealt as u64;
        dealt
    }

    /// Heals a living combatant up to max HP. Returns the HP restored.
    pub fn apply_healing(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }

    /// Passive recovery, only on even turns.
    pub fn maybe_regain(&mut self, turn: u32) -> u32 {
        if turn % 2 != 0 || self.regain <= 0.0 {
            return 0;
        }
        let heal = (self.max_hp as f64 * self.regain) as u32;
        self.apply_healing(heal)
    }

    /// Adds experience scaled by `exp_multiplier`. Returns levels gained.
    pub fn gain_exp(&mut self, amount: u64) -> u32 {
        let scaled = (amount as f64 * self.exp_multiplier.max(0.0)) as u64;
        self.exp += scaled;
        let mut levels = 0;
        while self.exp >= exp_to_level(self.level) {
            self.exp -= exp_to_level(self.level);
            self.level_up();
            levels += 1;
        }
        levels
    }

    fn level_up(&mut self) {
        self.level += 1;
        let grow = |value: u32| ((value as f64 * (1.0 + LEVEL_UP_STAT_GROWTH)) as u32).max(value);
        let new_max = grow(self.max_hp);
        if self.is_alive() {
            self.hp = (self.hp + (new_max - self.max_hp)).min(new_max);
        }
        self.max_hp = new_max;
        self.atk = grow(self.atk);
        self.defense = grow(self.defense);
    }

    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Hp => self.hp as f64,
            StatKey::MaxHp => self.max_hp as f64,
            StatKey::Atk => self.atk as f64,
            StatKey::Defense => self.defense as f64,
            StatKey::Mitigation => self.mitigation,
            StatKey::CritRate => self.crit_rate,
            StatKey::CritDamage => self.crit_damage,
            StatKey::Regain => self.regain,
            StatKey::DodgeOdds => self.dodge_odds,
            StatKey::EffectHitRate => self.effect_hit_rate,
            StatKey::EffectResistance => self.effect_resistance,
        }
    }

    /// Writes a stat, refusing values the field cannot hold.
    ///
    /// Integral stats truncate toward zero and must fit in `u32`; float stats
    /// must be finite. `hp` is clamped to `max_hp` afterwards.
    pub fn set(&mut self, key: StatKey, value: f64) -> Result<()> {
        let representable = value.is_finite()
            && (!key.is_integral() || (value >= 0.0 && value <= u32::MAX as f64));
        if !representable {
            return Err(AutofighterError::UnrepresentableStat { stat: key, value });
        }
        match key {
            StatKey::Hp => self.hp = value as u32,
            StatKey::MaxHp => self.max_hp = value as u32,
            StatKey::Atk => self.atk = value as u32,
            StatKey::Defense => self.defense = value as u32,
            StatKey::Mitigation => self.mitigation = value,
            StatKey::CritRate => self.crit_rate = value,
            StatKey::CritDamage => self.crit_damage = value,
            StatKey::Regain => self.regain = value,
            StatKey::DodgeOdds => self.dodge_odds = value,
            StatKey::EffectHitRate => self.effect_hit_rate = value,
            StatKey::EffectResistance => self.effect_resistance = value,
        }
        self.hp = self.hp.min(self.max_hp);
        Ok(())
    }

    /// Raises (or lowers) a stat by a fraction of its current value.
    /// Max HP bonuses also grant the gained HP to a living combatant.
    pub fn apply_bonus(&mut self, key: StatKey, fraction: f64) -> Result<()> {
        let before = self.get(key);
        let after = before * (1.0 + fraction);
        if key == StatKey::MaxHp {
            let old_max = self.max_hp;
            self.set(key, after.max(1.0))?;
            if self.is_alive() && self.max_hp > old_max {
                self.hp = (self.hp + (self.max_hp - old_max)).min(self.max_hp);
            }
            return Ok(());
        }
        self.set(key, after.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn no_crit_attacker() -> Stats {
        Stats {
            crit_rate: 0.0,
            ..Stats::new("attacker", "Attacker")
        }
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(Stats::new("luna", "Luna").label(), "Luna");
        assert_eq!(Stats::new("luna", "").label(), "luna");
        assert_eq!(Stats::new("", "").label(), "unknown");
    }

    #[test]
    fn test_apply_damage_respects_defense() {
        let mut rng = StdRng::seed_from_u64(7);
        let attacker = no_crit_attacker();
        let mut target = Stats {
            defense: 100,
            ..Stats::new("target", "Target")
        };
        let dealt = target.apply_damage(200, &attacker, &mut rng);
        assert_eq!(dealt, 100);
        assert_eq!(target.hp, target.max_hp - 100);
        assert_eq!(target.damage_taken, 100);
    }

    #[test]
    fn test_apply_damage_no_underflow() {
        let mut rng = StdRng::seed_from_u64(7);
        let attacker = no_crit_attacker();
        let mut target = Stats {
            hp: 10,
            defense: 0,
            ..Stats::new("target", "Target")
        };
        let dealt = target.apply_damage(500, &attacker, &mut rng);
        assert_eq!(dealt, 10);
        assert_eq!(target.hp, 0);
        // Dead targets take nothing further
        assert_eq!(target.apply_damage(500, &attacker, &mut rng), 0);
    }

    #[test]
    fn test_crit_multiplies_damage() {
        let mut rng = StdRng::seed_from_u64(7);
        let attacker = Stats {
            crit_rate: 1.0,
            crit_damage: 2.0,
            ..Stats::new("attacker", "Attacker")
        };
        let mut target = Stats {
            defense: 0,
            ..Stats::new("target", "Target")
        };
        assert_eq!(target.apply_damage(100, &attacker, &mut rng), 200);
    }

    #[test]
    fn test_guaranteed_dodge() {
        let mut rng = StdRng::seed_from_u64(7);
        let attacker = no_crit_attacker();
        let mut target = Stats {
            dodge_odds: 1.0,
            ..Stats::new("target", "Target")
        };
        assert_eq!(target.apply_damage(100, &attacker, &mut rng), 0);
        assert_eq!(target.hp, target.max_hp);
    }

    #[test]
    fn test_apply_healing_caps_at_max() {
        let mut stats = Stats {
            hp: 900,
            ..Stats::new("a", "A")
        };
        assert_eq!(stats.apply_healing(500), 100);
        assert_eq!(stats.hp, stats.max_hp);
    }

    #[test]
    fn test_fallen_cannot_be_healed() {
        let mut stats = Stats {
            hp: 0,
            ..Stats::new("a", "A")
        };
        assert_eq!(stats.apply_healing(500), 0);
        assert_eq!(stats.maybe_regain(2), 0);
    }

    #[test]
    fn test_maybe_regain_even_turns_only() {
        let mut stats = Stats {
            hp: 500,
            regain: 0.01,
            ..Stats::new("a", "A")
        };
        assert_eq!(stats.maybe_regain(1), 0);
        assert_eq!(stats.maybe_regain(2), 10);
        assert_eq!(stats.hp, 510);
    }

    #[test]
    fn test_gain_exp_levels_up() {
        let mut stats = Stats::new("a", "A");
        let levels = stats.gain_exp(exp_to_level(1));
        assert_eq!(levels, 1);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.exp, 0);
        assert!(stats.max_hp > DEFAULT_MAX_HP);
        assert!(stats.atk > DEFAULT_ATK);
    }

    #[test]
    fn test_gain_exp_applies_multiplier() {
        let mut stats = Stats {
            exp_multiplier: 0.5,
            ..Stats::new("a", "A")
        };
        stats.gain_exp(50);
        assert_eq!(stats.exp, 25);
        assert_eq!(stats.level, 1);
    }

    #[test]
    fn test_set_rejects_unrepresentable_values() {
        let mut stats = Stats::new("a", "A");
        assert!(stats.set(StatKey::Atk, f64::INFINITY).is_err());
        assert!(stats.set(StatKey::Atk, -5.0).is_err());
        assert!(stats.set(StatKey::MaxHp, 1e12).is_err());
        assert!(stats.set(StatKey::Mitigation, f64::NAN).is_err());
        assert_eq!(stats.atk, DEFAULT_ATK);
        assert!(stats.set(StatKey::Mitigation, 1.5).is_ok());
        assert_eq!(stats.mitigation, 1.5);
    }

    #[test]
    fn test_set_clamps_hp_to_max() {
        let mut stats = Stats::new("a", "A");
        stats.set(StatKey::MaxHp, 400.0).unwrap();
        assert_eq!(stats.hp, 400);
    }

    #[test]
    fn test_max_hp_bonus_grants_hp() {
        let mut stats = Stats {
            hp: 500,
            ..Stats::new("a", "A")
        };
        stats.apply_bonus(StatKey::MaxHp, 0.10).unwrap();
        assert_eq!(stats.max_hp, 1100);
        assert_eq!(stats.hp, 600);
    }

    #[test]
    fn test_serde_defaults_for_optional_fields() {
        let json = r#"{
            "id": "slime", "hp": 10, "max_hp": 10, "atk": 1, "defense": 0,
            "mitigation": 1.0, "level": 1, "crit_rate": 0.0, "crit_damage": 2.0,
            "exp": 0, "exp_multiplier": 1.0, "damage_type": "Generic"
        }"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.label(), "slime");
        assert!(stats.passives.is_empty());
        assert_eq!(stats.regain, 0.0);
    }
}
