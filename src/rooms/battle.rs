//! Battle rooms: foe setup, the encounter itself, and reconciling the
//! outcome onto the persistent party.

use super::node::{MapNode, RoomTier, RoomType};
use super::scaling::scale_stats;
use crate::character::{Party, Stats};
use crate::combat::config::BattleConfig;
use crate::combat::engine::{Combat, CombatReport};
use crate::combat::enrage::EnrageState;
use crate::combat::fighter::Fighter;
use crate::combat::progress::ProgressSink;
use crate::combat::snapshot::Outcome;
use crate::combat::triggers::TriggerRegistry;
use crate::core::balance::floor_boss_mechanics;
use crate::core::constants::{BOSS_STRENGTH, NORMAL_STRENGTH, SLIME_EXP_BONUS};
use crate::items::drops::{
    apply_rdr_to_stars, calc_gold, pick_card_stars, pick_relic_stars, roll_items,
    roll_relic_drop, roll_ticket,
};
use crate::items::types::{CardChoice, Loot, RelicChoice};
use crate::plugins::cards::{apply_cards, card_choices};
use crate::plugins::damage_types::DamageTypeRegistry;
use crate::plugins::foes::choose_foe;
use crate::plugins::relics::{apply_relics, relic_choices};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Collaborators a battle needs besides the party.
pub struct BattleContext<'a> {
    pub config: &'a BattleConfig,
    pub damage_types: &'a DamageTypeRegistry,
    pub triggers: &'a mut TriggerRegistry,
    pub progress: &'a mut dyn ProgressSink,
}

/// Final record of a battle. Produced once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub result: Outcome,
    pub party: Vec<Stats>,
    pub foes: Vec<Stats>,
    /// Party gold after the battle.
    pub gold: u64,
    pub relics: Vec<String>,
    pub cards: Vec<String>,
    pub card_choices: Vec<CardChoice>,
    pub relic_choices: Vec<RelicChoice>,
    pub loot: Loot,
    pub room_number: u32,
    pub exp_reward: u64,
    pub enrage: EnrageState,
    pub rdr: f64,
    #[serde(default)]
    pub turns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleRoom {
    pub node: MapNode,
    pub strength: f64,
    pub boss: bool,
}

impl BattleRoom {
    pub fn normal(node: MapNode) -> Self {
        Self {
            node,
            strength: NORMAL_STRENGTH,
            boss: false,
        }
    }

    pub fn boss(node: MapNode) -> Self {
        Self {
            node,
            strength: BOSS_STRENGTH,
            boss: true,
        }
    }

    /// The battle room a map node describes, if it is a battle node.
    pub fn for_node(node: MapNode) -> Option<Self> {
        match node.room_type {
            RoomType::BattleNormal => Some(Self::normal(node)),
            RoomType::BattleBoss | RoomType::BattleBossFloor => Some(Self::boss(node)),
            _ => None,
        }
    }

    pub fn is_floor_boss(&self) -> bool {
        self.node.room_type == RoomType::BattleBossFloor
    }

    /// Stronger than a normal room without being a boss.
    pub fn is_elevated(&self) -> bool {
        self.strength > NORMAL_STRENGTH
    }

    pub fn tier(&self) -> RoomTier {
        if self.is_floor_boss() {
            RoomTier::FloorBoss
        } else if self.boss {
            RoomTier::Boss
        } else if self.is_elevated() {
            RoomTier::Elevated
        } else {
            RoomTier::Normal
        }
    }

    fn victory_tag(&self) -> Outcome {
        if self.boss || self.is_elevated() {
            Outcome::Boss
        } else {
            Outcome::Battle
        }
    }

    /// Picks and scales a foe for this room.
    pub fn prepare_foe(
        &self,
        party: &Party,
        damage_types: &DamageTypeRegistry,
        rng: &mut impl Rng,
    ) -> Stats {
        let mut foe = choose_foe(party, damage_types, rng);
        scale_stats(&mut foe, &self.node, self.strength, rng);
        foe
    }

    /// Resolves the encounter against `party`.
    ///
    /// Combat runs on a copy of the party with cards and relics applied. The
    /// persistent party only changes at defined points: its rdr when relics
    /// are applied, and HP, experience and gold once the battle is decided.
    /// A supplied `foe` is used as-is; otherwise one is chosen and scaled.
    pub async fn resolve<R: Rng + Send>(
        &self,
        party: &mut Party,
        foe: Option<Stats>,
        ctx: BattleContext<'_>,
        rng: &mut R,
    ) -> BattleResult {
        let start_gold = party.gold;
        let mut foe = match foe {
            Some(foe) => foe,
            None => self.prepare_foe(party, ctx.damage_types, rng),
        };
        if self.is_floor_boss() {
            let mechanics = floor_boss_mechanics(self.node.loop_count, self.node.pressure);
            let boosted = foe.atk as f64 * (1.0 + mechanics.attack_bonus);
            foe.atk = boosted.min(u32::MAX as f64) as u32;
        }

        let mut view = party.clone();
        apply_cards(&mut view.members, &view.cards);
        apply_relics(&mut view, ctx.triggers);
        party.rdr = view.rdr;
        party.relic_rdr = view.relic_rdr;

        info!(
            floor = self.node.floor,
            room = self.node.index,
            tier = ?self.tier(),
            foe = foe.label(),
            "resolving battle"
        );

        let fighters = view.members.into_iter().map(Fighter::new).collect();
        let report = Combat::new(
            fighters,
            Fighter::new(foe),
            self.boss,
            self.node.index,
            party.rdr,
            ctx.config,
            ctx.damage_types,
            ctx.triggers,
            ctx.progress,
        )
        .run(rng)
        .await;

        if report.slime_slain {
            for member in party.members.iter_mut() {
                member.exp_multiplier += SLIME_EXP_BONUS;
            }
        }

        if report.victory {
            self.commit_victory(party, report, start_gold, rng)
        } else {
            self.commit_defeat(party, report)
        }
    }

    fn commit_defeat(&self, party: &mut Party, report: CombatReport) -> BattleResult {
        for (fighter, member) in report.party.iter().zip(party.members.iter_mut()) {
            member.hp = fighter.stats.hp.min(member.max_hp);
        }
        info!(room = self.node.index, "party defeated");
        BattleResult {
            result: Outcome::Defeat,
            party: report.party.into_iter().map(|f| f.stats).collect(),
            foes: vec![report.foe.stats],
            gold: party.gold,
            relics: party.relics.clone(),
            cards: party.cards.clone(),
            card_choices: Vec::new(),
            relic_choices: Vec::new(),
            loot: Loot::default(),
            room_number: self.node.index,
            exp_reward: 0,
            enrage: report.enrage,
            rdr: party.rdr,
            turns: report.turns,
        }
    }

    fn commit_victory(
        &self,
        party: &mut Party,
        report: CombatReport,
        start_gold: u64,
        rng: &mut impl Rng,
    ) -> BattleResult {
        for (fighter, member) in report.party.iter().zip(party.members.iter_mut()) {
            member.gain_exp(report.exp_reward);
            member.hp = fighter.stats.hp.min(member.max_hp);
        }

        let tier = self.tier();
        let rdr = party.rdr;

        let card_stars = apply_rdr_to_stars(pick_card_stars(tier, rng), rdr, rng);
        let card_choices: Vec<CardChoice> = card_choices(party, card_stars, rng)
            .into_iter()
            .map(CardChoice::from)
            .collect();

        let mut relic_choices_out = Vec::new();
        if roll_relic_drop(tier, rdr, rng) {
            let relic_stars = apply_rdr_to_stars(pick_relic_stars(tier, rng), rdr, rng);
            relic_choices_out = relic_choices(party, relic_stars, rng)
                .into_iter()
                .map(RelicChoice::from)
                .collect();
        }

        let gold = calc_gold(tier, self.node.loop_count, rdr, rng);
        party.gold = party.gold.saturating_add(gold);

        let mut items = roll_items(tier, &self.node, rdr, rng);
        items.extend(roll_ticket(rdr, rng));

        info!(
            room = self.node.index,
            exp = report.exp_reward,
            gold,
            items = items.len(),
            "battle won"
        );

        BattleResult {
            result: self.victory_tag(),
            party: party.members.clone(),
            foes: vec![report.foe.stats],
            gold: party.gold,
            relics: party.relics.clone(),
            cards: party.cards.clone(),
            card_choices: card_choices.clone(),
            relic_choices: relic_choices_out.clone(),
            loot: Loot {
                gold: party.gold.saturating_sub(start_gold),
                card_choices,
                relic_choices: relic_choices_out,
                items,
            },
            room_number: self.node.index,
            exp_reward: report.exp_reward,
            enrage: report.enrage,
            rdr,
            turns: report.turns,
        }
    }
}
