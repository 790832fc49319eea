//! Simulation report generation.

use crate::error::Result;
use crate::rooms::{BattleResult, MapNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-encounter numbers kept for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub victory: bool,
    pub turns: u32,
    pub exp_reward: u64,
    pub gold: u64,
    pub enraged: bool,
    /// Star rank of the offered cards, if any were offered
    pub card_stars: Option<u8>,
    pub relic_offered: bool,
    pub items: usize,
}

impl From<&BattleResult> for RunStats {
    fn from(result: &BattleResult) -> Self {
        Self {
            victory: result.result.is_victory(),
            turns: result.turns,
            exp_reward: result.exp_reward,
            gold: result.loot.gold,
            enraged: result.enrage.active,
            card_stars: result.card_choices.first().map(|c| c.stars),
            relic_offered: !result.relic_choices.is_empty(),
            items: result.loot.items.len(),
        }
    }
}

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    runs.iter().map(f).sum::<f64>() / runs.len().max(1) as f64
}

/// Aggregated results from multiple encounters.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub node: MapNode,
    pub num_runs: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub avg_turns: f64,
    pub avg_exp: f64,
    pub avg_gold: f64,
    pub enrage_rate: f64,
    pub relic_offer_rate: f64,
    pub avg_items: f64,
    pub card_star_distribution: BTreeMap<u8, u32>,

    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(node: MapNode, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let total = num_runs.max(1) as f64;
        let wins = runs.iter().filter(|r| r.victory).count() as u32;

        let avg_turns = mean(&runs, |r| r.turns as f64);
        let avg_exp = mean(&runs, |r| r.exp_reward as f64);
        let avg_gold = mean(&runs, |r| r.gold as f64);
        let avg_items = mean(&runs, |r| r.items as f64);
        let enrage_rate = mean(&runs, |r| if r.enraged { 1.0 } else { 0.0 });
        let relic_offer_rate = mean(&runs, |r| if r.relic_offered { 1.0 } else { 0.0 });

        let mut card_star_distribution = BTreeMap::new();
        for stars in runs.iter().filter_map(|r| r.card_stars) {
            *card_star_distribution.entry(stars).or_insert(0) += 1;
        }

        Self {
            node,
            num_runs,
            wins,
            win_rate: wins as f64 / total,
            avg_turns,
            avg_exp,
            avg_gold,
            enrage_rate,
            relic_offer_rate,
            avg_items,
            card_star_distribution,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Node: floor {}, room {}, loop {}, pressure {} ({:?})\n",
            self.node.floor,
            self.node.index,
            self.node.loop_count,
            self.node.pressure,
            self.node.room_type
        ));
        report.push_str(&format!(
            "Runs: {} total, {} won\n\n",
            self.num_runs, self.wins
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:        {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Turns:       {:.1}\n", self.avg_turns));
        report.push_str(&format!("  Enrage Rate:     {:.1}%\n\n", self.enrage_rate * 100.0));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Exp:         {:.1}\n", self.avg_exp));
        report.push_str(&format!("  Avg Gold:        {:.1}\n", self.avg_gold));
        report.push_str(&format!("  Avg Items:       {:.2}\n", self.avg_items));
        report.push_str(&format!(
            "  Relic Offers:    {:.1}%\n\n",
            self.relic_offer_rate * 100.0
        ));

        report.push_str("── CARD STARS ───────────────────────────────────────────────────\n");
        let offered: u32 = self.card_star_distribution.values().sum();
        for (stars, count) in &self.card_star_distribution {
            let pct = *count as f64 / offered.max(1) as f64 * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {}★: {:>5.1}% {}\n", stars, pct, bar));
        }
        if offered == 0 {
            report.push_str("  (no cards offered)\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
