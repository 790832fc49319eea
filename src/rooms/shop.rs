use super::result::{RoomKind, RoomResult};
use crate::character::Party;
use crate::combat::triggers::{Side, TriggerEvent, TriggerRegistry};
use crate::core::constants::SHOP_HEAL_FRACTION;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A relic offered at a price. Unaffordable purchases are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub relic: Option<String>,
    pub cost: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShopRoom;

impl ShopRoom {
    /// Heals every living member by a share of the party's total max HP,
    /// then settles the purchase if the party can pay for it.
    pub fn resolve(
        &self,
        party: &mut Party,
        purchase: Option<Purchase>,
        triggers: &mut TriggerRegistry,
    ) -> RoomResult {
        let total_max: u64 = party.members.iter().map(|m| m.max_hp as u64).sum();
        let heal = (total_max as f64 * SHOP_HEAL_FRACTION).min(u32::MAX as f64) as u32;
        for member in party.members.iter_mut() {
            triggers.trigger(TriggerEvent::RoomEnter, member, Side::Party);
            member.apply_healing(heal);
        }

        if let Some(purchase) = purchase {
            if purchase.cost > 0 && party.gold >= purchase.cost {
                party.gold -= purchase.cost;
                if let Some(relic) = purchase.relic {
                    info!(relic = %relic, cost = purchase.cost, "relic bought");
                    party.relics.push(relic);
                }
            } else {
                debug!(cost = purchase.cost, gold = party.gold, "purchase skipped");
            }
        }

        RoomResult::snapshot(RoomKind::Shop, party)
    }
}
