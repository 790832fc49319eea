use super::result::{RoomKind, RoomResult};
use crate::character::Party;
use crate::combat::triggers::{Side, TriggerEvent, TriggerRegistry};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct RestRoom;

impl RestRoom {
    /// Restores every member to full HP, fallen members included.
    pub fn resolve(&self, party: &mut Party, triggers: &mut TriggerRegistry) -> RoomResult {
        for member in party.members.iter_mut() {
            triggers.trigger(TriggerEvent::RoomEnter, member, Side::Party);
            member.hp = member.max_hp;
        }
        info!(members = party.members.len(), "party rested");
        RoomResult::snapshot(RoomKind::Rest, party)
    }
}
