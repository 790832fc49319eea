use super::result::{RoomKind, RoomResult};
use crate::character::Party;
use crate::combat::triggers::{Side, TriggerEvent, TriggerRegistry};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatRoom;

impl ChatRoom {
    pub fn resolve(
        &self,
        party: &mut Party,
        message: &str,
        triggers: &mut TriggerRegistry,
    ) -> RoomResult {
        for member in party.members.iter_mut() {
            triggers.trigger(TriggerEvent::RoomEnter, member, Side::Party);
        }
        RoomResult::snapshot(RoomKind::Chat, party).with_message(message)
    }
}
