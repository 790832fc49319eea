//! Progress sinks receive a snapshot after every discrete combat step.
//!
//! The loop awaits each `emit`, so a slow consumer slows the battle down
//! rather than piling up snapshots.

use super::snapshot::BattleSnapshot;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

#[async_trait]
pub trait ProgressSink: Send {
    async fn emit(&mut self, snapshot: BattleSnapshot);
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

#[async_trait]
impl ProgressSink for NoProgress {
    async fn emit(&mut self, _snapshot: BattleSnapshot) {}
}

/// Collects snapshots in memory.
#[async_trait]
impl ProgressSink for Vec<BattleSnapshot> {
    async fn emit(&mut self, snapshot: BattleSnapshot) {
        self.push(snapshot);
    }
}

/// Bounded channel sender. A full channel suspends the battle; a closed one
/// drops snapshots without failing the encounter.
#[async_trait]
impl ProgressSink for mpsc::Sender<BattleSnapshot> {
    async fn emit(&mut self, snapshot: BattleSnapshot) {
        if self.send(snapshot).await.is_err() {
            debug!("progress receiver closed, snapshot dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::enrage::EnrageState;
    use crate::combat::snapshot::Outcome;

    fn snapshot(turn: u32) -> BattleSnapshot {
        BattleSnapshot {
            result: Outcome::Battle,
            party: Vec::new(),
            foes: Vec::new(),
            enrage: EnrageState::default(),
            rdr: 1.0,
            turn,
        }
    }

    #[tokio::test]
    async fn test_vec_collects() {
        let mut sink: Vec<BattleSnapshot> = Vec::new();
        sink.emit(snapshot(1)).await;
        sink.emit(snapshot(2)).await;
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].turn, 2);
    }

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (mut tx, mut rx) = mpsc::channel(4);
        tx.emit(snapshot(1)).await;
        tx.emit(snapshot(2)).await;
        assert_eq!(rx.recv().await.map(|s| s.turn), Some(1));
        assert_eq!(rx.recv().await.map(|s| s.turn), Some(2));
    }

    #[tokio::test]
    async fn test_closed_channel_is_ignored() {
        let (mut tx, rx) = mpsc::channel(1);
        drop(rx);
        tx.emit(snapshot(1)).await;
    }
}
