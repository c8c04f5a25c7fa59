//! Ownership-changed notifications.
//!
//! Each subscriber gets its own `mpsc` channel; dropping the receiver is the
//! unsubscribe.  Disconnected senders are pruned at the next publish, so a
//! forgotten subscription never leaks more than one slot.

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use gw_core::ClassId;

/// Grid ownership moved from `from` to `to`.
///
/// Every class previously resolving to `from` — including `from` itself —
/// now resolves to `to`.  Consumers holding per-owner data (see
/// [`OwnerGridStore`][crate::OwnerGridStore]) rekey on receipt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OwnershipChanged {
    pub from: ClassId,
    pub to:   ClassId,
}

/// Fan-out of [`OwnershipChanged`] events to any number of subscribers.
#[derive(Default)]
pub(crate) struct OwnershipBus {
    senders: Mutex<Vec<Sender<OwnershipChanged>>>,
}

impl OwnershipBus {
    /// Open a new subscription.  Events published after this call are
    /// delivered; there is no replay of earlier transfers.
    pub fn subscribe(&self) -> Receiver<OwnershipChanged> {
        let (tx, rx) = mpsc::channel();
        self.lock().push(tx);
        rx
    }

    /// Deliver `event` to all live subscribers, dropping dead ones.
    pub fn publish(&self, event: OwnershipChanged) {
        self.lock().retain(|tx| tx.send(event).is_ok());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender<OwnershipChanged>>> {
        // A panic while holding this mutex cannot leave the sender list in a
        // broken state (retain/push are atomic at this granularity), so a
        // poisoned lock is safe to enter.
        self.senders.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
