//! State-change subscribers.
//!
//! Observers are told only that something changed; they read whatever they
//! need back out of the [`Game`] they are handed. Because that handle is a
//! shared borrow, an observer cannot drop a token or restart from inside its
//! callback.

use crate::game::Game;
use serde::{Deserialize, Serialize};

/// Something that reacts to game state changes
pub trait Observer {
    fn on_update(&mut self, game: &Game);
}

impl<F> Observer for F
where
    F: FnMut(&Game),
{
    fn on_update(&mut self, game: &Game) {
        self(game)
    }
}

/// Handle returned by [`Game::attach`], used to detach again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObserverId(pub(crate) u64);

pub(crate) type Entries = Vec<(ObserverId, Box<dyn Observer>)>;

/// Registration-ordered list of observers
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Entries,
    /// Entries currently lent out to a notification pass
    lent: usize,
}

impl Observers {
    pub(crate) fn attach(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Attached observers, including any lent out for notification
    pub(crate) fn len(&self) -> usize {
        self.entries.len() + self.lent
    }

    /// Lend the entries out so they can be called with the game borrowed
    pub(crate) fn take_entries(&mut self) -> Entries {
        let entries = std::mem::take(&mut self.entries);
        self.lent = entries.len();
        entries
    }

    pub(crate) fn restore_entries(&mut self, entries: Entries) {
        self.lent = 0;
        self.entries = entries;
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("ids", &self.entries.iter().map(|(id, _)| id).collect::<Vec<_>>())
            .finish()
    }
}
