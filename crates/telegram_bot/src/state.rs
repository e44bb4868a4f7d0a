use std::{collections::HashMap, sync::Arc};

use engine::Money;
use teloxide::types::{ChatId, UserId};
use tokio::sync::{Mutex, MutexGuard};

/// Where a user is in a multi-step interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SessionState {
    AwaitingCategory,
    AwaitingAmount { category: String },
    AwaitingComment { category: String, amount: Money },
    AwaitingSpecificQuery,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    /// Chat the interaction was started in.
    pub chat_id: ChatId,
    pub state: SessionState,
}

/// Open sessions, at most one per user.
#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<Mutex<HashMap<UserId, Session>>>,
}

impl SessionStore {
    /// Locks the whole table. Hold the guard for the full handling of an
    /// update so transitions are applied one at a time.
    pub(crate) async fn lock(&self) -> SessionTable<'_> {
        SessionTable {
            guard: self.inner.lock().await,
        }
    }

    #[cfg(test)]
    pub(crate) async fn get(&self, user_id: UserId) -> Option<Session> {
        self.inner.lock().await.get(&user_id).cloned()
    }
}

pub(crate) struct SessionTable<'a> {
    guard: MutexGuard<'a, HashMap<UserId, Session>>,
}

impl SessionTable<'_> {
    /// Opens a session for `user_id`, replacing any previous one.
    pub(crate) fn open(&mut self, user_id: UserId, session: Session) -> Option<Session> {
        self.guard.insert(user_id, session)
    }

    pub(crate) fn take(&mut self, user_id: UserId) -> Option<Session> {
        self.guard.remove(&user_id)
    }

    /// Another user with an open session, in any chat.
    pub(crate) fn other_owner(&self, user_id: UserId) -> Option<UserId> {
        self.guard.keys().find(|owner| **owner != user_id).copied()
    }
}
