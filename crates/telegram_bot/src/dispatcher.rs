//! Routes inbound updates to commands or to the sender's open session.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use engine::{ExpenseFilter, ExpenseStore};
use teloxide::types::{ChatId, UserId};

use crate::{
    commands::{Command, parse_command},
    conversation::{self, Context},
    state::{Session, SessionState, SessionStore, SessionTable},
    ui::{self, Keyboard, Reply},
};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A text message as seen by the bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inbound {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Command(Command),
    Text(String),
}

impl Inbound {
    /// Classifies `text` as a command or free text.
    pub fn from_text(user_id: UserId, chat_id: ChatId, text: &str) -> Self {
        let body = match parse_command(text) {
            Some(cmd) => Body::Command(cmd),
            None => Body::Text(text.to_string()),
        };
        Self {
            user_id,
            chat_id,
            body,
        }
    }
}

pub struct UpdateDispatcher {
    sessions: SessionStore,
    store: Arc<dyn ExpenseStore>,
    timezone: Tz,
    clock: Clock,
}

impl UpdateDispatcher {
    pub fn new(store: Arc<dyn ExpenseStore>, timezone: Tz) -> Self {
        Self {
            sessions: SessionStore::default(),
            store,
            timezone,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the source of "now" used by `/month`.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Handles one update and returns the replies for its chat.
    pub async fn dispatch(&self, inbound: Inbound) -> Vec<Reply> {
        let mut sessions = self.sessions.lock().await;
        match inbound.body {
            Body::Command(cmd) => {
                self.on_command(&mut sessions, inbound.user_id, inbound.chat_id, cmd)
                    .await
            }
            Body::Text(text) => {
                self.on_text(&mut sessions, inbound.user_id, inbound.chat_id, &text)
                    .await
            }
        }
    }

    async fn on_command(
        &self,
        sessions: &mut SessionTable<'_>,
        user_id: UserId,
        chat_id: ChatId,
        cmd: Command,
    ) -> Vec<Reply> {
        tracing::debug!(user = user_id.0, chat = chat_id.0, ?cmd, "command");
        match cmd {
            Command::New => {
                sessions.open(
                    user_id,
                    Session {
                        chat_id,
                        state: SessionState::AwaitingCategory,
                    },
                );
                vec![Reply::text(ui::ASK_CATEGORY).with_keyboard(Keyboard::Categories)]
            }
            Command::MonthSpecific => {
                sessions.open(
                    user_id,
                    Session {
                        chat_id,
                        state: SessionState::AwaitingSpecificQuery,
                    },
                );
                vec![Reply::text(ui::ASK_QUERY).with_keyboard(Keyboard::Remove)]
            }
            Command::Cancel => {
                sessions.take(user_id);
                vec![Reply::text(ui::CANCELLED).with_keyboard(Keyboard::Remove)]
            }
            Command::Month => {
                let now = (self.clock)().with_timezone(&self.timezone);
                let filter = ExpenseFilter::month(now.year(), now.month());
                vec![conversation::summary(self.store.as_ref(), &filter).await]
            }
            Command::Help | Command::Unknown(_) => vec![Reply::text(ui::help_text())],
        }
    }

    async fn on_text(
        &self,
        sessions: &mut SessionTable<'_>,
        user_id: UserId,
        chat_id: ChatId,
        text: &str,
    ) -> Vec<Reply> {
        let Some(session) = sessions.take(user_id) else {
            if let Some(owner) = sessions.other_owner(user_id) {
                tracing::warn!(
                    user = user_id.0,
                    owner = owner.0,
                    chat = chat_id.0,
                    "text from a user while another user's session is open"
                );
                return vec![Reply::text(ui::NOT_YOU)];
            }
            return Vec::new();
        };

        let ctx = Context {
            user_id,
            store: self.store.as_ref(),
        };
        let step = conversation::advance(session.state, text, &ctx).await;
        if let Some(state) = step.next {
            sessions.open(
                user_id,
                Session {
                    chat_id: session.chat_id,
                    state,
                },
            );
        }
        step.replies
    }

    #[cfg(test)]
    pub(crate) fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
