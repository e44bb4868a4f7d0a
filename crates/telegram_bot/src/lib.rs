//! Telegram bot.
//!
//! Walks users through recording an expense in a few messages and answers
//! monthly or filtered totals. Storage is reached only through
//! [`engine::ExpenseStore`].

use std::sync::Arc;

use chrono_tz::Tz;
use engine::ExpenseStore;
use teloxide::prelude::*;

pub use commands::{Command, parse_command};
pub use dispatcher::{Body, Inbound, UpdateDispatcher};
pub use ui::{Keyboard, Reply};

mod commands;
mod conversation;
mod dispatcher;
mod handlers;
mod parsing;
mod state;
#[cfg(test)]
mod testing;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    dispatcher: Arc<UpdateDispatcher>,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    timezone: Tz,
    store: Arc<dyn ExpenseStore>,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot.set_my_commands(commands::bot_commands()).await {
            tracing::warn!("failed to register bot commands: {err}");
        }

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            dispatcher: Arc::new(UpdateDispatcher::new(self.store.clone(), self.timezone)),
        };

        let handler =
            dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::debug!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    timezone: Option<Tz>,
    store: Option<Arc<dyn ExpenseStore>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// Telegram user ids allowed to talk to the bot. Empty means everyone.
    pub fn allowed_users(mut self, allowed_users: Vec<u64>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users.into_iter().map(UserId).collect());
        }
        self
    }

    /// Time zone that decides what "this month" is.
    pub fn timezone(mut self, timezone: Tz) -> BotBuilder {
        self.timezone = Some(timezone);
        self
    }

    pub fn store(mut self, store: Arc<dyn ExpenseStore>) -> BotBuilder {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.is_empty() {
            return Err("missing telegram token".to_string());
        }
        let store = self
            .store
            .ok_or_else(|| "missing expense store".to_string())?;

        Ok(Bot {
            token: self.token,
            allowed_users: self.allowed_users,
            timezone: self.timezone.unwrap_or(Tz::UTC),
            store,
        })
    }
}
