use teloxide::{
    prelude::*,
    types::{ChatId, KeyboardRemove, User},
};

use crate::{
    ConfigParameters,
    dispatcher::Inbound,
    ui::{self, Keyboard, Reply},
};

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, msg.from.as_ref()) {
        if let Some(from) = msg.from.as_ref() {
            tracing::warn!(user = from.id.0, "message from a user not in the allow list");
        }
        return Ok(());
    }

    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let inbound = Inbound::from_text(from.id, chat_id, text);
    for reply in cfg.dispatcher.dispatch(inbound).await {
        send_reply(&bot, chat_id, reply).await?;
    }

    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.keyboard {
        Keyboard::Unchanged => request.await?,
        Keyboard::Categories => request.reply_markup(ui::category_keyboard()).await?,
        Keyboard::Remove => request.reply_markup(KeyboardRemove::new()).await?,
    };
    Ok(())
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    }
}
