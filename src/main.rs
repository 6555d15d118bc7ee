use framed::{config::Config, handler::Handler, log_internal};
use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load().await?;
    let token = cfg.general.discord_token.clone();
    log_internal!(
        "Loaded configuration, prefixes: {:?}",
        cfg.general.command_prefixes
    );
    let handler = Handler::new(cfg);

    // Commands arrive as messages, in servers or DMs.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
