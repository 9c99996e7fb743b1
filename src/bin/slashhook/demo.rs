//! Built-in demonstration commands.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use slashhook::command::adapters::{deferred_handler, immediate_handler};
use slashhook::command::domain::{
    ChoiceRestriction, Command, CommandModule, DeclaredType, Group, ParameterDeclaration,
    RegistryError,
};
use slashhook::command::ports::HandlerError;
use slashhook::interaction::domain::{
    ArgumentError, Channel, Embed, EmbedField, WebhookEditBody,
};

/// Delay before the `boo` command reveals itself.
pub const BOO_DELAY: Duration = Duration::from_secs(5);

const GREEN: u32 = 0x77_DD77;
const RED: u32 = 0xFF_6961;

const SERVERS: [(&str, &str); 4] = [
    ("saw", "coldwar"),
    ("gaw", "dcs"),
    ("pgaw", "pgaw"),
    ("tnn", "tnn"),
];

/// Builds the demo command module.
pub fn module() -> Result<CommandModule, RegistryError> {
    Ok(CommandModule::new("demo")
        .with_command(echo()?)
        .with_command(add()?)
        .with_command(boo(BOO_DELAY)?)
        .with_command(channel_info()?)
        .with_group(hoggit()?))
}

fn echo() -> Result<Command, RegistryError> {
    let handler = immediate_handler(
        [ParameterDeclaration::of::<String>("message")],
        |ctx, args| {
            let reply = args.string("message").map(|message| ctx.reply(message));
            async move { Ok(reply?) }
        },
    );
    Ok(Command::new(
        "echo",
        "It's like an echo chamber in here!",
        handler,
    )?)
}

fn add() -> Result<Command, RegistryError> {
    let handler = immediate_handler(
        [
            ParameterDeclaration::of::<i64>("x"),
            ParameterDeclaration::of::<i64>("y"),
        ],
        |ctx, args| {
            let sum = sum_arguments(args.integer("x"), args.integer("y"));
            async move { sum.map(|total| ctx.reply(total.to_string())) }
        },
    );
    Ok(Command::new("add", "add some numbers", handler)?)
}

fn sum_arguments(
    x: Result<i64, ArgumentError>,
    y: Result<i64, ArgumentError>,
) -> Result<i64, HandlerError> {
    x?.checked_add(y?)
        .ok_or_else(|| HandlerError::failed("sum does not fit in 64 bits"))
}

/// Builds the `boo` command, which answers after `delay`.
pub fn boo(delay: Duration) -> Result<Command, RegistryError> {
    let handler = deferred_handler([], move |ctx, _args| async move {
        tokio::time::sleep(delay).await;
        ctx.update_content("Boo!").await?;
        Ok(())
    });
    Ok(Command::new("boo", "Surprise", handler)?)
}

fn channel_info() -> Result<Command, RegistryError> {
    let handler = immediate_handler(
        [ParameterDeclaration::of::<Channel>("channel")],
        |ctx, args| {
            let reply = args.channel("channel").map(|channel| {
                tracing::debug!(
                    channel_id = %channel.id,
                    channel_name = %channel.name,
                    "channel info requested"
                );
                ctx.reply("Cool")
            });
            async move { Ok(reply?) }
        },
    );
    Ok(Command::new(
        "channel-info",
        "Get information about a channel",
        handler,
    )?)
}

fn hoggit() -> Result<Group, RegistryError> {
    let client = Client::new();
    let handler = deferred_handler(
        [ParameterDeclaration::choice(
            "server",
            ChoiceRestriction::new(DeclaredType::String, SERVERS),
        )],
        move |ctx, args| {
            let client = client.clone();
            let server = args.string("server").map(str::to_owned);
            async move {
                let status = fetch_status(&client, &server?).await?;
                ctx.update(&WebhookEditBody::embed(status.embed())).await?;
                Ok(())
            }
        },
    );
    let status = Command::new(
        "status",
        "Lookup the current status of a DCS server",
        handler,
    )?;
    Group::new("hoggit", "Commands relating to the hoggit community")?.with_command(status)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerStatus {
    players: u32,
    max_players: u32,
    #[serde(default)]
    metar: String,
    mission_name: String,
    server_name: String,
    uptime: f64,
}

impl ServerStatus {
    fn embed(&self) -> Embed {
        let color = if self.players >= self.max_players {
            RED
        } else {
            GREEN
        };
        let uptime =
            Duration::try_from_secs_f64(self.uptime).map_or(0, |elapsed| elapsed.as_secs());
        Embed::new()
            .with_title(&self.server_name)
            .with_description(&self.metar)
            .with_color(color)
            .with_field(EmbedField::inline(
                "Players",
                format!("{}/{}", self.players, self.max_players),
            ))
            .with_field(EmbedField::inline("Mission", &self.mission_name))
            .with_field(EmbedField::new("Uptime", format_uptime(uptime)))
    }
}

async fn fetch_status(client: &Client, server: &str) -> Result<ServerStatus, HandlerError> {
    client
        .get(format!("https://{server}.hoggitworld.com/"))
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(HandlerError::other)?
        .json()
        .await
        .map_err(HandlerError::other)
}

/// Formats seconds as `H:MM:SS`, prefixed with whole days when present.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds.div_euclid(86_400);
    let hours = seconds.rem_euclid(86_400).div_euclid(3_600);
    let minutes = seconds.rem_euclid(3_600).div_euclid(60);
    let secs = seconds.rem_euclid(60);
    match days {
        0 => format!("{hours}:{minutes:02}:{secs:02}"),
        1 => format!("1 day, {hours}:{minutes:02}:{secs:02}"),
        _ => format!("{days} days, {hours}:{minutes:02}:{secs:02}"),
    }
}
