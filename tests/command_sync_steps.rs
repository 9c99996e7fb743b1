//! BDD steps for registering declared commands with the platform.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::{Result, ensure, eyre};
use mockall::mock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use slashhook::command::adapters::immediate_handler;
use slashhook::command::domain::{
    ApplicationCommandSchema, Command, CommandRegistry, ParameterDeclaration, RegisteredCommand,
};
use slashhook::command::services::{CommandSynchronizer, SyncError, SyncReport};
use slashhook::interaction::adapters::RecordingRestClient;
use slashhook::interaction::domain::WebhookEditBody;
use slashhook::interaction::ports::{InteractionRestClient, RestError, RestResult};

mock! {
    Rest {}

    #[async_trait]
    impl InteractionRestClient for Rest {
        async fn create_global_command(
            &self,
            application_id: &str,
            schema: &ApplicationCommandSchema,
        ) -> RestResult<RegisteredCommand>;
        async fn delete_global_command(&self, application_id: &str, command_id: &str)
            -> RestResult<()>;
        async fn list_global_commands(&self, application_id: &str)
            -> RestResult<Vec<RegisteredCommand>>;
        async fn edit_original_response(
            &self,
            application_id: &str,
            token: &str,
            body: &WebhookEditBody,
        ) -> RestResult<()>;
    }
}

#[derive(Default)]
struct SyncWorld {
    registry: Option<Arc<CommandRegistry>>,
    recording: Option<Arc<RecordingRestClient>>,
    rest: Option<Arc<dyn InteractionRestClient>>,
    reports: Vec<SyncReport>,
    error: Option<SyncError>,
}

#[fixture]
fn world() -> SyncWorld {
    SyncWorld::default()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn declared(name: &str, parameters: Vec<ParameterDeclaration>) -> Result<Command> {
    let handler = immediate_handler(parameters, |ctx, _args| async move { Ok(ctx.reply("ok")) });
    Ok(Command::new(name, format!("{name} command"), handler)?)
}

fn remote(id: &str, name: &str) -> RegisteredCommand {
    RegisteredCommand {
        id: id.to_owned(),
        application_id: "app".to_owned(),
        name: name.to_owned(),
        description: format!("{name} command"),
        options: Vec::new(),
    }
}

fn use_recording(world: &mut SyncWorld, client: RecordingRestClient) {
    let shared = Arc::new(client);
    world.rest = Some(shared.clone());
    world.recording = Some(shared);
}

fn synchronise(world: &mut SyncWorld) -> Result<()> {
    let registry = world
        .registry
        .clone()
        .ok_or_else(|| eyre!("no registry declared"))?;
    let rest = world
        .rest
        .clone()
        .ok_or_else(|| eyre!("no platform configured"))?;
    match run_async(CommandSynchronizer::new(registry, rest).sync("app")) {
        Ok(report) => world.reports.push(report),
        Err(err) => world.error = Some(err),
    }
    Ok(())
}

fn recording(world: &SyncWorld) -> Result<&RecordingRestClient> {
    world
        .recording
        .as_deref()
        .ok_or_else(|| eyre!("platform is not recording"))
}

#[given("a registry declaring echo and add")]
fn registry_with_echo_and_add(world: &mut SyncWorld) -> Result<()> {
    let registry = CommandRegistry::builder()
        .command(declared(
            "echo",
            vec![ParameterDeclaration::of::<String>("message")],
        )?)
        .command(declared(
            "add",
            vec![
                ParameterDeclaration::of::<i64>("x"),
                ParameterDeclaration::of::<i64>("y"),
            ],
        )?)
        .build()?;
    world.registry = Some(Arc::new(registry));
    Ok(())
}

#[given("the platform already lists echo and a retired command")]
fn platform_with_stale_command(world: &mut SyncWorld) {
    use_recording(
        world,
        RecordingRestClient::with_remote_commands(vec![
            remote("100", "echo"),
            remote("101", "retired"),
        ]),
    );
}

#[given("the platform lists no commands")]
fn empty_platform(world: &mut SyncWorld) {
    use_recording(world, RecordingRestClient::new());
}

#[given("the platform rejects command listing")]
fn failing_platform(world: &mut SyncWorld) {
    let mut rest = MockRest::new();
    rest.expect_list_global_commands().returning(|_| {
        Err(RestError::Status {
            status: 403,
            body: "missing access".to_owned(),
        })
    });
    rest.expect_create_global_command().never();
    rest.expect_delete_global_command().never();
    world.rest = Some(Arc::new(rest));
}

#[when("the commands are synchronised")]
fn synchronise_once(world: &mut SyncWorld) -> Result<()> {
    synchronise(world)
}

#[when("the commands are synchronised twice")]
fn synchronise_twice(world: &mut SyncWorld) -> Result<()> {
    synchronise(world)?;
    synchronise(world)
}

#[then("the retired command is deleted")]
fn retired_deleted(world: &mut SyncWorld) -> Result<()> {
    let report = world.reports.first().ok_or_else(|| eyre!("no sync report"))?;
    ensure!(report.deleted == ["retired"], "deleted {:?}", report.deleted);
    ensure!(recording(world)?.deleted()? == ["101"], "wrong remote id deleted");
    Ok(())
}

#[then("echo and add are registered remotely")]
fn declared_registered(world: &mut SyncWorld) -> Result<()> {
    let mut names: Vec<_> = recording(world)?
        .remote_commands()?
        .into_iter()
        .map(|command| command.name)
        .collect();
    names.sort();
    ensure!(names == ["add", "echo"], "remote commands {names:?}");
    Ok(())
}

#[then("the second synchronisation deletes nothing")]
fn second_sync_idempotent(world: &mut SyncWorld) -> Result<()> {
    let second = world.reports.get(1).ok_or_else(|| eyre!("no second report"))?;
    ensure!(second.deleted.is_empty(), "deleted {:?}", second.deleted);
    Ok(())
}

#[then("synchronisation fails while listing")]
fn sync_failed_listing(world: &mut SyncWorld) -> Result<()> {
    ensure!(
        matches!(
            world.error,
            Some(SyncError::List(RestError::Status { status: 403, .. }))
        ),
        "unexpected outcome {:?}",
        world.error
    );
    Ok(())
}

#[scenario(
    path = "tests/features/command_sync.feature",
    name = "Stale remote commands are replaced"
)]
#[tokio::test(flavor = "multi_thread")]
async fn stale_commands_are_replaced(world: SyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/command_sync.feature",
    name = "Synchronising twice converges"
)]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_sync_converges(world: SyncWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/command_sync.feature",
    name = "Listing failure leaves the platform untouched"
)]
#[tokio::test(flavor = "multi_thread")]
async fn listing_failure_is_reported(world: SyncWorld) {
    let _ = world;
}
