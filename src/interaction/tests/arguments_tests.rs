//! Unit tests for argument extraction and typed accessors.

use rstest::{fixture, rstest};
use serde_json::json;

use crate::command::adapters::immediate_handler;
use crate::command::domain::{Command, ParameterDeclaration};
use crate::interaction::domain::{
    ArgumentError, ArgumentValue, Channel, ChannelType, CommandArguments, ExtractionError,
    ResolvedData, Role, SubmittedOption, User, extract_arguments,
};

/// `inspect(who: User, place: Channel, role: Role, note: str = "none")`.
#[fixture]
fn inspect() -> Command {
    let handler = immediate_handler(
        [
            ParameterDeclaration::of::<User>("who"),
            ParameterDeclaration::of::<Channel>("place"),
            ParameterDeclaration::of::<Role>("role"),
            ParameterDeclaration::of::<String>("note").with_default("none"),
        ],
        |ctx, _args| async move { Ok(ctx.reply("ok")) },
    );
    Command::new("inspect", "Inspect things", handler).expect("command should compile")
}

fn zed() -> User {
    User {
        id: "5".to_owned(),
        username: "zed".to_owned(),
        discriminator: "0001".to_owned(),
        public_flags: 0,
        bot: false,
        avatar: None,
    }
}

fn general() -> Channel {
    Channel {
        id: "9".to_owned(),
        name: "general".to_owned(),
        permissions: String::new(),
        kind: ChannelType::GuildText,
    }
}

#[fixture]
fn resolved() -> ResolvedData {
    let mut resolved = ResolvedData::default();
    resolved.users.insert("5".to_owned(), zed());
    resolved.channels.insert("9".to_owned(), general());
    resolved
}

fn submitted(user_id: &str) -> Vec<SubmittedOption> {
    vec![
        SubmittedOption::value("who", user_id),
        SubmittedOption::value("place", "9"),
        SubmittedOption::value("role", "77"),
    ]
}

#[rstest]
fn entities_are_replaced_with_resolved_objects(inspect: Command, resolved: ResolvedData) {
    let arguments =
        extract_arguments(&inspect, &submitted("5"), &resolved).expect("extraction succeeds");

    assert_eq!(arguments.user("who"), Ok(&zed()));
    assert_eq!(arguments.channel("place"), Ok(&general()));
    assert_eq!(arguments.snowflake("role"), Ok("77"));
    assert_eq!(arguments.snowflake("who"), Ok("5"));
}

#[rstest]
fn absent_optional_takes_its_default(inspect: Command, resolved: ResolvedData) {
    let arguments =
        extract_arguments(&inspect, &submitted("5"), &resolved).expect("extraction succeeds");

    assert_eq!(arguments.string("note"), Ok("none"));
    assert_eq!(arguments.len(), 4);
}

#[rstest]
fn submitted_optional_overrides_default(inspect: Command, resolved: ResolvedData) {
    let mut options = submitted("5");
    options.push(SubmittedOption::value("note", "be nice"));

    let arguments = extract_arguments(&inspect, &options, &resolved).expect("extraction succeeds");

    assert_eq!(arguments.string("note"), Ok("be nice"));
}

#[rstest]
fn unresolved_user_is_an_inconsistency(inspect: Command, resolved: ResolvedData) {
    let error = extract_arguments(&inspect, &submitted("6"), &resolved)
        .expect_err("user 6 is not in the resolved table");

    assert_eq!(
        error,
        ExtractionError::UnresolvedEntity {
            option: "who".to_owned(),
            id: "6".to_owned(),
        }
    );
}

#[rstest]
fn missing_required_option_is_reported(inspect: Command, resolved: ResolvedData) {
    let options = [SubmittedOption::value("who", "5")];

    let error =
        extract_arguments(&inspect, &options, &resolved).expect_err("place is required");

    assert_eq!(
        error,
        ExtractionError::MissingRequired {
            option: "place".to_owned(),
        }
    );
}

#[rstest]
fn undeclared_options_are_ignored(inspect: Command, resolved: ResolvedData) {
    let mut options = submitted("5");
    options.push(SubmittedOption::value("extra", 1));

    let arguments = extract_arguments(&inspect, &options, &resolved).expect("extraction succeeds");

    assert!(!arguments.contains("extra"));
}

#[rstest]
#[case::string_as_integer("text", ArgumentValue::Value(json!("a")), "integer")]
#[case::integer_as_string("text", ArgumentValue::Value(json!(3)), "string")]
#[case::value_as_user("text", ArgumentValue::Value(json!("5")), "user")]
fn accessor_rejects_other_types(
    #[case] name: &str,
    #[case] value: ArgumentValue,
    #[case] wanted: &str,
) {
    let arguments = CommandArguments::new().with(name, value);

    let error = match wanted {
        "integer" => arguments.integer(name).err(),
        "string" => arguments.string(name).err(),
        _ => arguments.user(name).err(),
    };

    assert!(matches!(
        error,
        Some(ArgumentError::TypeMismatch { expected, .. }) if expected == wanted
    ));
}

#[rstest]
fn accessor_reports_missing_argument() {
    let arguments = CommandArguments::new();

    assert_eq!(
        arguments.boolean("flag"),
        Err(ArgumentError::Missing {
            name: "flag".to_owned(),
        })
    );
}
