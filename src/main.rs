#![deny(warnings)]

use anyhow::{Context, anyhow};
use clap::{
    Arg, ArgAction, ArgGroup, ArgMatches, Command, crate_authors, crate_description, crate_version,
    value_parser,
};
use serde::Serialize;
use std::{env, fs};
use tenablevm::{
    api::Api,
    client::Client,
    config::{Config, RawConfig},
    lookup::Selector,
    users::{DEFAULT_ACCOUNT_TYPE, UserId, UserSpec, UserUpdate},
};
use tracing::info;

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("Tenable VM management client")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("CONFIG")
                .env("TENABLEVM_CONFIG")
                .short('c')
                .long("config")
                .global(true)
                .default_value("tenablevm.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("ACCESS_KEY")
                .long("access-key")
                .global(true)
                .help("API access key, overrides the configured one."),
        )
        .arg(
            Arg::new("SECRET_KEY")
                .long("secret-key")
                .global(true)
                .help("API secret key, overrides the configured one."),
        )
        .subcommand(users_command())
        .subcommand(lookup_command("roles", "role", "Manages roles."))
        .subcommand(lookup_command("groups", "group", "Manages groups."))
        .get_matches();

    let mut raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    // CLI arguments take precedence.
    if let Some(access_key) = matches.get_one::<String>("ACCESS_KEY") {
        raw_config.credentials.access_key = Some(access_key.clone());
    }
    if let Some(secret_key) = matches.get_one::<String>("SECRET_KEY") {
        raw_config.credentials.secret_key = Some(secret_key.clone());
    }

    info!("Tenable VM raw configuration: {raw_config:?}.");

    let config = Config::try_from(raw_config)?;
    let api = Api::new(Client::from_config(&config)?);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Cannot build async runtime.")?
        .block_on(run(api, matches))
}

async fn run(api: Api, matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("users", matches)) => run_users(&api, matches).await,
        Some(("roles", matches)) => match matches.subcommand() {
            Some(("list", _)) => print_json(&api.roles().list_roles().await?),
            Some(("get", matches)) => {
                print_json(&api.roles().find_role(&selector(matches, "NAME")?).await?)
            }
            _ => Err(anyhow!("Unknown roles command.")),
        },
        Some(("groups", matches)) => match matches.subcommand() {
            Some(("list", _)) => print_json(&api.groups().list_groups().await?),
            Some(("get", matches)) => {
                print_json(&api.groups().find_group(&selector(matches, "NAME")?).await?)
            }
            _ => Err(anyhow!("Unknown groups command.")),
        },
        _ => Err(anyhow!("Unknown command.")),
    }
}

async fn run_users(api: &Api, matches: &ArgMatches) -> anyhow::Result<()> {
    let reconciler = api.user_reconciler();
    match matches.subcommand() {
        Some(("list", _)) => print_json(&api.users().list_users().await?),
        Some(("get", matches)) => {
            print_json(&api.users().find_user(&selector(matches, "USERNAME")?).await?)
        }
        Some(("create", matches)) => {
            let spec = UserSpec {
                password: matches.get_one::<String>("PASSWORD").cloned(),
                name: matches.get_one::<String>("NAME").cloned(),
                email: matches.get_one::<String>("EMAIL").cloned(),
                account_type: matches
                    .get_one::<String>("TYPE")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_ACCOUNT_TYPE.to_string()),
                enabled: !matches.get_flag("DISABLED"),
                ..UserSpec::new(required::<String>(matches, "USERNAME")?, permissions(matches)?)
            };
            print_json(&reconciler.create(&spec).await?)
        }
        Some(("update", matches)) => {
            let update = UserUpdate {
                permissions: matches.get_one::<i64>("PERMISSIONS").copied(),
                name: matches.get_one::<String>("NAME").cloned(),
                email: matches.get_one::<String>("EMAIL").cloned(),
                enabled: matches.get_one::<bool>("ENABLED").copied(),
            };
            print_json(&reconciler.update(user_id(matches)?, &update).await?)
        }
        Some(("delete", matches)) => reconciler.delete(user_id(matches)?).await,
        Some(("set-enabled", matches)) => {
            reconciler
                .set_enabled(user_id(matches)?, required::<bool>(matches, "ENABLED")?)
                .await
        }
        Some(("apply", matches)) => {
            let path = required::<String>(matches, "FILE")?;
            let spec: UserSpec = serde_json::from_str(
                &fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read desired user state ({path})."))?,
            )
            .with_context(|| format!("Cannot parse desired user state ({path})."))?;
            let id = matches
                .get_one::<String>("ID")
                .map(|id| id.parse::<UserId>())
                .transpose()?;
            print_json(&reconciler.apply(id, &spec).await?)
        }
        _ => Err(anyhow!("Unknown users command.")),
    }
}

fn users_command() -> Command {
    let id_arg = || {
        Arg::new("ID")
            .long("id")
            .required(true)
            .help("Numeric id of the user.")
    };

    Command::new("users")
        .about("Manages users.")
        .subcommand_required(true)
        .subcommand(Command::new("list").about("Lists all users."))
        .subcommand(
            Command::new("get")
                .about("Finds user by id or username.")
                .arg(Arg::new("ID").long("id").help("Numeric id of the user."))
                .arg(
                    Arg::new("USERNAME")
                        .long("username")
                        .help("Username, compared case-insensitively."),
                )
                .group(ArgGroup::new("selector").args(["ID", "USERNAME"]).required(true)),
        )
        .subcommand(
            Command::new("create")
                .about("Creates a new user.")
                .arg(Arg::new("USERNAME").long("username").required(true))
                .arg(Arg::new("PASSWORD").long("password"))
                .arg(permissions_arg().required(true))
                .arg(Arg::new("NAME").long("name"))
                .arg(Arg::new("EMAIL").long("email"))
                .arg(Arg::new("TYPE").long("type").help("Account type, `local` by default."))
                .arg(
                    Arg::new("DISABLED")
                        .long("disabled")
                        .action(ArgAction::SetTrue)
                        .help("Creates the user in disabled state."),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Updates mutable fields of the user.")
                .arg(id_arg())
                .arg(permissions_arg())
                .arg(Arg::new("NAME").long("name"))
                .arg(Arg::new("EMAIL").long("email"))
                .arg(enabled_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Deletes the user.")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("set-enabled")
                .about("Enables or disables the user.")
                .arg(id_arg())
                .arg(enabled_arg().required(true)),
        )
        .subcommand(
            Command::new("apply")
                .about("Converges the user towards the desired state read from a JSON file.")
                .arg(
                    Arg::new("FILE")
                        .long("file")
                        .required(true)
                        .help("Path to the JSON file with the desired user state."),
                )
                .arg(
                    Arg::new("ID")
                        .long("id")
                        .help("Numeric id of the existing user, if any."),
                ),
        )
}

fn lookup_command(name: &'static str, record: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(Command::new("list").about(format!("Lists all {name}.")))
        .subcommand(
            Command::new("get")
                .about(format!("Finds {record} by id or name."))
                .arg(Arg::new("ID").long("id").help(format!("Numeric id of the {record}.")))
                .arg(
                    Arg::new("NAME")
                        .long("name")
                        .help(format!("Name of the {record}, compared case-insensitively.")),
                )
                .group(ArgGroup::new("selector").args(["ID", "NAME"]).required(true)),
        )
}

fn permissions_arg() -> Arg {
    Arg::new("PERMISSIONS")
        .long("permissions")
        .value_parser(value_parser!(i64))
        .help("Numeric permissions level.")
}

fn enabled_arg() -> Arg {
    Arg::new("ENABLED")
        .long("enabled")
        .value_parser(value_parser!(bool))
        .help("Whether the user is enabled (`true` or `false`).")
}

fn selector(matches: &ArgMatches, name_arg: &str) -> anyhow::Result<Selector> {
    Selector::from_parts(
        matches.get_one::<String>("ID").map(String::as_str),
        matches.get_one::<String>(name_arg).map(String::as_str),
    )
}

fn user_id(matches: &ArgMatches) -> anyhow::Result<UserId> {
    required::<String>(matches, "ID")?.parse()
}

fn permissions(matches: &ArgMatches) -> anyhow::Result<i64> {
    required::<i64>(matches, "PERMISSIONS")
}

fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> anyhow::Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("<{id}> argument is not provided."))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Cannot serialize output.")?
    );
    Ok(())
}
