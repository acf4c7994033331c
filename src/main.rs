use anyhow::{anyhow, Context, Result};
use catalog_client::app::{App, Command};
use catalog_client::catalog::ResourceKind;
use catalog_client::config::Config;
use catalog_client::logger;
use clap::{App as Cli, AppSettings, Arg, ArgMatches, SubCommand};

fn main() -> Result<()> {
    let kind_arg = || {
        Arg::with_name("kind")
            .help("Entity kind: users, artists, albums or musics")
            .required(true)
            .possible_values(&["users", "artists", "albums", "musics"])
    };

    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Overrides the configured API base URL")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Fetch one page of a listing")
                .arg(kind_arg())
                .arg(
                    Arg::with_name("page")
                        .short("p")
                        .long("page")
                        .takes_value(true)
                        .default_value("1"),
                ),
        )
        .subcommand(
            SubCommand::with_name("all")
                .about("Fetch a full unpaginated listing")
                .arg(kind_arg()),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("Fetch a single record")
                .arg(kind_arg())
                .arg(Arg::with_name("id").required(true)),
        )
        .subcommand(SubCommand::with_name("profile").about("Fetch the signed-in profile"))
        .subcommand(
            SubCommand::with_name("unassigned").about("Fetch artists without a manager"),
        )
        .subcommand(
            SubCommand::with_name("my-artists").about("Fetch artists you manage"),
        )
        .subcommand(
            SubCommand::with_name("route")
                .about("Resolve a dashboard path through the login guard")
                .arg(Arg::with_name("path").required(true))
                .arg(
                    Arg::with_name("logged-in")
                        .long("logged-in")
                        .help("Navigate as a signed-in user"),
                ),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("base-url") {
        config.base_url = url.to_owned();
    }
    logger::init(config.log_level()?)?;

    let command = command(&matches)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    let app = App::new(&config);
    let output = runtime.block_on(app.run(command))?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Translate the parsed subcommand into an application command.
///
fn command(matches: &ArgMatches) -> Result<Command> {
    Ok(match matches.subcommand() {
        ("list", Some(m)) => Command::List {
            kind: kind(m)?,
            page: m
                .value_of("page")
                .unwrap_or("1")
                .parse()
                .context("page must be a positive number")?,
        },
        ("all", Some(m)) => Command::All { kind: kind(m)? },
        ("show", Some(m)) => Command::Show {
            kind: kind(m)?,
            id: m.value_of("id").unwrap_or_default().to_owned(),
        },
        ("profile", _) => Command::Profile,
        ("unassigned", _) => Command::Unassigned,
        ("my-artists", _) => Command::MyArtists,
        ("route", Some(m)) => Command::Route {
            path: m.value_of("path").unwrap_or("/").to_owned(),
            logged_in: m.is_present("logged-in"),
        },
        (other, _) => return Err(anyhow!("unknown command '{}'", other)),
    })
}

fn kind(matches: &ArgMatches) -> Result<ResourceKind> {
    matches
        .value_of("kind")
        .unwrap_or_default()
        .parse()
        .map_err(|e: String| anyhow!(e))
}
