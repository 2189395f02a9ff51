use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use permablog::api::{BlogApi, ConfigAction};
use permablog::config::BlogConfig;
use permablog::error::{BlogError, Result};
use permablog::store::fs::FileStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod cli;

use args::{Cli, Commands, Request, ShellCommand, ShellLine};
use cli::print::{print_config, print_error, print_json, print_messages, print_report};
use cli::shell::split_words;

const HOME_ENV: &str = "PERMABLOG_HOME";
const PROMPT: &str = "Enter request: ";

fn main() {
    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BlogApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Request(request)) => handle_request(&mut ctx, request),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Shell) | None => handle_shell(&mut ctx),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "permablog=debug" } else { "permablog=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "permablog", "permablog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            BlogError::StoreUnavailable(format!(
                "could not determine a data directory; set {} or pass --data-dir",
                HOME_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    let config = BlogConfig::load(&dir)?;
    let store = FileStore::open(&dir)?.with_file_name(&config.collection);
    tracing::debug!(path = %store.path().display(), "store opened");

    Ok(AppContext {
        api: BlogApi::new(store, config, dir),
    })
}

fn handle_request(ctx: &mut AppContext, request: Request) -> Result<()> {
    let now = Utc::now();
    let result = match request {
        Request::Post(args) => ctx.api.create_post(args.validate(now)?)?,
        Request::Comment(args) => ctx.api.add_comment(args.validate(now)?)?,
        Request::Delete(args) => {
            let (permalink, user_name) = args.validate()?;
            ctx.api.delete_post(&permalink, &user_name)?
        }
        Request::View { permalink } => ctx.api.show_post(&permalink)?,
        Request::Show(args) => {
            let result = ctx.api.show_blog(&args.blog_name)?;
            if args.json {
                return print_json(&result.listed_posts);
            }
            result
        }
    };

    print_report(result.report.as_deref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Help and usage errors both land here.
                let _ = e.print();
                continue;
            }
        };

        match parsed.command {
            ShellCommand::Exit => return Ok(()),
            ShellCommand::Request(request) => {
                if let Err(e) = handle_request(ctx, request) {
                    print_error(&e);
                }
            }
        }
    }
}
