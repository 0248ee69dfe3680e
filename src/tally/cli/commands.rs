use super::render::{print_inventory, print_messages};
use super::setup::{init_logging, Cli, Commands};
use super::shell;
use clap::Parser;
use tally::api::{ConfigAction, TallyApi};
use tally::config::TallyConfig;
use tally::error::{Result, TallyError};
use tally::init::{initialize, resolve_data_dir, HOME_ENV};
use tally::session::{Event, EventOutcome, Session};
use tally::store::fs::FileStore;
use tally::view::{SortDirective, ViewState};

struct AppContext {
    api: TallyApi<FileStore>,
    config: TallyConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !console::Term::stdout().is_term() {
        colored::control::set_override(false);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name }) => handle_mutation(ctx, Event::Add(name.join(" "))),
        Some(Commands::Remove { name }) => handle_mutation(ctx, Event::Decrement(name.join(" "))),
        Some(Commands::List { search, sort }) => handle_list(&ctx, search, sort),
        Some(Commands::Shell) => handle_shell(ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, None, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let env_home = std::env::var(HOME_ENV).ok();
    let data_dir = resolve_data_dir(cli.dir.as_deref(), env_home.as_deref())?;
    let ctx = initialize(data_dir)?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn view_state(
    config: &TallyConfig,
    search: Option<String>,
    sort: Option<String>,
) -> Result<ViewState> {
    let sort = match sort {
        Some(raw) => raw.parse::<SortDirective>()?,
        None => config.default_sort,
    };
    Ok(ViewState::new(search.unwrap_or_default(), sort))
}

/// One-shot add/remove. Store failures are logged by the session; here they
/// only decide the exit code.
fn handle_mutation(ctx: AppContext, event: Event) -> Result<()> {
    let mut session = Session::new(ctx.api, ViewState::default());
    match session.dispatch(event) {
        EventOutcome::Applied(Some(result)) => {
            print_messages(&result.messages);
            Ok(())
        }
        EventOutcome::Applied(None) => Ok(()),
        EventOutcome::Ignored => Err(TallyError::Api("Item name cannot be empty".into())),
        EventOutcome::Failed(e) => Err(e),
    }
}

fn handle_list(ctx: &AppContext, search: Option<String>, sort: Option<String>) -> Result<()> {
    let state = view_state(&ctx.config, search, sort)?;
    let result = ctx.api.list_items(&state)?;
    print_inventory(&state, &result.listed_items);
    print_messages(&result.messages);
    Ok(())
}

fn handle_shell(ctx: AppContext) -> Result<()> {
    let state = ViewState::new("", ctx.config.default_sort);
    let mut session = Session::new(ctx.api, state);
    shell::run(&mut session)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        for key in TallyConfig::KEYS {
            if let Some(value) = config.get(key) {
                println!("{} = {}", key, value);
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
