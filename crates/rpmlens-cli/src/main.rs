use std::{env, fs, path::PathBuf};

use clap::Parser;
use cli::{Args, Commands};
use logging::setup_logging;
use miette::IntoDiagnostic;
use rpmlens_config::{
    config::{self, generate_default_config, get_config, Config, LogConfig, CONFIG_PATH},
    utils::expand_path,
};
use rpmlens_core::{
    options::{ErrataFilters, ModuleStreamFilters, PackageListFilters, PageOptions},
    ContentIndex,
};
use query::Output;
use tracing::{debug, info, warn};
use utils::COLOR;

mod cli;
mod logging;
mod query;
mod utils;

fn page(offset: i64, limit: i64, sort_by: Option<String>) -> PageOptions {
    let page = PageOptions::new(offset, limit);
    match sort_by {
        Some(sort_by) => page.with_sort(sort_by),
        None => page,
    }
}

fn absolute(path: PathBuf) -> miette::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(env::current_dir().into_diagnostic()?.join(path))
}

fn print_config() -> miette::Result<()> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();
    let content = match fs::read_to_string(&config_path) {
        Ok(v) => v,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config file {} not found", config_path.display());
            toml::to_string_pretty(&get_config()).into_diagnostic()?
        }
        Err(err) => return Err(err).into_diagnostic(),
    };
    info!("{}", content);
    Ok(())
}

fn handle_cli() -> miette::Result<()> {
    let args = Args::parse();

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        config::set_config_path(absolute(expand_path(c))?);
    }

    let log = match args.command {
        Commands::DefConfig => LogConfig::default(),
        _ => {
            config::init()?;
            get_config().log
        }
    };
    setup_logging(&args, &log);

    let output = Output {
        json: args.json,
    };

    match args.command {
        Commands::DefConfig => {
            generate_default_config()?;
            return Ok(());
        }
        Commands::Config => return print_config(),
        Commands::Env => {
            let config: Config = get_config();
            info!("RPMLENS_CONFIG={}", CONFIG_PATH.read().unwrap().display());
            info!("RPMLENS_DB={}", config.get_db_path().display());
            return Ok(());
        }
        _ => {}
    }

    let config = get_config();
    let index = ContentIndex::from_config(&config)?;
    let (connections, idle) = index.pool().status();
    debug!(
        db = config.get_db_path().display().to_string().as_str(),
        pool_limit = config.pool_limit(),
        connections,
        idle,
        "opened content store"
    );

    match args.command {
        Commands::Packages {
            versions,
            search,
            limit,
        } => query::search_packages(&index, &versions.versions, &search, limit, output)?,
        Commands::Groups {
            versions,
            search,
            limit,
        } => query::search_groups(&index, &versions.versions, &search, limit, output)?,
        Commands::Environments {
            versions,
            search,
            limit,
        } => query::search_environments(&index, &versions.versions, &search, limit, output)?,
        Commands::List {
            versions,
            name,
            offset,
            limit,
            sort_by,
        } => {
            let filters = PackageListFilters {
                name,
            };
            query::list_packages(
                &index,
                &versions.versions,
                &filters,
                &page(offset, limit, sort_by),
                output,
            )?
        }
        Commands::Modules {
            versions,
            rpm_names,
            search,
            sort_by,
        } => {
            let filters = ModuleStreamFilters {
                rpm_names,
                search,
            };
            query::list_modules(&index, &versions.versions, &filters, &sort_by, output)?
        }
        Commands::Errata {
            versions,
            search,
            types,
            severities,
            offset,
            limit,
            sort_by,
        } => {
            let filters = ErrataFilters {
                search,
                types,
                severities,
            };
            query::list_errata(
                &index,
                &versions.versions,
                &filters,
                &page(offset, limit, sort_by),
                output,
            )?
        }
        Commands::Config | Commands::DefConfig | Commands::Env => unreachable!(),
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}
