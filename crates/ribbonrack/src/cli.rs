use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rack_catalog::PrecedenceCatalog;
use rack_core::GridOrigin;

use crate::commands;
use crate::config::{ConfigOverrides, RackConfig};
use crate::error::Result;
use crate::logging::{self, LogTarget};
use crate::terminal::run_interactive;

#[derive(Debug, Parser)]
#[command(
    name = "ribbonrack",
    about = "Arrange military ribbons on a rack in order of precedence",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Precedence catalog JSON.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Root directory of ribbon images.
    #[arg(long, global = true)]
    pub images: Option<PathBuf>,

    /// Branch to open.
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Ribbons per rack row.
    #[arg(long, global = true)]
    pub grid_width: Option<usize>,

    /// Corner the rack fills from: top-left, top-right, bottom-left, bottom-right.
    #[arg(long, global = true)]
    pub origin: Option<GridOrigin>,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            catalog_path: self.catalog.clone(),
            image_dir: self.images.clone(),
            branch: self.branch.clone(),
            grid_width: self.grid_width,
            grid_origin: self.origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Open the interactive selector (the default).
    Run,

    /// List catalog branches with their ribbon counts.
    Branches,

    /// Print the configured branch in precedence order.
    Precedence,

    /// Print the rack for a set of ribbons without opening the UI.
    Rack {
        /// Ribbon to place; repeat for each ribbon.
        #[arg(long = "select", required = true)]
        select: Vec<String>,
    },
}

/// Effective configuration: file (if any), then command-line overrides.
///
/// # Errors
///
/// Unreadable or malformed config file, or an invalid result.
pub fn resolve_config(global: &GlobalArgs) -> Result<RackConfig> {
    let mut config = RackConfig::load(global.config.as_deref())?;
    config.apply(global.overrides());
    config.validate()?;
    Ok(config)
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli.global)?;
    let command = cli.command.unwrap_or(Commands::Run);
    let target = match command {
        Commands::Run => LogTarget::File(config.log.file.clone()),
        _ => LogTarget::Stderr,
    };
    logging::init(&config.log, target)?;
    run(&command, &config, &mut std::io::stdout().lock())
}

/// Dispatch `command` against `config`, printing to `out`.
///
/// # Errors
///
/// Whatever the command fails with.
pub fn run(command: &Commands, config: &RackConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Run => run_interactive(config),
        Commands::Branches => {
            let catalog = PrecedenceCatalog::load_file(&config.catalog_path)?;
            commands::branches(&catalog, out)
        }
        Commands::Precedence => {
            let catalog = PrecedenceCatalog::load_file(&config.catalog_path)?;
            commands::precedence(&catalog, config, out)
        }
        Commands::Rack { select } => {
            let catalog = PrecedenceCatalog::load_file(&config.catalog_path)?;
            commands::rack(&catalog, config, select, out)
        }
    }
}
