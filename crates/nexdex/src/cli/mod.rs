//! Command-line interface: argument definitions and command dispatch.

pub mod validators;

mod compare;
mod cycles;
mod list;
mod paths;
mod scenarios;
mod simulate;
mod validate;
mod worst_case;

use crate::output::OutputConfig;
use crate::store::ScenarioStore;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use nexdex_core::DependencyGraph;
use std::path::PathBuf;

/// NexDex: simulate service failures and trace their business impact.
#[derive(Debug, Parser)]
#[command(name = "nexdex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Service dependency configuration (JSON, or YAML by extension)
    #[arg(short, long, global = true, default_value = "services.json")]
    pub config: PathBuf,

    /// Directory holding saved scenarios
    #[arg(long, global = true, default_value = "scenarios")]
    pub scenarios_dir: PathBuf,

    /// Override a business process importance (repeatable, NAME=SCORE with SCORE 1-10)
    #[arg(
        long = "process-importance",
        value_name = "NAME=SCORE",
        global = true,
        value_parser = validators::parse_process_importance
    )]
    pub process_importance: Vec<(String, i64)>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List services with graph statistics
    List,

    /// Check for dangling dependency references and cycles
    Validate,

    /// Show every circular dependency
    Cycles,

    /// Simulate the failure of one or more services
    Simulate {
        /// Services that fail simultaneously
        #[arg(required = true, value_parser = validators::validate_service_name)]
        services: Vec<String>,

        /// Apply the peak-hours multiplier to the total impact
        #[arg(long)]
        peak_hours: bool,

        /// Save the failure set as a named scenario
        #[arg(long, value_name = "NAME", value_parser = validators::validate_scenario_name)]
        save: Option<String>,

        /// Description stored with a saved scenario
        #[arg(long, requires = "save")]
        description: Option<String>,

        /// Tags stored with a saved scenario (repeatable)
        #[arg(long = "tag", requires = "save")]
        tags: Vec<String>,

        /// Print the raw simulation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the shortest cascade path from a service to everything it affects
    Paths {
        /// Service whose failure is traced
        #[arg(value_parser = validators::validate_service_name)]
        service: String,
    },

    /// Find the single service whose failure hurts the most
    WorstCase,

    /// Compare two saved scenarios
    Compare {
        /// First scenario (A)
        #[arg(value_parser = validators::validate_scenario_name)]
        scenario_a: String,

        /// Second scenario (B)
        #[arg(value_parser = validators::validate_scenario_name)]
        scenario_b: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved scenarios
    Scenarios {
        /// Only show scenarios with this tag (case-insensitive)
        #[arg(long)]
        tag: Option<String>,
    },

    /// Run a saved scenario
    Run {
        /// Scenario name
        #[arg(value_parser = validators::validate_scenario_name)]
        scenario: String,

        /// Print the raw simulation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run every scenario file matched by the given paths or directories
    Batch {
        /// Scenario files, or directories whose *.json files are all run
        #[arg(required = true)]
        patterns: Vec<PathBuf>,
    },
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Path of the service configuration.
    pub config: PathBuf,
    /// Scenario storage.
    pub store: ScenarioStore,
    /// Business process overrides applied after loading.
    pub process_importance: Vec<(String, i64)>,
    /// Output formatting.
    pub output: OutputConfig,
}

impl Context {
    /// Load the configured graph and apply the process overrides.
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot be read or is malformed.
    pub fn load_graph(&self) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        graph
            .load_from_path(&self.config)
            .with_context(|| format!("failed to load services from {}", self.config.display()))?;

        for (process, score) in &self.process_importance {
            let stored = graph.set_process_importance(process.clone(), *score);
            tracing::info!(process = %process, importance = stored, "Applied process importance override");
        }
        Ok(graph)
    }
}

/// Run the parsed command.
///
/// # Errors
///
/// Returns the command's error, with context describing what failed.
pub fn execute(cli: Cli) -> Result<()> {
    let ctx = Context {
        config: cli.config,
        store: ScenarioStore::new(cli.scenarios_dir),
        process_importance: cli.process_importance,
        output: OutputConfig::from_env(),
    };

    match cli.command {
        Commands::List => list::run(&ctx),
        Commands::Validate => validate::run(&ctx),
        Commands::Cycles => cycles::run(&ctx),
        Commands::Simulate {
            services,
            peak_hours,
            save,
            description,
            tags,
            json,
        } => simulate::run(
            &ctx,
            &services,
            peak_hours,
            simulate::SaveAs {
                name: save,
                description,
                tags,
            },
            json,
        ),
        Commands::Paths { service } => paths::run(&ctx, &service),
        Commands::WorstCase => worst_case::run(&ctx),
        Commands::Compare {
            scenario_a,
            scenario_b,
            json,
        } => compare::run(&ctx, &scenario_a, &scenario_b, json),
        Commands::Scenarios { tag } => scenarios::list(&ctx, tag.as_deref()),
        Commands::Run { scenario, json } => scenarios::run(&ctx, &scenario, json),
        Commands::Batch { patterns } => scenarios::batch(&ctx, &patterns),
    }
}
