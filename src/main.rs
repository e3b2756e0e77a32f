use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use venture_score::access::{Actor, Role};
use venture_score::error::ServiceError;
use venture_score::service::ScoreService;
use venture_score::store::{JsonProfileStore, JsonScoreStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FORBIDDEN: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;
const EXIT_STORAGE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single startup profile JSON file without storing anything
    Score {
        /// Path to a profile JSON file
        file: PathBuf,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recompute and store the score of a startup (founder or admin)
    Recalculate {
        /// Startup id
        id: String,

        /// User id of the caller
        #[arg(long)]
        user: String,

        /// Role of the caller (e.g. client, super_admin)
        #[arg(long)]
        role: Role,
    },
    /// Show the stored score of a startup with suggestions
    Show {
        /// Startup id
        id: String,

        #[arg(long)]
        json: bool,
    },
    /// List scored startups, best first (investor or admin)
    Rank {
        /// Role of the caller
        #[arg(long)]
        role: Role,

        /// User id of the caller
        #[arg(long, default_value = "cli")]
        user: String,

        /// Only include startups scoring at least this much
        #[arg(long)]
        min_score: Option<u32>,

        /// Maximum number of startups to list (1-100)
        #[arg(long)]
        limit: Option<usize>,

        /// Tab-separated output for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "venture-score")]
#[command(about = "Rule-based startup scoring and ranking", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/venture-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn exit_code(err: &ServiceError) -> i32 {
    match err {
        ServiceError::StartupNotFound(_) => EXIT_NOT_FOUND,
        ServiceError::Forbidden(_) => EXIT_FORBIDDEN,
        ServiceError::Storage(_) => EXIT_STORAGE,
    }
}

fn fail(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Failed to serialize output: {}", e), EXIT_STORAGE),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load and validate config
    let config_path = cli.config.map(PathBuf::from);
    let config = match venture_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => fail(format!("Config error: {:#}", e), EXIT_CONFIG),
    };
    if let Err(errors) = venture_score::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = venture_score::output::should_use_colors();

    // Scoring a file needs no stores
    if let Commands::Score { file, json } = &cli.command {
        let profile = match venture_score::store::read_profile(file) {
            Ok(p) => p,
            Err(e) => fail(format!("Profile error: {:#}", e), EXIT_STORAGE),
        };
        let breakdown = venture_score::service::score_profile(&profile);
        tracing::debug!(startup_id = %profile.id, total = breakdown.total, "scored profile file");

        if *json {
            print_json(&breakdown);
        } else {
            println!(
                "{}",
                venture_score::output::format_breakdown(&breakdown, use_colors)
            );
            println!("Suggestions:");
            for suggestion in venture_score::scoring::suggestions_for(Some(&breakdown)) {
                println!("  - {}", suggestion);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let profiles_path = config.profiles_path();
    let profiles = match JsonProfileStore::open(&profiles_path) {
        Ok(store) => store,
        Err(e) => fail(format!("Profile store error: {:#}", e), EXIT_STORAGE),
    };
    tracing::info!(count = profiles.len(), "profile store ready");

    let service = ScoreService::new(profiles, JsonScoreStore::new(config.scores_path()));

    match cli.command {
        Commands::Score { .. } => {}
        Commands::Recalculate { id, user, role } => {
            let actor = Actor::new(user, role);
            match service.recalculate(&id, &actor) {
                Ok(record) => {
                    println!("Recalculated {}: {}/100", record.startup_id, record.score_total);
                    println!(
                        "{}",
                        venture_score::output::format_breakdown(&record.breakdown, use_colors)
                    );
                }
                Err(e) => fail(&e, exit_code(&e)),
            }
        }
        Commands::Show { id, json } => match service.get_score(&id) {
            Ok(report) if json => print_json(&report),
            Ok(report) => println!(
                "{}",
                venture_score::output::format_report(&report, use_colors)
            ),
            Err(e) => fail(&e, exit_code(&e)),
        },
        Commands::Rank {
            role,
            user,
            min_score,
            limit,
            tsv,
            json,
        } => {
            let actor = Actor::new(user, role);
            let min_score = min_score.unwrap_or_else(|| config.rank_min_score());
            let limit = limit.unwrap_or_else(|| config.rank_limit());

            match service.ranked(&actor, min_score, limit) {
                Ok(rows) if json => print_json(&rows),
                Ok(rows) if tsv => println!("{}", venture_score::output::format_tsv(&rows)),
                Ok(rows) => println!(
                    "{}",
                    venture_score::output::format_ranked_table(&rows, use_colors)
                ),
                Err(e) => fail(&e, exit_code(&e)),
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
