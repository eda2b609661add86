use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spirit_tracker::api::{build_router, state::AppState};
use spirit_tracker::calculate::{calculate_score, profile_summary, ScoreInput};
use spirit_tracker::config::AppConfig;
use spirit_tracker::models::catalog::{find_adversary, find_scenario};
use spirit_tracker::models::{Game, GameDraft, GameReport, ProfileId};
use spirit_tracker::parse_date;
use spirit_tracker::storage::media::import_picture;
use spirit_tracker::storage::{GameStore, StorageConfig};

#[derive(Parser)]
#[command(name = "spirit-tracker")]
#[command(about = "Spirit Island game log with scores and statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage player profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Record and inspect games
    Game {
        #[command(subcommand)]
        action: GameAction,
    },

    /// Calculate a score without recording a game
    Score(ScoreArgs),

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create a profile
    Add { name: String },

    /// List profiles, most recently used first
    List,

    /// Delete a profile with all its games
    Delete { id: String },

    /// Show aggregate statistics for a profile
    Summary { id: String },
}

#[derive(Subcommand)]
enum GameAction {
    /// Record a game
    Add(GameArgs),

    /// List recorded games, newest first
    List {
        /// Only games of this profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Show a game with its statistics
    Show {
        id: String,

        /// Compare against every profile's games
        #[arg(long)]
        all_profiles: bool,
    },

    /// Delete a game and its pictures
    Delete { id: String },
}

#[derive(Args)]
struct GameArgs {
    /// Profile the game belongs to
    #[arg(long)]
    profile: String,

    /// Date played (YYYY-MM-DD)
    #[arg(long)]
    date: String,

    /// Player name, once per player
    #[arg(long = "player", required = true)]
    players: Vec<String>,

    /// Spirit name, once per player in the same order
    #[arg(long = "spirit", required = true)]
    spirits: Vec<String>,

    #[arg(long)]
    win: bool,

    #[arg(long)]
    adversary: Option<String>,

    #[arg(long, conflicts_with = "adversary_level")]
    adversary_difficulty: Option<i32>,

    /// Adversary level 0-6, looked up in the catalog
    #[arg(long, requires = "adversary")]
    adversary_level: Option<u8>,

    #[arg(long)]
    scenario: Option<String>,

    /// Defaults to the catalog difficulty of --scenario
    #[arg(long)]
    scenario_difficulty: Option<i32>,

    #[arg(long, default_value = "0")]
    invader_cards: u32,

    #[arg(long, default_value = "0")]
    dahan: u32,

    #[arg(long, default_value = "0")]
    blight: u32,

    #[arg(long, default_value = "")]
    notes: String,

    /// Picture to attach, may be repeated
    #[arg(long = "picture")]
    pictures: Vec<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    players: u32,

    #[arg(long)]
    win: bool,

    #[arg(long)]
    adversary_difficulty: Option<i32>,

    #[arg(long)]
    scenario_difficulty: Option<i32>,

    #[arg(long, default_value = "0")]
    invader_cards: u32,

    #[arg(long, default_value = "0")]
    dahan: u32,

    #[arg(long, default_value = "0")]
    blight: u32,
}

fn adversary_difficulty(args: &GameArgs) -> Result<Option<i32>> {
    match (args.adversary_difficulty, args.adversary_level, &args.adversary) {
        (Some(difficulty), _, _) => Ok(Some(difficulty)),
        (None, Some(level), Some(name)) => {
            let adversary =
                find_adversary(name).with_context(|| format!("Unknown adversary: {}", name))?;
            let difficulty = adversary.difficulty_at(level).with_context(|| {
                format!("{} has no level {} (expected 0-6)", adversary.label, level)
            })?;
            Ok(Some(difficulty))
        }
        _ => Ok(None),
    }
}

fn scenario_difficulty(args: &GameArgs) -> Option<i32> {
    args.scenario_difficulty.or_else(|| {
        let scenario = find_scenario(args.scenario.as_deref()?)?;
        Some(scenario.difficulty)
    })
}

fn build_draft(store: &GameStore, args: &GameArgs) -> Result<GameDraft> {
    let date = parse_date(&args.date)
        .with_context(|| format!("Invalid --date (expected YYYY-MM-DD): {}", args.date))?;

    let mut draft = GameDraft::new(date, args.players.clone(), args.spirits.clone(), args.win)
        .with_counts(args.invader_cards, args.dahan, args.blight);
    if let Some(name) = &args.adversary {
        draft = draft.with_adversary(name, adversary_difficulty(args)?);
    }
    if let Some(name) = &args.scenario {
        draft = draft.with_scenario(name, scenario_difficulty(args));
    } else if args.scenario_difficulty.is_some() {
        bail!("--scenario-difficulty needs --scenario");
    }
    draft.notes = args.notes.clone();

    for path in &args.pictures {
        let stored = import_picture(store.config(), path)
            .with_context(|| format!("Failed to import picture {}", path.display()))?;
        draft.pictures.push(stored.to_string_lossy().into_owned());
    }

    Ok(draft)
}

fn print_game_line(game: &Game) {
    println!(
        "{}  {}  {:<4}  {:>4}  {}  vs {}",
        game.id,
        game.date,
        if game.win { "win" } else { "loss" },
        game.score,
        game.spirits.join(", "),
        game.adversary.as_deref().unwrap_or("-"),
    );
}

fn open_store(data_dir: &Path) -> GameStore {
    GameStore::new(StorageConfig::new(data_dir.to_path_buf()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::debug!("Starting spirit-tracker v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config.data_dir);
    let options = config.stats.comparison_options();

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Add { name } => {
                let profile = store.create_profile(&name)?;
                println!("Created profile {} ({})", profile.name, profile.id);
            }
            ProfileAction::List => {
                let profiles = store.list_profiles()?;
                if profiles.is_empty() {
                    println!("No profiles yet.");
                }
                for profile in profiles {
                    println!(
                        "{}  {:<20}  last used {}",
                        profile.id,
                        profile.name,
                        profile.last_used_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            ProfileAction::Delete { id } => {
                store.delete_profile(&id.into())?;
                println!("Profile deleted.");
            }
            ProfileAction::Summary { id } => {
                let profile = store.get_profile(&id.into())?;
                let games = store.list_games(Some(&profile.id))?;
                let summary = profile_summary(&games);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        },
        Commands::Game { action } => match action {
            GameAction::Add(args) => {
                let draft = build_draft(&store, &args)?;
                let game = store.create_game(&args.profile.into(), draft)?;
                println!("Recorded game {} with score {}", game.id, game.score);
            }
            GameAction::List { profile } => {
                let profile_id: Option<ProfileId> = profile.map(Into::into);
                let games = store.list_games(profile_id.as_ref())?;
                if games.is_empty() {
                    println!("No games recorded.");
                }
                for game in &games {
                    print_game_line(game);
                }
            }
            GameAction::Show { id, all_profiles } => {
                let (game, report) = store.game_report(&id.into(), all_profiles, &options)?;
                print_game_line(&game);
                if let GameReport::FirstGame { .. } = report {
                    println!("First game recorded; nothing to compare against yet.");
                }
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            GameAction::Delete { id } => {
                let game = store.delete_game(&id.into())?;
                println!("Deleted game {}", game.id);
            }
        },
        Commands::Score(args) => {
            let score = calculate_score(&ScoreInput {
                win: args.win,
                adversary_difficulty: args.adversary_difficulty,
                scenario_difficulty: args.scenario_difficulty,
                invader_cards: args.invader_cards,
                dahan: args.dahan,
                blight: args.blight,
                player_count: args.players,
            });
            println!("{}", score);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(store, options).with_cors_origin(&config.server.cors_origin);
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
