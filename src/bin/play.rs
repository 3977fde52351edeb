use std::path::PathBuf;

use clap::Parser;
use impostor_deal::cli::{TERMINAL_REVEAL, TuiApp, init_file_logging};
use impostor_deal::roster::normalize;
use impostor_deal::{
    ControllerConfig, GameController, HintLevel, Roster, SecretCatalog, SessionConfig,
};

#[derive(Debug, Parser, Clone)]
#[command(name = "impostor-play")]
#[command(about = "Deal secret roles for a pass-the-device impostor game")]
struct Args {
    /// Comma-separated player names, in turn order
    #[arg(long, default_value = "Player 1,Player 2,Player 3")]
    players: String,

    /// Number of impostors (clamped to players - 1)
    #[arg(short = 'i', long, default_value_t = 1)]
    impostors: usize,

    /// Show impostors a hint instead of nothing
    #[arg(long)]
    hints: bool,

    /// Hint specificity: 1 (vaguest) to 3
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    hint_level: u8,

    /// JSON file with secrets: [{"solution": "...", "hints": ["..", "..", ".."]}]
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Random seed for reproducible deals
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(err) = init_file_logging(path) {
            eprintln!("Error: cannot open log file {}: {err}", path.display());
            std::process::exit(1);
        }
    }

    let catalog = match &args.catalog {
        Some(path) => SecretCatalog::load(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => SecretCatalog::builtin(),
    };

    let hint_level = HintLevel::try_from(args.hint_level).unwrap_or_default();
    let roster = Roster::from_names(args.players.split(',').map(normalize));
    let config = SessionConfig {
        impostor_count: args.impostors,
        hints_enabled: args.hints,
        hint_level,
    };

    let controller = GameController::new(
        catalog,
        ControllerConfig {
            seed: args.seed,
            reveal: TERMINAL_REVEAL,
        },
    )
    .with_setup(roster, config);

    let mut app = TuiApp::new(controller);
    if let Err(err) = app.run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
