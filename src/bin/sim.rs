use std::time::Instant;

use clap::Parser;
use impostor_deal::cli::{DealStats, init_stderr_logging};
use impostor_deal::game::assign;
use impostor_deal::roster::{clamp_impostor_count, normalize, validate};
use impostor_deal::{DealSession, Roster, SecretCatalog, SessionConfig};
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

#[derive(Debug, Parser, Clone)]
#[command(name = "impostor-sim")]
#[command(about = "Run many deals headlessly and report how roles and starters spread over seats")]
struct Args {
    /// Number of deals to run
    #[arg(short = 'n', long, default_value_t = 10_000)]
    num: u32,

    /// Comma-separated player names, in turn order
    #[arg(long, default_value = "Ana,Beto,Carla,Dani,Eva")]
    players: String,

    /// Number of impostors per deal
    #[arg(short = 'i', long, default_value_t = 1)]
    impostors: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Silence console output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    init_stderr_logging();
    let args = Args::parse();

    let roster = Roster::from_names(args.players.split(',').map(normalize));
    let config = SessionConfig {
        impostor_count: clamp_impostor_count(roster.players(), args.impostors),
        ..SessionConfig::default()
    };
    if let Err(err) = validate(roster.players(), &config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let catalog = SecretCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut stats = DealStats::new(roster.len());

    info!(deals = args.num, players = roster.len(), "Simulation started");
    for _ in 0..args.num {
        let start = Instant::now();
        let assignment = assign(roster.players(), &config, &catalog, &mut rng);
        let mut session = DealSession::start(roster.players().to_vec(), assignment, &mut rng);
        while !session.is_completed() {
            if let Err(err) = session.advance(&mut rng) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        stats.record_deal(&session, start.elapsed());
    }

    if !args.quiet {
        print_summary(&stats, &roster);
    }
}

fn print_summary(stats: &DealStats, roster: &Roster) {
    println!("{}", "=".repeat(60));
    println!(
        "Deals: {}  Players: {}",
        stats.deals,
        roster
            .players()
            .iter()
            .map(|p| p.display_name.as_str())
            .join(", ")
    );
    println!("{}", "=".repeat(60));
    println!("{:<20} {:>12} {:>12}", "PLAYER", "IMPOSTOR %", "STARTER %");
    println!("{}", "-".repeat(60));
    for (seat, player) in roster.players().iter().enumerate() {
        println!(
            "{:<20} {:>11.2}% {:>11.2}%",
            player.display_name,
            stats.impostor_rate(seat) * 100.0,
            stats.starter_rate(seat) * 100.0
        );
    }
    println!("{}", "-".repeat(60));
    let impostor_start_rate = if stats.deals == 0 {
        0.0
    } else {
        stats.impostor_starts as f64 / stats.deals as f64 * 100.0
    };
    println!("Impostor started: {impostor_start_rate:.2}%");
    println!(
        "Secrets drawn: {}",
        stats
            .secrets
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)))
            .map(|(solution, count)| format!("{solution}={count}"))
            .join(", ")
    );
    println!("Avg deal duration: {:?}", stats.get_avg_duration());
}
