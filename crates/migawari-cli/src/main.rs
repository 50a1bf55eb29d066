use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use migawari_api::{CardCatalog, ScryfallClient};
use migawari_core::analyzer::{analyze_deck, AnalyzeOptions, DeckReport};
use migawari_core::config::AppConfig;
use migawari_core::finder::{find_substitutes, ScoredCandidate, SubstituteQuery};

#[derive(Parser)]
#[command(name = "migawari", about = "Find cheaper functional substitutes for expensive cards")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a decklist and suggest substitutes for its expensive cards.
    Analyze {
        /// Decklist file; reads stdin when omitted.
        file: Option<PathBuf>,
        /// Price (USD) at or above which a card gets a substitute search.
        #[arg(long)]
        threshold: Option<f64>,
        /// Candidates listed per card.
        #[arg(long)]
        max_candidates: Option<usize>,
        /// Allow reserved-list cards into the candidate pool.
        #[arg(long)]
        include_reserved: bool,
    },
    /// Find substitutes for a single card under a price cap.
    Search {
        /// Card name, resolved fuzzily.
        name: String,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        max_results: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("migawari=info")
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Config load failed, using defaults");
        AppConfig::default()
    });
    let catalog = ScryfallClient::new();

    match cli.command {
        Command::Analyze {
            file,
            threshold,
            max_candidates,
            include_reserved,
        } => {
            let text = match read_decklist(file) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };

            let mut options = AnalyzeOptions::from_config(&config);
            if let Some(threshold) = threshold {
                options.price_threshold = threshold;
            }
            if let Some(max_candidates) = max_candidates {
                options.max_candidates = max_candidates;
            }
            if include_reserved {
                options.exclude_reserved = false;
            }

            let report = analyze_deck(&catalog, &text, &options).await;
            if report.entries.is_empty() {
                eprintln!("error: no decklist entries found");
                return ExitCode::FAILURE;
            }
            print_report(&report);
        }
        Command::Search {
            name,
            max_price,
            max_results,
        } => {
            let card = match catalog.lookup_by_name(&name).await {
                Ok(card) => card,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };

            let query = SubstituteQuery {
                max_price: max_price.unwrap_or(config.search.max_price),
                max_results: max_results.unwrap_or(config.search.max_results),
                ..Default::default()
            };

            match find_substitutes(&catalog, &card, &query).await {
                Ok(candidates) => {
                    println!(
                        "{} - {} (MV {})",
                        card.name,
                        price_text(card.lowest_price()),
                        mana_value_text(card.mana_value),
                    );
                    if candidates.is_empty() {
                        println!("  no substitutes under {}", price_text(Some(query.max_price)));
                    }
                    for candidate in &candidates {
                        print_candidate(candidate);
                    }
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn read_decklist(file: Option<PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_report(report: &DeckReport) {
    for entry in &report.entries {
        println!(
            "{}x {} - {}",
            entry.quantity,
            entry.name,
            price_text(entry.price),
        );
        if let Some(error) = &entry.error {
            println!("  error: {error}");
        }
        for candidate in &entry.candidates {
            print_candidate(candidate);
        }
    }
}

fn print_candidate(candidate: &ScoredCandidate) {
    println!(
        "  {:>8}  {}  [similarity {:.0}]",
        price_text(Some(candidate.price)),
        candidate.card.name,
        candidate.score,
    );
}

fn price_text(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p:.2}"),
        None => "N/A".to_string(),
    }
}

fn mana_value_text(mana_value: Option<f64>) -> String {
    match mana_value {
        Some(mv) => format!("{mv}"),
        None => "?".to_string(),
    }
}
