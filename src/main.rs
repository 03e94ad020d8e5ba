mod client;
mod config;
mod form;
mod html;
mod matcher;
mod models;
mod state;
mod telemetry;
mod tui;
mod validate;
mod view;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client::{RecommendationClient, RecommendationSource};
use config::{Overrides, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use view::ResultsView;

#[derive(Parser)]
#[command(name = "intern")]
#[command(about = "Find internships that match your education, skills and interests")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Base URL of the recommendation API (default: http://localhost:5000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (0 keeps the transport default)
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in your profile interactively and browse recommendations
    Form,

    /// Get recommendations for a profile given on the command line
    Recommend {
        /// Education level (e.g. 12th, Diploma, "Bachelor's")
        #[arg(short, long)]
        education: Option<String>,

        /// A skill you have (repeatable)
        #[arg(short, long = "skill")]
        skills: Vec<String>,

        /// An area of interest (repeatable)
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Preferred location, or "any"
        #[arg(short, long)]
        location: Option<String>,

        /// Also write the results as an HTML fragment
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// List the offline internship catalog
    Catalog {
        /// Only list the sectors covered
        #[arg(long)]
        sectors: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = Overrides {
        api_url: cli.global.api_url,
        timeout_secs: cli.global.timeout,
    };
    let settings = Settings::load(&overrides)?;

    match cli.command {
        Commands::Form => {
            let log_path = config::log_path();
            telemetry::init(&settings.log_level, telemetry::Sink::File(&log_path))?;
            tracing::info!(api = %settings.api_base_url, "starting interactive form");

            let client = RecommendationClient::new(&settings.api_base_url, settings.timeout())
                .context("Failed to create HTTP client")?;
            tui::run_form(Arc::new(client))?;
        }

        Commands::Recommend {
            education,
            skills,
            interests,
            location,
            html,
        } => {
            telemetry::init(&settings.log_level, telemetry::Sink::Stderr)?;

            let profile = form::from_args(
                education.as_deref(),
                &skills,
                &interests,
                location.as_deref(),
            );
            validate::validate(&profile)?;

            let client = RecommendationClient::new(&settings.api_base_url, settings.timeout())
                .context("Failed to create HTTP client")?;
            tracing::debug!(endpoint = client.endpoint(), "requesting recommendations");
            let recommendation = client.recommend(&profile);

            let results = view::render(recommendation.postings());
            tracing::debug!(
                cards = results.cards().len(),
                fallback = recommendation.is_fallback(),
                "rendered results"
            );
            print_results(&results);

            if let Some(path) = html {
                std::fs::write(&path, html::render_fragment(&results))
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("\nHTML saved to: {}", path.display());
            }
        }

        Commands::Catalog { sectors } => {
            if sectors {
                for sector in matcher::sectors() {
                    println!("{}", sector);
                }
            } else {
                println!(
                    "{:<4} {:<28} {:<18} {:<12} {:<10} {:<15}",
                    "ID", "TITLE", "COMPANY", "LOCATION", "DURATION", "STIPEND"
                );
                println!("{}", "-".repeat(90));
                for p in matcher::catalog() {
                    println!(
                        "{:<4} {:<28} {:<18} {:<12} {:<10} {:<15}",
                        p.id,
                        view::truncate(&p.title, 26),
                        view::truncate(&p.company, 16),
                        view::truncate(&p.location, 12),
                        p.duration,
                        p.stipend
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_results(results: &ResultsView) {
    match results {
        ResultsView::Empty => {
            println!("{}", view::NO_RESULTS_TITLE);
            println!("{}", view::NO_RESULTS_HINT);
        }
        ResultsView::Cards(cards) => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                match card.match_score {
                    Some(score) => println!("#{} {} ({}% match)", card.id, card.title, score),
                    None => println!("#{} {}", card.id, card.title),
                }
                println!("   {}", card.company);
                for (label, value) in card.details() {
                    println!("   {:<10} {}", label, value);
                }
                println!("   Why: {}", card.match_reason);
                for line in textwrap::fill(&card.summary, 72).lines() {
                    println!("   {}", line);
                }
            }
        }
    }
}
