mod db;
mod error;
mod metrics;
mod output;
mod parser;
mod settings;
mod source;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use metrics::{new_run_id, PassTracker};
use parser::record::EntityRecord;
use settings::Settings;

#[derive(Parser)]
#[command(name = "ndca_extract", about = "Extract college records from the OCR'd athletics directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the directory and write the colleges as JSON
    Parse {
        /// Windows-1252 OCR text (default: settings `input`)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// JSON destination (default: settings `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Parse the directory and store the colleges in SQLite
    Store {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show totals and pass metrics for the latest stored run
    Stats {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Colleges table for the latest stored run
    Overview {
        /// Only colleges with this sport section (e.g. "Football")
        #[arg(short, long)]
        section: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "settings loaded");

    let result = match cli.command {
        Commands::Parse { input, output: dest, pretty } => {
            let input = input.unwrap_or(settings.input);
            let dest = dest.unwrap_or(settings.output);
            let mut tracker = PassTracker::new(new_run_id());
            let records = extract(&input, &mut tracker)?;
            output::write_json(&records, &dest, pretty || settings.pretty)?;
            print_summary(&records);
            println!("Wrote {:?}", dest);
            Ok(())
        }
        Commands::Store { input, db: db_path } => {
            let input = input.unwrap_or(settings.input);
            let conn = db::connect(&db_path.unwrap_or(settings.db_path))?;
            db::init_schema(&conn)?;
            let mut tracker = PassTracker::new(new_run_id());
            let records = extract(&input, &mut tracker)?;
            let saved =
                db::save_records(&conn, tracker.run_id(), &input.to_string_lossy(), &records)?;
            tracker.persist(&conn)?;
            print_summary(&records);
            println!("Stored {} colleges as {}", saved, tracker.run_id());
            Ok(())
        }
        Commands::Stats { db: db_path } => {
            let conn = db::connect(&db_path.unwrap_or(settings.db_path))?;
            db::init_schema(&conn)?;
            let Some(run_id) = db::latest_run(&conn)? else {
                println!("No stored runs. Run 'store' first.");
                return Ok(());
            };
            let s = db::get_stats(&conn, &run_id)?;
            println!("Run:        {}", run_id);
            println!("Runs:       {}", s.runs);
            println!("Colleges:   {}", s.colleges);
            println!("Attributes: {}", s.attributes);
            println!("Sections:   {}", s.sections);
            println!("Lines:      {}", s.clean_lines);
            println!("Residual:   {}", s.residual_lines);
            println!();
            for m in db::fetch_pass_metrics(&conn, &run_id)? {
                println!(
                    "  {:<10} {:>6} -> {:>6} lines ({} colleges)",
                    m.pass_name, m.before, m.after, m.entities
                );
            }
            Ok(())
        }
        Commands::Overview { section, limit, db: db_path } => {
            let conn = db::connect(&db_path.unwrap_or(settings.db_path))?;
            db::init_schema(&conn)?;
            let Some(run_id) = db::latest_run(&conn)? else {
                println!("No stored runs. Run 'store' first.");
                return Ok(());
            };
            let rows = db::fetch_overview(&conn, &run_id, section.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No colleges found.");
                return Ok(());
            }

            println!(
                "{:>4} | {:<32} | {:<20} | {:<16} | {:>6} | {:>5}",
                "#", "College", "Conference", "Nickname", "Sports", "Left"
            );
            println!("{}", "-".repeat(100));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>4} | {:<32} | {:<20} | {:<16} | {:>6} | {:>5}",
                    i + 1,
                    truncate(&r.name, 32),
                    truncate(&r.conference, 20),
                    truncate(&r.nickname, 16),
                    r.sections,
                    r.residual
                );
            }
            println!("\n{} colleges | run {}", rows.len(), run_id);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn extract(input: &std::path::Path, tracker: &mut PassTracker) -> anyhow::Result<Vec<EntityRecord>> {
    let lines = source::read_lines(input)?;
    info!(path = ?input, lines = lines.len(), "loaded source");
    Ok(parser::parse_directory(&lines, tracker)?)
}

fn print_summary(records: &[EntityRecord]) {
    let sections: usize = records.iter().map(|r| r.sections.len()).sum();
    let attributes: usize = records.iter().map(|r| r.attributes.len()).sum();
    let residual = parser::record::total_residual(records);
    println!(
        "Parsed {} colleges, {} attributes, {} sections, {} unclaimed lines.",
        records.len(),
        attributes,
        sections,
        residual
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
