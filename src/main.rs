use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chainsignal::config::AppConfig;
use chainsignal::models::{DisplayChange, DisplaySnapshot};
use chainsignal::session::{Commit, Dashboard, Screen};
use chainsignal::upstream::HttpReportSource;
use chainsignal::utils;
use chainsignal::Locale;

#[derive(Parser)]
#[command(name = "chainsignal", about = "Crypto market snapshot and signal viewer", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the latest report and signals once and print them
    Show {
        /// Display locale (en, pl); defaults to the configured one
        #[arg(short, long, env = "CHAINSIGNAL_LOCALE")]
        locale: Option<Locale>,

        /// Print the display model as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Re-fetch on an interval until interrupted
    Watch {
        #[arg(short, long, env = "CHAINSIGNAL_LOCALE")]
        locale: Option<Locale>,

        /// Seconds between refreshes; defaults to the configured one
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "chainsignal=info,warn",
        1 => "chainsignal=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let source = HttpReportSource::new(&config.upstream).context("Failed to build report source")?;

    match cli.command {
        Command::Show { locale, json } => {
            let locale = locale.unwrap_or(config.display.locale);
            let dashboard = Dashboard::new();
            {
                let _t = utils::Timer::start("fetch cycle");
                dashboard.refresh(&source).await;
            }

            let screen = dashboard.current().render(locale);
            if json {
                match &screen {
                    Screen::Data(view) => println!("{}", serde_json::to_string_pretty(view)?),
                    _ => println!("{}", serde_json::json!({ "error": locale.texts().error })),
                }
            } else {
                print_screen(&screen, locale);
            }
        }

        Command::Watch { locale, interval } => {
            let locale = locale.unwrap_or(config.display.locale);
            let interval = Duration::from_secs(interval.unwrap_or(config.polling.interval_secs).max(1));

            let dashboard = Dashboard::new();
            let teardown = dashboard.teardown_handle();
            let stop = Arc::new(Notify::new());
            {
                let stop = Arc::clone(&stop);
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        teardown.teardown();
                        stop.notify_one();
                    }
                });
            }

            info!("Refreshing every {:?} (Ctrl-C to stop)", interval);
            loop {
                if dashboard.refresh(&source).await == Commit::Discarded {
                    break;
                }
                print_screen(&dashboard.current().render(locale), locale);

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = stop.notified() => break,
                }
            }
            info!("Stopped.");
        }
    }

    Ok(())
}

fn print_screen(screen: &Screen, locale: Locale) {
    let t = locale.texts();
    match screen {
        Screen::Loading => println!("{}", t.loading),
        Screen::Error => println!("{}", t.error),
        Screen::Data(view) => print_view(view, locale),
    }
}

fn print_view(view: &DisplaySnapshot, locale: Locale) {
    let t = locale.texts();
    let c = &t.columns;

    println!("─────────────────────────────────────────────────────────────────────────────");
    println!("  {} — {}", t.title, t.subtitle);
    println!("  {}: {}", t.generated_at, view.generated_at_display);
    println!("  {}: {}", t.language_label, locale.code());
    println!("─────────────────────────────────────────────────────────────────────────────");

    if view.is_empty() {
        println!("  {}", t.no_data);
        return;
    }

    println!("  {} ({} {})", t.snapshot_title, view.asset_count, t.assets_suffix);
    println!(
        "  {:<8} {:>14} {:>11} {:>10} {:>10} {:>10} {:>10}",
        c.symbol, c.price, c.change_24h, c.change_3d, c.change_7d, c.atr_3d, c.atr_7d
    );
    for row in &view.rows {
        println!(
            "  {:<8} {:>14} {:>11} {:>10} {:>10} {:>10} {:>10}{}",
            row.symbol,
            row.close,
            change_cell(&row.change_24h),
            row.change_3d.text,
            row.change_7d.text,
            row.atr_3d,
            row.atr_7d,
            if row.strong_move { "  ⚡" } else { "" },
        );
    }

    println!();
    println!("  {} ({} {})", t.signals_subtitle, view.signal_count, t.active_suffix);
    if view.signals.is_empty() {
        println!("  {}", t.no_signals);
    }
    for s in &view.signals {
        println!(
            "  {:<8} {:>11}  {}: {}  {}: {}  {}: {}  {}: {}",
            s.symbol,
            change_cell(&s.change_24h),
            c.change_3d,
            s.change_3d.text,
            c.change_7d,
            s.change_7d.text,
            c.atr_3d,
            s.atr_3d,
            c.atr_7d,
            s.atr_7d,
        );
        if !s.reasons.is_empty() {
            println!("           {}: {}", t.reasons_label, s.reasons.join(", "));
        }
    }
}

fn change_cell(change: &DisplayChange) -> String {
    format!("{} {}", change.arrow, change.text)
}
