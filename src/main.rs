use anyhow::Result;
use std::env;
use std::process::ExitCode;

use subscription_editor::{Config, CATALOG, VERSION};

fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_ui_mode()?,
        Some("catalog") => run_catalog(),
        Some("--version") | Some("-V") => println!("subscription-editor {}", VERSION),
        Some(other) => {
            eprintln!("❌ Unknown argument: {}", other);
            eprintln!("   Usage: subscription-editor [catalog | --version]");
            return Ok(ExitCode::from(2));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default config");
            eprintln!("⚠️  {} (using defaults)", err);
            Config::default()
        }
    }
}

fn run_catalog() {
    println!("📚 Subscription Editor - Option Tables");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📱 Apps");
    for app in &CATALOG.apps {
        println!("  {:<10} {:<22} {}", app.id, app.name, app.color);
    }

    println!("\n🏷️  Categories");
    for category in &CATALOG.categories {
        println!("  {:<14} {}", category.id, category.name);
    }

    println!("\n🔁 Frequencies");
    for frequency in &CATALOG.frequencies {
        println!("  {:<10} {}", frequency.id, frequency.name);
    }

    println!("\n⏰ Reminders");
    for reminder in &CATALOG.reminders {
        println!("  {:<10} {:<16} {} day(s)", reminder.id, reminder.name, reminder.days_before);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    use anyhow::Context;
    use subscription_editor::{feedback, logging, ui, EditScreen, Subscription};

    let config = load_config();
    let log_file = config.resolved_log_file();
    logging::init_tracing(log_file.as_deref());

    let mut screen = EditScreen::new(
        Subscription::default(),
        &config.currency_symbol,
        feedback::from_config(config.haptics),
    );

    ui::run_ui(&mut screen)?;

    if screen.form.saved && !screen.form.deleted {
        let json = serde_json::to_string_pretty(screen.record())
            .context("failed to serialize subscription")?;
        println!("{}", json);
    } else if screen.form.deleted {
        println!("🗑️  Subscription deleted");
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    let _ = load_config();
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
