use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::Path;
use takeout_sync::catalog::{CatalogClient, ImmichClient};
use takeout_sync::cli::{Cli, Commands};
use takeout_sync::config::Config;
use takeout_sync::confirm::{prompt_date, Confirmer, TerminalConfirmer};
use takeout_sync::reconcile::{self, DateSyncReport, ReconciliationContext};
use takeout_sync::{logging, takeout};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = &cli.takeout {
        config.takeout_path = path.display().to_string();
    }

    let client = ImmichClient::from_config(&config).context("failed to build HTTP client")?;
    let mut confirmer = TerminalConfirmer::new(cli.yes);

    let user = client
        .current_user()
        .await
        .with_context(|| format!("cannot reach catalog at {}", client.base_url()))?;
    if !confirmer.ask(&format!("Are you {}?", user.name), false, true)? {
        println!("Bye-bye...");
        return Ok(());
    }

    let command = match cli.command {
        Some(command) => command,
        None => match choose_mode(&mut confirmer)? {
            Some(command) => command,
            None => {
                println!("Bye-bye...");
                return Ok(());
            }
        },
    };

    let root = config.takeout_root();
    let mut ctx = ReconciliationContext::new(&client, &mut confirmer);

    match command {
        Commands::Albums => sync_albums(&mut ctx, &root).await?,
        Commands::Dates { date } => sync_dates(&mut ctx, &root, date).await?,
    }

    println!("\n✅ Done!");
    Ok(())
}

fn choose_mode(confirmer: &mut dyn Confirmer) -> anyhow::Result<Option<Commands>> {
    if confirmer.ask("Do you want to sync your albums?", true, true)? {
        return Ok(Some(Commands::Albums));
    }
    if confirmer.ask("Do you want to sync assets dates?", true, true)? {
        let date = prompt_date(
            "Enter date to filter files (YYYY-MM-DD) or leave empty to sync all files",
        )?;
        return Ok(Some(Commands::Dates { date }));
    }
    Ok(None)
}

async fn sync_albums(ctx: &mut ReconciliationContext<'_>, root: &Path) -> anyhow::Result<()> {
    println!("[1/2] Reading takeout albums...");
    let index = takeout::build_album_index(root)
        .with_context(|| format!("cannot read takeout at {}", root.display()))?;

    if index.albums_found == 0 {
        println!("No albums found");
        return Ok(());
    }
    for (name, records) in &index.albums {
        println!("  Found album: {} ({} files)", name, records.len());
    }
    println!("✔ Found {} albums\n", index.albums_found);

    println!("[2/2] Syncing albums...");
    let summary = reconcile::sync_albums(ctx, &index.albums).await?;

    println!("\nSummary:");
    println!("  Albums found:      {}", index.albums_found);
    println!("  Albums created:    {}", summary.albums_created());
    println!("  Assets synced:     {}", summary.assets_added());
    println!("  Assets failed:     {}", summary.assets_failed());
    println!("  Ambiguous matches: {}", summary.ambiguous());
    println!("  Assets not found:  {}", summary.assets_not_found());
    Ok(())
}

async fn sync_dates(
    ctx: &mut ReconciliationContext<'_>,
    root: &Path,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    println!("[1/2] Reading takeout files...");
    let index = takeout::build_library_index(root)
        .with_context(|| format!("cannot read takeout at {}", root.display()))?;
    println!("✔ Found total files: {}\n", index.len());

    println!("[2/2] Syncing dates...");
    let report = match date {
        Some(date) => reconcile::sync_day(ctx, &index.records, date).await?,
        None => reconcile::sync_all_dates(ctx, &index.records).await?,
    };

    print_date_summary(&report);
    Ok(())
}

fn print_date_summary(report: &DateSyncReport) {
    println!("\nSummary:");
    println!("  Assets checked:    {}", report.examined);
    println!("  Assets updated:    {}", report.updated);
    println!("  Already correct:   {}", report.unchanged);
    println!("  Declined:          {}", report.declined);
    println!("  Assets not found:  {}", report.not_found + report.no_local_match);
    println!("  Ambiguous matches: {}", report.ambiguous);
    println!("  Unparsable dates:  {}", report.unparsable);
    if report.failed + report.search_errors > 0 {
        println!("  Failed calls:      {}", report.failed + report.search_errors);
    }
}
