use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use requestarr_card::model::{
    CatalogEvent, Category, FixtureChannel, ItemKey, LibraryStats, RequestKey, SubItemKey,
};
use requestarr_card::{CardConfig, CatalogController, Command, CommandOutcome, logging};

const FIXTURE_LATENCY: Duration = Duration::from_millis(150);

const HELP: &str = "\
commands:
  search <text>          search the current tab (2+ characters)
  tab film|series|artist switch tab
  request <n>            request result n
  season <n> <season>    request one season of series n
  album <n> <album-id>   request one album of artist n
  expand <n>             expand or collapse result n
  queue                  refresh the download queue
  show                   print the current results
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e:#}");
            None
        }
    };

    tracing::info!("=== Requestarr card starting ===");

    let fixture_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: requestarr-card <fixture.json>")?;

    let config = CardConfig::from_env()?;
    let channel = Arc::new(FixtureChannel::load(&fixture_path)?.with_latency(FIXTURE_LATENCY));
    let stats = LibraryStats::from_sensors(&channel.sensors().await);

    let controller = CatalogController::new(&config, channel);

    println!("== {} ==", config.header);
    print_stats(&stats);
    println!("{HELP}");

    // Redraw whenever a debounced search lands
    let mut events = controller.subscribe().await;
    let watcher = controller.clone();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(CatalogEvent::LoadingChanged(false)) => render(&watcher).await,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Render loop lagged behind events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == Command::Help {
            println!("{HELP}");
            continue;
        }

        match controller.handle_command(command).await {
            Ok(CommandOutcome::Quit) => break,
            Ok(CommandOutcome::Status(status)) => println!("-> {}", status.label()),
            Ok(CommandOutcome::Queue(count)) => print_queue(&controller, count).await,
            Ok(CommandOutcome::Expanded(_)) | Ok(CommandOutcome::Continue) => {
                render(&controller).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Command failed");
                println!("{e:#}");
            }
        }
    }

    tracing::info!("Requestarr card shutting down");
    Ok(())
}

fn print_stats(stats: &LibraryStats) {
    let counts: Vec<String> = Category::ALL
        .iter()
        .filter_map(|&category| Some(format!("{}: {}", category, stats.get(category)?)))
        .collect();
    if !counts.is_empty() {
        println!("library  {}", counts.join("  "));
    }
}

async fn print_queue(controller: &CatalogController, count: usize) {
    println!("queue: {count} item(s)");
    for entry in controller.queue().await {
        println!(
            "  [{}] {} {:.1}% {} {}",
            entry.category, entry.title, entry.progress, entry.status, entry.time_left
        );
    }
}

async fn render(controller: &CatalogController) {
    let snapshot = controller.snapshot().await;

    let tabs: Vec<String> = Category::ALL
        .iter()
        .map(|&c| if c == snapshot.category { format!("[{c}]") } else { c.to_string() })
        .collect();
    println!("{}   search: \"{}\"", tabs.join(" "), snapshot.query);

    if snapshot.loading {
        println!("  searching...");
        return;
    }
    if snapshot.results.is_empty() {
        println!("  Search for {} to request", snapshot.category.label().to_lowercase());
        return;
    }

    for (i, item) in snapshot.results.iter().enumerate() {
        let key = item.key();
        let status = controller.effective_status(key).await;
        let year = item.year.map(|y| format!(" ({y})")).unwrap_or_default();
        println!("{:>3}. {}{}  <{}>", i + 1, item.title, year, status.label());

        if let Some(entry) = controller.queue_entry_for(key).await {
            println!("       downloading {:.1}% {}", entry.progress, entry.time_left);
        }

        if controller.is_expanded(key).await {
            render_children(controller, key).await;
        }
    }
}

async fn render_children(controller: &CatalogController, key: ItemKey) {
    match key.category {
        Category::Series => {
            let Some(item) = controller.item(key).await else {
                return;
            };
            for season in item.seasons() {
                let sub = SubItemKey::Season { series_id: key.id, season_number: season.season_number };
                let status = controller.effective_status(RequestKey::SubItem(sub)).await;
                let name = if season.is_specials() {
                    "Specials".to_string()
                } else {
                    format!("Season {}", season.season_number)
                };
                println!(
                    "       {name}  {}/{} episodes  <{}>",
                    season.episode_file_count,
                    season.total_episode_count,
                    status.label()
                );
            }
        }
        Category::Artist => {
            if controller.albums_loading(key.id).await {
                println!("       loading albums...");
                return;
            }
            for album in controller.albums(key.id).await.unwrap_or_default() {
                let sub = SubItemKey::Album { artist_id: key.id, album_id: album.album_id };
                let status = controller.effective_status(sub).await;
                println!("       #{} {}  <{}>", album.album_id, album.title, status.label());
            }
        }
        Category::Film => {}
    }
}
