//! Text command handling for the terminal driver

use anyhow::{Context, Result, anyhow, bail};

use crate::model::{Category, ItemKey, RequestStatus, SubItemKey};

use super::CatalogController;

/// One line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Tab(Category),
    Request(usize),
    Season(usize, u32),
    Album(usize, i64),
    Expand(usize),
    Queue,
    Show,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Status(RequestStatus),
    Expanded(bool),
    Queue(usize),
    Quit,
}

impl Command {
    /// Parses a command line. Result positions are 1-based as printed.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();

        let command = match name.to_ascii_lowercase().as_str() {
            // The query keeps its inner spacing, a short or empty one clears results
            "search" | "s" => Command::Search(rest.trim().to_string()),
            "tab" | "t" => {
                let name = args.next().context("usage: tab film|series|artist")?;
                Command::Tab(Category::parse(name).ok_or_else(|| anyhow!("unknown tab '{name}'"))?)
            }
            "request" | "r" => Command::Request(position(args.next())?),
            "season" => {
                let item = position(args.next())?;
                let season = args
                    .next()
                    .context("usage: season <n> <season>")?
                    .parse()
                    .context("season must be a number")?;
                Command::Season(item, season)
            }
            "album" => {
                let item = position(args.next())?;
                let album = args
                    .next()
                    .context("usage: album <n> <album-id>")?
                    .parse()
                    .context("album id must be a number")?;
                Command::Album(item, album)
            }
            "expand" | "e" => Command::Expand(position(args.next())?),
            "queue" | "q" => Command::Queue,
            "show" | "" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}', try 'help'"),
        };
        Ok(command)
    }
}

fn position(arg: Option<&str>) -> Result<usize> {
    let n: usize = arg
        .context("missing result number")?
        .parse()
        .context("result number must be a positive integer")?;
    if n == 0 {
        bail!("result numbers start at 1");
    }
    Ok(n)
}

impl CatalogController {
    pub async fn handle_command(&self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::Search(query) => {
                self.set_query(&query).await;
                Ok(CommandOutcome::Continue)
            }
            Command::Tab(category) => {
                self.switch_category(category).await;
                Ok(CommandOutcome::Continue)
            }
            Command::Request(n) => {
                let key = self.key_at(n).await?;
                Ok(CommandOutcome::Status(self.request_item(key).await))
            }
            Command::Season(n, season_number) => {
                let key = self.key_at(n).await?;
                if key.category != Category::Series {
                    bail!("result {n} is not a series");
                }
                let sub = SubItemKey::Season { series_id: key.id, season_number };
                Ok(CommandOutcome::Status(self.request_sub_item(sub).await))
            }
            Command::Album(n, album_id) => {
                let key = self.key_at(n).await?;
                if key.category != Category::Artist {
                    bail!("result {n} is not an artist");
                }
                let sub = SubItemKey::Album { artist_id: key.id, album_id };
                Ok(CommandOutcome::Status(self.request_sub_item(sub).await))
            }
            Command::Expand(n) => {
                let key = self.key_at(n).await?;
                Ok(CommandOutcome::Expanded(self.expand(key).await))
            }
            Command::Queue => Ok(CommandOutcome::Queue(self.refresh_queue().await)),
            Command::Show | Command::Help => Ok(CommandOutcome::Continue),
            Command::Quit => Ok(CommandOutcome::Quit),
        }
    }

    async fn key_at(&self, n: usize) -> Result<ItemKey> {
        let model = self.model.lock().await;
        n.checked_sub(1)
            .and_then(|i| model.search.results().get(i))
            .map(|item| item.key())
            .ok_or_else(|| anyhow!("no result number {n}"))
    }
}
