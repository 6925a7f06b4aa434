use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podpage::{
    EpisodeApi, EpisodeDetails, NoopReporter, PageOptions, PageOrigin, PageStore, PlaybackQueue,
    ProgressEvent, ProgressReporter, ReqwestClient, SharedProgressReporter, build_pages,
    enumerate_paths, load_episode_props,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PAGE: Emoji<'_, '_> = Emoji("📄 ", "[p] ");
static PLAY: Emoji<'_, '_> = Emoji("▶️  ", "[>] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Generate podcast episode pages from an episode API
#[derive(Parser, Debug)]
#[command(name = "podpage")]
#[command(about = "Generate podcast episode pages from an episode API")]
#[command(version)]
struct Args {
    /// Base URL of the episode API (e.g. http://localhost:3333)
    api: String,

    /// Quiet mode - suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Number of recent episodes to prerender
    #[arg(short, long, default_value_t = podpage::generate::LISTING_LIMIT)]
    limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the episode pages that would be prerendered
    Paths,

    /// Fetch and display a single episode page
    Show {
        /// Episode identifier
        slug: String,

        /// Queue the episode for playback after displaying it (not with --json)
        #[arg(short, long)]
        play: bool,
    },

    /// Prerender the recent episode pages into a directory
    Build {
        /// Output directory for generated pages
        out_dir: PathBuf,
    },
}

impl Args {
    /// Reject flag combinations that would otherwise be silently ignored
    fn validate(&self) -> Result<()> {
        if let Command::Show { play: true, .. } = self.command {
            if self.json {
                anyhow::bail!("--play cannot be combined with --json");
            }
        }
        Ok(())
    }
}

/// Progress reporter using an indicatif spinner for terminal output
struct SpinnerReporter {
    spinner: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { spinner }
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingListing { url } => {
                self.spinner
                    .set_message(format!("{SEARCH}Fetching listing: {}", url.cyan()));
            }

            ProgressEvent::PathsEnumerated { count } => {
                self.spinner.set_message(format!(
                    "{HEADPHONES}{} pages to prerender",
                    count.to_string().cyan()
                ));
            }

            ProgressEvent::FetchingEpisode { slug } => {
                self.spinner
                    .set_message(format!("{SEARCH}Fetching episode {}", slug.cyan()));
            }

            ProgressEvent::EpisodeNormalized { title, .. } => {
                self.spinner
                    .set_message(format!("{HEADPHONES}{}", title.bold().green()));
            }

            ProgressEvent::PageGenerated { slug, origin } => {
                let how = match origin {
                    PageOrigin::Prerender => "prerendered",
                    PageOrigin::Fallback => "generated on demand",
                    PageOrigin::Revalidate => "revalidated",
                };
                self.spinner
                    .println(format!("  {PAGE}{} {}", slug.green(), how.dimmed()));
            }

            ProgressEvent::PageServed { slug } => {
                self.spinner
                    .set_message(format!("{PAGE}Serving cached {}", slug.cyan()));
            }

            ProgressEvent::PageWritten { path, .. } => {
                self.spinner
                    .println(format!("  {FOLDER}{}", path.dimmed()));
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn print_details(details: &EpisodeDetails<'_>) {
    let [members, published_at, duration] = details.header();

    println!("{}", details.document_title().bold().green());
    println!(
        "{}  {}  {}",
        members.yellow(),
        published_at.cyan(),
        duration.cyan()
    );
    println!("\n{}\n", details.description_text());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    let interactive = !args.quiet && !args.json;

    if interactive {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podpage".bold().magenta(),
            "- Podcast Episode Pages".dimmed()
        );
    }

    let api = EpisodeApi::new(ReqwestClient::new(), &args.api)
        .with_context(|| format!("Invalid API URL '{}'", args.api))?;

    let options = PageOptions {
        listing_limit: args.limit,
        ..Default::default()
    };

    let reporter: SharedProgressReporter = if interactive {
        Arc::new(SpinnerReporter::new())
    } else {
        NoopReporter::shared()
    };

    match args.command {
        Command::Paths => {
            let paths = enumerate_paths(&api, &options, &reporter)
                .await
                .context("Failed to enumerate episode paths")?;
            drop(reporter);

            if args.json {
                print_json(&paths)?;
            } else {
                for target in &paths.paths {
                    println!("/episode/{}", target.slug);
                }
            }
        }

        Command::Show { slug, play } => {
            let props = load_episode_props(&api, &slug, &options, &reporter)
                .await
                .with_context(|| format!("Failed to load episode '{slug}'"))?;
            drop(reporter);

            if args.json {
                print_json(&props)?;
            } else {
                let details = EpisodeDetails::new(&props.episode);
                print_details(&details);

                if play {
                    let mut queue = PlaybackQueue::new();
                    details.play(&mut queue);
                    if let Some(current) = queue.current() {
                        println!("{PLAY}{}", current.url.cyan());
                    }
                }
            }
        }

        Command::Build { out_dir } => {
            let store = PageStore::new(api, options, reporter.clone());
            let result = build_pages(&store, &out_dir, &reporter)
                .await
                .context("Failed to build episode pages")?;
            drop(store);
            drop(reporter);

            if args.json {
                print_json(&result.paths)?;
            } else if !args.quiet {
                println!(
                    "\n{PARTY}{} {} pages written",
                    "Build complete:".bold().green(),
                    result.paths.paths.len().to_string().green().bold()
                );
                println!(
                    "\n{FOLDER}Output: {}\n",
                    out_dir.display().to_string().cyan()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_rejects_play_with_json() {
        let args =
            Args::try_parse_from(["podpage", "http://api.test", "show", "ep", "--play", "--json"])
                .unwrap();

        let err = args.validate().unwrap_err();
        assert!(err.to_string().contains("--play"));
    }

    #[test]
    fn show_accepts_play_or_json_alone() {
        for argv in [
            ["podpage", "http://api.test", "show", "ep", "--play"].as_slice(),
            ["podpage", "http://api.test", "--json", "show", "ep"].as_slice(),
        ] {
            let args = Args::try_parse_from(argv.iter().copied()).unwrap();
            assert!(args.validate().is_ok());
        }
    }
}
