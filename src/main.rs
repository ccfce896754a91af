use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mausoleum::config::Args;
use mausoleum::content::JsonDirectory;
use mausoleum::cue::{CuePlayer, LogSink};
use mausoleum::host::{PageHost, Redraw};
use mausoleum::page::Page;
use mausoleum::prefs::PreferenceStore;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Command {
    Joke,
    Result,
    Signing,
    Clip,
    Mute,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "j" | "joke" => Ok(Command::Joke),
            "r" | "result" => Ok(Command::Result),
            "s" | "signing" => Ok(Command::Signing),
            "c" | "clip" => Ok(Command::Clip),
            "m" | "mute" => Ok(Command::Mute),
            "" | "show" => Ok(Command::Show),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command `{}`", other)),
        }
    }
}

const HELP: &str = "commands: joke, result, signing, clip, mute, show, help, quit";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = args.settings(Utc::now()).context("invalid configuration")?;

    // --- Sound preference ---
    let prefs = PreferenceStore::new(&settings.prefs);
    let stored_mute = prefs.load_mute().unwrap_or_else(|e| {
        warn!("Could not read preferences from {}: {}", prefs.path().display(), e);
        false
    });
    let cue = CuePlayer::new(Box::new(LogSink), settings.force_muted || stored_mute);

    let page = Page::new(
        settings.page_origin.clone(),
        settings.since,
        settings.carousel_interval,
        settings.tick_interval,
        cue,
    );

    // --- Triggers ---
    let (mut host, mut rx) = PageHost::start(page, Arc::new(JsonDirectory::new(&settings.content_dir)));

    let deadline = async {
        match settings.run_for {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    println!("{}", HELP);

    // --- Main Loop ---
    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                if let Some(redraw) = host.apply(event) {
                    render(host.page(), redraw);
                }
            }

            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle_command(host.page_mut(), &prefs, command),
                    Err(e) => println!("{}. {}", e, HELP),
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("stdin closed: {}", e);
                    stdin_open = false;
                }
            },

            _ = &mut deadline => {
                info!("Run time elapsed");
                break;
            }

            _ = &mut ctrl_c => break,
        }
    }

    // --- Teardown ---
    host.shutdown().await;
    Ok(())
}

fn handle_command(page: &mut Page, prefs: &PreferenceStore, command: Command) {
    match command {
        Command::Joke => {
            page.reveal_joke();
            match page.joke() {
                Some(joke) => println!("🤣 {}", joke),
                None => println!("(no jokes loaded)"),
            }
        }
        Command::Result => {
            page.reveal_result();
            match page.result() {
                Some(result) => {
                    println!("{}", result.score);
                    println!("  {}", result.details);
                    if !result.link.is_empty() {
                        println!("  Read more: {}", result.link);
                    }
                }
                None => println!("(no results loaded)"),
            }
        }
        Command::Signing => {
            page.reveal_signing();
            match page.signing() {
                Some(s) => {
                    let stat = |v: &Option<mausoleum::content::StatValue>| {
                        v.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
                    };
                    println!("{}", s.name);
                    println!("  📅 Year Signed: {}", stat(&s.year));
                    println!("  💰 Fee: {}", stat(&s.fee));
                    println!(
                        "  📊 Apps: {} | Goals: {} | Assists: {}",
                        stat(&s.apps),
                        stat(&s.goals),
                        stat(&s.assists)
                    );
                    if let Some(bio) = &s.bio {
                        println!("  \"{}\"", bio);
                    }
                }
                None => println!("(no signings available)"),
            }
        }
        Command::Clip => {
            page.advance_clip();
            match page.clip() {
                Some(clip) => println!("💿 {}", clip),
                None => println!("(no clip to play)"),
            }
        }
        Command::Mute => {
            let muted = page.toggle_mute();
            if let Err(e) = prefs.save_mute(muted) {
                warn!("Could not save mute preference: {}", e);
            }
            println!("{}", if muted { "Sound off" } else { "Sound on" });
        }
        Command::Show => {
            render_hero(page);
            println!("⏱️ {}", page.elapsed());
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn render(page: &Page, redraw: Redraw) {
    match redraw {
        Redraw::Counter => {
            // Counter redraws in place
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\r⏱️ {}   ", page.elapsed());
            let _ = out.flush();
        }
        Redraw::Hero => {
            println!();
            render_hero(page);
        }
    }
}

fn render_hero(page: &Page) {
    if let Some(frames) = page.frames() {
        if let Some(front) = frames.iter().find(|f| f.visible) {
            println!("🖼️ {}  🐓 {}", front.source, page.headline().unwrap_or_default());
        }
    }
}
