mod args;
mod summary;
mod watcher;

use clap::Parser as _;
use env_logger::Env;
use std::error::Error;
use std::time::Duration;

use args::Args;
use hls::{FetchOptions, Manifest, Parser};
use watcher::{FileAdd, ManifestWatcher};

type BoxResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args).await {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

async fn run(args: &Args) -> BoxResult<()> {
    let options = FetchOptions {
        timeout: Some(args.timeout()),
    };

    let mut parser = Parser::with_options(&options)?;
    let mut manifest = parser.load(&args.source()?).await?;

    for line in &args.follow {
        let source = hls::follow(&manifest, *line)?;
        log::info!("following line {} to {}", line, source);
        parser = Parser::with_options(&options)?;
        manifest = parser.load(&source).await?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else if args.items {
        println!("{}", summary::navigable_listing(&manifest));
    } else if let Some(sequence) = args.segment {
        let segment = manifest
            .segment(sequence)
            .ok_or_else(|| format!("no segment with sequence {}", sequence))?;
        println!("{}", summary::segment_details(segment, &manifest.resolver()));
    } else {
        println!("{}", summary::summary(&manifest));
    }

    if let Some(seconds) = args.watch {
        watch(&mut parser, manifest, Duration::from_secs(seconds.max(1))).await;
    }

    Ok(())
}

async fn watch(parser: &mut Parser, mut manifest: Manifest, period: Duration) {
    let mut watcher = ManifestWatcher::new(|message| {
        let now = chrono::Local::now().format("%H:%M:%S");
        match message {
            FileAdd::Segment { sequence, uri } => println!("[{}] segment {} {}", now, sequence, uri),
            FileAdd::Key(uri) => println!("[{}] key {}", now, uri),
        }
    });

    watcher.mark_seen(&manifest);
    log::info!("watching {} every {:?}", manifest.source(), period);

    loop {
        tokio::time::sleep(period).await;

        match parser.refresh(&manifest).await {
            Ok(fresh) => manifest = fresh,
            Err(e) => {
                log::warn!("refresh of {} failed: {}", manifest.source(), e);
                continue;
            }
        }
        watcher.update(&manifest);
    }
}
