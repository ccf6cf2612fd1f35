use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use history_graph::config;
use history_graph::dispatch::Dispatcher;
use history_graph::log::GitCliLog;
use history_graph::render::{GraphvizRenderer, Renderer};
use history_graph::task::PackageTask;
use history_graph::ui;

#[derive(clap::Parser)]
#[command(
    name = "history-graph",
    about = "Render per-package merge-commit history graphs between release tags"
)]
struct Args {
    #[arg(help = "Newer release boundary tag (e.g. CMSSW_11_2_0)")]
    release_start: String,

    #[arg(help = "Older release boundary tag (e.g. CMSSW_11_1_0)")]
    release_end: String,

    #[arg(help = "File listing one package path per line")]
    package_file: String,

    #[arg(
        short = 'j',
        long,
        default_value_t = 8,
        help = "Maximum number of packages processed concurrently"
    )]
    concurrency: usize,

    #[arg(short, long, default_value = ".", help = "Directory for .gv/.svg output")]
    output_dir: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print diagnostic narration")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.concurrency == 0 {
        ui::display_error("Concurrency must be a positive integer");
        std::process::exit(1);
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // Read the package list; an unreadable file is fatal before any dispatch.
    let packages = match read_package_file(&args.package_file) {
        Ok(packages) => packages,
        Err(e) => {
            ui::display_error(&format!(
                "Cannot read package file '{}': {}",
                args.package_file, e
            ));
            std::process::exit(1);
        }
    };

    if packages.is_empty() {
        ui::display_status("Package file is empty, nothing to do");
        return Ok(());
    }

    let log = match GitCliLog::new(&config.git, ".") {
        Ok(log) => Arc::new(log),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let renderer: Arc<dyn Renderer> = Arc::new(GraphvizRenderer::new(&config.render.dot_binary));

    if args.verbose {
        ui::display_status(&format!(
            "Processing {} package(s) from {} with {} worker(s)",
            packages.len(),
            args.package_file,
            args.concurrency
        ));
    }

    let task = Arc::new(PackageTask::new(
        log,
        renderer,
        config,
        &args.release_start,
        &args.release_end,
        &args.output_dir,
        args.verbose,
    ));

    let dispatcher = Dispatcher::new(args.concurrency);
    let outcomes = dispatcher.run(packages, move |package| task.run(package));

    let mut failed = Vec::new();
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            if args.verbose {
                ui::display_error(&format!("{}: {}", outcome.package, e));
            }
            failed.push(outcome.package.clone());
        }
    }

    if failed.is_empty() {
        ui::display_success(&format!("Processed {} package(s)", outcomes.len()));
        Ok(())
    } else {
        ui::display_failed_packages(&failed);
        std::process::exit(1);
    }
}

fn read_package_file(path: &str) -> std::io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}
