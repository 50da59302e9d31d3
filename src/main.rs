//! navigator: reads `/`-separated paths from stdin, types QUERY into the
//! navigator search box and prints the decorated tree once the query settles.

mod logging;

use navigator::app::{render_label, NavigatorApp};
use navigator::kernel::services::adapters::load_settings;
use navigator::kernel::services::ports::Settings;
use navigator::kernel::SearchBoxKey;
use navigator::models::NavigatorTree;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

const USAGE: &str =
    "usage: navigator [--delay MS] [--settings PATH] [--exclude GLOB]... [--all] QUERY < paths";
const SETTLE_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Args {
    delay: Option<u64>,
    settings: Option<PathBuf>,
    all: bool,
    exclude: Vec<String>,
    query: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut query: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--delay" => {
                let value = args.next().ok_or("--delay needs a value")?;
                let delay = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --delay value: {value}"))?;
                parsed.delay = Some(delay);
            }
            "--settings" => {
                let value = args.next().ok_or("--settings needs a path")?;
                parsed.settings = Some(PathBuf::from(value));
            }
            "--exclude" => {
                let value = args.next().ok_or("--exclude needs a pattern")?;
                parsed.exclude.push(value);
            }
            "--all" => parsed.all = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if query.is_none() => query = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}\n{USAGE}")),
        }
    }

    parsed.query = query.ok_or(USAGE)?;
    Ok(parsed)
}

fn read_tree(input: impl BufRead) -> io::Result<NavigatorTree> {
    let mut tree = NavigatorTree::new(".");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = tree.insert_path(&line) {
            tracing::warn!(path = %line, error = %e, "skipping path");
        }
    }
    Ok(tree)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if let Some(delay) = args.delay {
        settings.search.delay = delay;
    }
    if args.all {
        settings.search.include_collapsed = true;
    }
    settings.navigator.exclude.extend(args.exclude);

    let tree = read_tree(io::stdin().lock())?;
    let mut app = NavigatorApp::new(tree, settings.clone())?;

    let typed_at = Instant::now();
    for ch in args.query.chars() {
        app.handle_key(SearchBoxKey::Char(ch), typed_at);
    }

    if app.search_box().debounce().is_pending() {
        let give_up = Instant::now() + Duration::from_millis(settings.search.delay) + SETTLE_GRACE;
        loop {
            let remaining = give_up.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err("search query did not settle".into());
            }
            if app.pump(remaining) {
                break;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in app.rows() {
        let indent = "  ".repeat(usize::from(row.row.depth.saturating_sub(1)));
        let marker = if app.selected() == Some(row.row.id) { ">" } else { " " };
        let suffix = if row.row.is_dir { "/" } else { "" };
        let label = render_label(&row.row.label, row.highlights());
        match row.decoration.as_ref().filter(|d| d.matched) {
            Some(d) => writeln!(out, "{marker} {indent}{label}{suffix}  ({})", d.score)?,
            None => writeln!(out, "{marker} {indent}{label}{suffix}")?,
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let _logging = logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "navigator failed");
            eprintln!("navigator: {e}");
            ExitCode::FAILURE
        }
    }
}
