use clap::{Parser, Subcommand};
use mic_decoder::decoder::families::{FAMILIES, families_using};
use mic_decoder::tools::{GridFile, config, grid_files, load_grid_file, render_grid};
use mic_decoder::{
    DecodeOutcome, FieldDecoder, Layout, LayoutKind, MicDecoder, ParityConvention,
    ValidationOptions, Verbosity, decode, decode_batch, find_family,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "mictool",
    version,
    about = "Decode printer Machine Identification Code dot grids"
)]
struct Cli {
    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode and validate a single grid file
    Decode {
        #[arg(long)]
        grid: PathBuf,
        /// Printer family (overrides the family named in the file)
        #[arg(long)]
        family: Option<String>,
        /// Check parity as odd instead of even
        #[arg(long)]
        odd_parity: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Also print the raw value of every field
        #[arg(long)]
        fields: bool,
    },
    /// Print an empty, labelled text grid for a family
    Template {
        #[arg(long)]
        family: Option<String>,
    },
    /// List known printer families and their layouts
    Families,
    /// Decode every grid file under a directory
    Batch {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        family: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        odd_parity: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose || config::verbose() {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Decode {
            grid,
            family,
            odd_parity,
            json,
            fields,
        } => decode_cmd(
            &grid,
            family.as_deref(),
            options(cli.verbose, odd_parity),
            json,
            fields,
        ),
        Command::Template { family } => template_cmd(family.as_deref()),
        Command::Families => {
            families_cmd();
            Ok(())
        }
        Command::Batch {
            root,
            family,
            limit,
            odd_parity,
        } => batch_cmd(
            &root,
            family.as_deref(),
            limit.or_else(config::batch_limit),
            options(cli.verbose, odd_parity),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn options(verbose: bool, odd_parity: bool) -> ValidationOptions {
    let mut options = config::validation_options();
    if verbose {
        options.verbosity = Verbosity::Warn;
    }
    if odd_parity {
        options.parity = ParityConvention::Odd;
    }
    options
}

fn resolve_family<'a>(flag: Option<&'a str>, grid: &'a GridFile) -> &'a str {
    flag.or(grid.family.as_deref()).unwrap_or_else(|| config::family())
}

fn decode_cmd(
    path: &Path,
    family: Option<&str>,
    options: ValidationOptions,
    json: bool,
    fields: bool,
) -> Result<(), String> {
    let grid = load_grid_file(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let family = find_family(resolve_family(family, &grid)).map_err(|e| e.to_string())?;
    let outcome = decode(family.layout, &grid.cells, options)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    if json {
        let text = serde_json::to_string_pretty(&outcome).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    println!("Grid: {} ({}, {} layout)", path.display(), family.name(), family.layout.kind());
    print_outcome(&outcome);
    if fields {
        let matrix = grid
            .to_matrix(family.layout)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        println!("  Fields:");
        for (field, (role, value)) in FieldDecoder::new(&matrix).decode_all().iter().enumerate() {
            println!("    {:>2} {:<12} {}", field, role.label(), value);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &DecodeOutcome) {
    let record = &outcome.record;
    println!("  Date:   {}", record.timestamp);
    println!("  Serial: {}", record.serial);
    if let Some(kind) = &record.document_type {
        println!("  Type:   {} (unconfirmed)", kind);
    }
    for extra in &record.extras {
        println!("  {}: {}", extra.label, extra.value);
    }
    if outcome.report.is_clean() {
        println!("  Integrity: ok");
    } else {
        for message in outcome.report.messages() {
            println!("  Warning: {}", message);
        }
    }
}

fn template_cmd(family: Option<&str>) -> Result<(), String> {
    let name = family.unwrap_or_else(|| config::family());
    let session = MicDecoder::for_family(name).map_err(|e| e.to_string())?;
    let family = find_family(name).map_err(|e| e.to_string())?;
    println!("family: {}", family.name());
    print!("{}", render_grid(session.matrix()));
    Ok(())
}

fn families_cmd() {
    for kind in LayoutKind::ALL {
        let layout = kind.layout();
        println!(
            "{} ({} columns x {} rows, {:?} orientation)",
            kind,
            layout.columns(),
            layout.rows(),
            layout.orientation()
        );
        for family in families_using(kind) {
            println!("  {}", family.name());
        }
    }
    println!("{} families", FAMILIES.len());
}

fn batch_cmd(
    root: &Path,
    family: Option<&str>,
    limit: Option<usize>,
    options: ValidationOptions,
) -> Result<(), String> {
    let files = grid_files(root, limit);
    if files.is_empty() {
        return Err(format!("no grid files under {}", root.display()));
    }
    let start = Instant::now();

    let loaded: Vec<(PathBuf, Result<GridFile, String>)> = files
        .par_iter()
        .map(|path| (path.clone(), load_grid_file(path).map_err(|e| e.to_string())))
        .collect();

    let mut lines: Vec<(PathBuf, String)> = Vec::new();
    let mut jobs: Vec<(PathBuf, &'static Layout, Vec<Vec<u8>>)> = Vec::new();
    for (path, grid) in loaded {
        let grid = match grid {
            Ok(grid) => grid,
            Err(err) => {
                lines.push((path, err));
                continue;
            }
        };
        match find_family(resolve_family(family, &grid)) {
            Ok(family) => jobs.push((path, family.layout, grid.cells)),
            Err(err) => lines.push((path, err.to_string())),
        }
    }
    let failed_to_load = lines.len();

    // one parallel batch per layout
    let mut decoded = 0usize;
    let mut clean = 0usize;
    for kind in LayoutKind::ALL {
        let layout = kind.layout();
        let (paths, grids): (Vec<PathBuf>, Vec<Vec<Vec<u8>>>) = jobs
            .iter()
            .filter(|(_, l, _)| l.kind() == kind)
            .map(|(path, _, cells)| (path.clone(), cells.clone()))
            .unzip();
        if grids.is_empty() {
            continue;
        }
        for (path, result) in paths.into_iter().zip(decode_batch(layout, &grids, options)) {
            let line = match result {
                Ok(outcome) => {
                    decoded += 1;
                    if outcome.report.is_clean() {
                        clean += 1;
                    }
                    summary_line(&outcome)
                }
                Err(err) => err.to_string(),
            };
            lines.push((path, line));
        }
    }

    lines.sort_by(|a, b| a.0.cmp(&b.0));
    for (path, line) in &lines {
        println!("{}: {}", path.display(), line);
    }
    println!(
        "Decoded {} of {} grids ({} clean, {} failed) in {:.1} ms",
        decoded,
        files.len(),
        clean,
        files.len() - decoded,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if failed_to_load > 0 {
        println!("{} files could not be read", failed_to_load);
    }
    Ok(())
}

fn summary_line(outcome: &DecodeOutcome) -> String {
    format!(
        "{} serial {} ({})",
        outcome.record.timestamp,
        outcome.record.serial,
        if outcome.report.is_clean() {
            "ok"
        } else {
            "warnings"
        }
    )
}
