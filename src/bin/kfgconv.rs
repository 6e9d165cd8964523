//! Converts, inspects and verifies remap configuration files.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use keycap_config::{
    load_from_path, save, save_with_settings, ConfigError, Encoding, FileGroup, PersistSettings,
    RemapEntry, DATA_FORMAT_VERSION, FILE_DATA_PREFIX,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Remap configuration tool")]
struct Cli {
    /// Log codec activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a .kfg or .json file in the other encoding next to it.
    Convert {
        input: PathBuf,
        #[arg(long, value_enum)]
        to: Option<Target>,
    },
    /// Print the header and a table of entries.
    Inspect { input: PathBuf },
    /// Load a file and report how many entries it holds.
    Verify { input: PathBuf },
    /// Re-save a file in every encoding selected by the settings file.
    SaveAll {
        input: PathBuf,
        #[arg(long, default_value = "kfgconv.toml")]
        settings: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Binary,
    Json,
}

impl From<Target> for Encoding {
    fn from(value: Target) -> Self {
        match value {
            Target::Binary => Encoding::Binary,
            Target::Json => Encoding::Json,
        }
    }
}

#[derive(Tabled)]
struct EntryRow {
    index: usize,
    input: String,
    outputs: usize,
    description: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast::<ConfigError>() {
                Ok(config_err) => eprintln!("{:?}", miette::Report::new(config_err)),
                Err(other) => eprintln!("error: {other:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert { input, to } => convert(&input, to.map(Encoding::from)),
        Command::Inspect { input } => inspect(&input),
        Command::Verify { input } => verify(&input),
        Command::SaveAll { input, settings } => save_all(&input, &settings),
    }
}

fn source_encoding(input: &Path) -> Result<Encoding> {
    Ok(Encoding::from_path(input).ok_or_else(|| ConfigError::UnknownExtension {
        path: input.to_path_buf(),
    })?)
}

fn convert(input: &Path, to: Option<Encoding>) -> Result<()> {
    let from = source_encoding(input)?;
    let target = to.unwrap_or_else(|| from.counterpart());
    let entries: Vec<RemapEntry> = load_from_path(input)?;
    let written = save(&entries, &FileGroup::new(input), target)?;
    info!(from = %from, to = %target, count = entries.len(), "converted configuration");
    println!("{} -> {}", input.display(), written.display());
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let encoding = source_encoding(input)?;
    let entries: Vec<RemapEntry> = load_from_path(input)?;
    print!("{}", render_inspection(input, encoding, &entries)?);
    Ok(())
}

fn render_inspection(input: &Path, encoding: Encoding, entries: &[RemapEntry]) -> Result<String> {
    let rows: Vec<EntryRow> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryRow {
            index,
            input: format!("0x{:02X}", entry.input.virtual_key),
            outputs: entry.outputs.len(),
            description: entry.to_string(),
        })
        .collect();

    let mut report = String::new();
    writeln!(&mut report, "file:     {}", input.display())?;
    writeln!(&mut report, "encoding: {encoding}")?;
    writeln!(&mut report, "prefix:   0x{FILE_DATA_PREFIX:08X}")?;
    writeln!(&mut report, "version:  {DATA_FORMAT_VERSION}")?;
    writeln!(&mut report, "entries:  {}", entries.len())?;
    if !rows.is_empty() {
        writeln!(&mut report)?;
        writeln!(&mut report, "{}", Table::new(rows).with(Style::markdown()))?;
    }
    Ok(report)
}

fn verify(input: &Path) -> Result<()> {
    let entries: Vec<RemapEntry> = load_from_path(input)?;
    println!("{}: ok ({} entries)", input.display(), entries.len());
    Ok(())
}

fn save_all(input: &Path, settings_path: &Path) -> Result<()> {
    let settings = PersistSettings::load_from(settings_path)?;
    let entries: Vec<RemapEntry> = load_from_path(input)?;
    let written = save_with_settings(&entries, &FileGroup::new(input), &settings)?;
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
