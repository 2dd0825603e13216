use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use lounge_slots::merge;
use lounge_slots::model::{BookingRecord, SlotRecord};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecordKind {
    /// Group slot records into contiguous runs
    Slots,
    /// Collapse booking records into one booking per run
    Bookings,
}

#[derive(Parser)]
#[command(
    name = "lounge-merge",
    about = "Coalesce back-to-back lounge reservations",
    version
)]
struct Cli {
    /// Shape of the input records
    #[arg(short, long, value_enum, env = "LOUNGE_KIND", default_value = "slots")]
    kind: RecordKind,

    /// JSON array of records (stdin if omitted)
    #[arg(short, long, env = "LOUNGE_INPUT")]
    input: Option<PathBuf>,

    /// Where to write merged JSON (stdout if omitted)
    #[arg(short, long, env = "LOUNGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long, env = "LOUNGE_PRETTY")]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // stdout carries the merged JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut raw = String::new();
    match &cli.input {
        Some(path) => {
            File::open(path)?.read_to_string(&mut raw)?;
        }
        None => {
            io::stdin().read_to_string(&mut raw)?;
        }
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);

    match cli.kind {
        RecordKind::Slots => {
            let records: Vec<SlotRecord> = serde_json::from_str(&raw)?;
            let report = merge::merge_slot_records(&records)?;
            info!(
                "{} slots -> {} groups, {} overlaps",
                records.len(),
                report.merged.len(),
                report.overlaps.len()
            );
            write_json(&mut out, &report.merged, cli.pretty)?;
        }
        RecordKind::Bookings => {
            let records: Vec<BookingRecord> = serde_json::from_str(&raw)?;
            let report = merge::merge_booking_records(&records)?;
            info!(
                "{} bookings -> {} merged, {} overlaps",
                records.len(),
                report.merged.len(),
                report.overlaps.len()
            );
            write_json(&mut out, &report.merged, cli.pretty)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)
}
