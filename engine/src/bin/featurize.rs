//! Batch feature extraction for building training data.
//!
//! Reads one URL per line and writes a CSV of feature vectors using the same
//! validation and extraction code as the server, so training rows and live
//! requests are featurized identically.

use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};
use tracing::{info, warn};

use phishguard_engine::{extract, validate, validator::trimmed, FeatureVector, FEATURE_NAMES};

#[derive(Parser, Debug)]
#[command(name = "featurize", about = "Convert URLs into feature CSV rows")]
struct Args {
    /// Input file with one URL per line (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Lines are `url<TAB>label`; the label is copied into a trailing column
    #[arg(short, long)]
    labelled: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "featurize=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let stdout = io::stdout();
    let summary = featurize(reader, BufWriter::new(stdout.lock()), args.labelled)?;

    info!(
        written = summary.written,
        skipped = summary.skipped,
        "Feature extraction completed"
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    written: usize,
    skipped: usize,
}

fn featurize<R: Read, W: Write>(reader: R, out: W, labelled: bool) -> csv::Result<Summary> {
    // Raw TSV lines: quotes in URLs or labels are data, not CSV quoting.
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::Fields)
        .from_reader(reader);
    let mut writer = Writer::from_writer(out);

    let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
    if labelled {
        header.push("label");
    }
    writer.write_record(&header)?;

    let mut summary = Summary::default();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let url = record.get(0).unwrap_or("");
        if url.is_empty() {
            continue;
        }

        let label = if labelled {
            match record.get(1) {
                Some(label) => Some(label),
                None => {
                    warn!(line, "Missing label column, skipping");
                    summary.skipped += 1;
                    continue;
                }
            }
        } else {
            None
        };

        let url = trimmed(url);
        let parsed = match validate(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(line, "Skipping {:?}: {}", url, e);
                summary.skipped += 1;
                continue;
            }
        };

        writer.write_record(row(&extract(url, &parsed), label))?;
        summary.written += 1;
        if summary.written % 500 == 0 {
            info!("Processed {} URLs", summary.written);
        }
    }

    writer.flush()?;
    Ok(summary)
}

fn row(features: &FeatureVector, label: Option<&str>) -> Vec<String> {
    features
        .values()
        .iter()
        .map(|v| (*v as u64).to_string())
        .chain(label.map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, labelled: bool) -> (String, Summary) {
        let mut out = Vec::new();
        let summary = featurize(input.as_bytes(), &mut out, labelled).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_unlabelled_rows() {
        let (csv, summary) = run("http://192.168.0.1/login\n\nftp://example.com\n", false);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], FEATURE_NAMES.join(","));
        assert_eq!(lines[1], "24,3,0,3,8,1,0,1,11,0");
        assert_eq!(lines.len(), 2);
        assert_eq!(summary, Summary { written: 1, skipped: 1 });
    }

    #[test]
    fn test_labelled_rows() {
        let input = "https://a.b.example.co.uk/x\tlegitimate\nhttp://example.com\n";
        let (csv, summary) = run(input, true);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[0].ends_with(",subdomain_count,label"));
        assert_eq!(lines[1], "27,4,0,3,0,0,1,0,13,2,legitimate");
        assert_eq!(summary, Summary { written: 1, skipped: 1 });
    }

    #[test]
    fn test_label_with_delimiters_stays_one_column() {
        let (csv, summary) = run("http://example.com/\tphish,ing \"x\"\n", true);
        assert_eq!(summary, Summary { written: 1, skipped: 0 });

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let header_len = reader.headers().unwrap().len();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), header_len);
        assert_eq!(&records[0][10], "phish,ing \"x\"");
        assert_eq!(&records[0][0], "19");
    }
}
