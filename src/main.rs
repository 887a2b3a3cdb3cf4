//! Strandscan - Sequence Analysis Toolkit
//!
//! Command-line front end: applies one registry operation to every record
//! of a multi-FASTA file, lists the supported operations, or rewrites
//! duplicate record identifiers.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::sync::mpsc;
use std::thread;

use clap::{Arg, ArgAction, Command};
use serde_json::json;

use strandscan::analysis::{
    apply_to_records, assign_unique_ids, parse_fasta, BatchProgress, FrameTrack, Operation,
    OperationOutput, OperationParams, SixFrameView, ThreadCount, SUPPORTED_OPERATIONS,
};

fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("strandscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sequence analysis over multi-FASTA input: translation, composition, motif search")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input FASTA file (default: stdin)"),
        )
        .arg(
            Arg::new("apply")
                .short('a')
                .long("apply")
                .value_name("OPERATION")
                .help("Operation to apply to every record (see --describe)"),
        )
        .arg(
            Arg::new("describe")
                .long("describe")
                .action(ArgAction::SetTrue)
                .help("List the supported operations and exit"),
        )
        .arg(
            Arg::new("uniq-ids")
                .long("uniq-ids")
                .action(ArgAction::SetTrue)
                .help("Rewrite duplicate record identifiers and print the records"),
        )
        .arg(
            Arg::new("frame")
                .short('f')
                .long("frame")
                .value_name("N")
                .allow_hyphen_values(true)
                .help("Reading frame for translate: 1, 2, 3, -1, -2, -3 (default: 1)"),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .value_name("ID")
                .help("NCBI genetic code table id (default: 1)"),
        )
        .arg(
            Arg::new("window")
                .short('w')
                .long("window")
                .value_name("N")
                .help("Window size for gc-skew (default: 100)"),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .value_name("SEQ")
                .help("IUPAC query for search (ambiguity codes allowed)"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Worker threads (default: all cores)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit results as JSON"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress progress messages"),
        )
        .get_matches();

    if matches.get_flag("describe") {
        println!("available operations:");
        for name in SUPPORTED_OPERATIONS {
            println!("  {name}");
        }
        return Ok(());
    }

    let text = match matches.get_one::<String>("input") {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let mut records = parse_fasta(&text);

    if matches.get_flag("uniq-ids") {
        assign_unique_ids(&mut records);
        for record in &records {
            println!(">{}\n{}", record.id, record.sequence);
        }
        return Ok(());
    }

    let name = matches
        .get_one::<String>("apply")
        .ok_or("missing --apply <OPERATION> (try --describe)")?;

    let mut params = OperationParams::default();
    if let Some(v) = matches.get_one::<String>("frame") {
        params.frame = v.parse()?;
    }
    if let Some(v) = matches.get_one::<String>("table") {
        params.table = v.parse()?;
    }
    if let Some(v) = matches.get_one::<String>("window") {
        params.window = v.parse()?;
    }
    params.pattern = matches.get_one::<String>("pattern").cloned();

    let operation = Operation::build(name, &params)?;

    let threads = match matches.get_one::<String>("threads") {
        Some(v) => ThreadCount::Fixed(v.parse()?),
        None => ThreadCount::Auto,
    };

    let quiet = matches.get_flag("quiet");
    let (progress_tx, printer) = if quiet {
        (None, None)
    } else {
        let (tx, rx) = mpsc::channel::<BatchProgress>();
        let handle = thread::spawn(move || {
            for update in rx {
                eprintln!("{}", update.message);
            }
        });
        (Some(tx), Some(handle))
    };

    let results = apply_to_records(&records, &operation, threads, progress_tx)?;
    if let Some(handle) = printer {
        let _ = handle.join();
    }

    if matches.get_flag("json") {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(id, output)| json!({ "id": id, "result": output }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        render_text(&results);
    }

    Ok(())
}

fn render_text(results: &[(String, OperationOutput)]) {
    for (id, output) in results {
        match output {
            OperationOutput::Sequence(s) | OperationOutput::Protein(s) => {
                println!(">{id}\n{s}");
            }
            OperationOutput::Weight(w) => println!("{id}\t{w:.4}"),
            OperationOutput::GcPercent(gc) => println!("{id}\t{gc:.2}"),
            OperationOutput::Composition(m) => println!(
                "{id}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
                m.overall, m.position[0], m.position[1], m.position[2]
            ),
            OperationOutput::Skew(s) => {
                let values: Vec<String> = s.values.iter().map(|v| format!("{v:.4}")).collect();
                println!("{id}\t{}", values.join(" "));
            }
            OperationOutput::Matches(m) => {
                let positions: Vec<String> =
                    m.positions.iter().map(|p| p.to_string()).collect();
                println!("{id}\t{}\t{}", m.pattern, positions.join(","));
            }
            OperationOutput::SixFrame(view) => render_six_frame(id, view),
        }
    }
}

/// One amino acid per codon, spaced to its three nucleotide columns.
fn track_line(track: &FrameTrack) -> String {
    let spaced: Vec<String> = track.amino_acids.chars().map(String::from).collect();
    format!("{}{}", " ".repeat(track.offset), spaced.join("  "))
}

fn render_six_frame(id: &str, view: &SixFrameView) {
    let c = &view.base_counts;
    println!(">{id}");
    println!("a:{} t:{} g:{} c:{}", c.a, c.t, c.g, c.c);
    println!("sequence: {} nt, {:.2} %GC", view.length, view.gc_percent);
    println!();
    for row in &view.rows {
        println!("{}/{}", row.start + 1, row.start / 3 + 1);
        for track in &row.reverse {
            println!("{}", track_line(track));
        }
        println!("{}{:>5.0} %", row.sequence.to_lowercase(), row.gc_percent);
        println!("{}", row.complement.to_lowercase());
        for track in &row.forward {
            println!("{}", track_line(track));
        }
        println!();
    }
}
