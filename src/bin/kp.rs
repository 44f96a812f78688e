//! KP: Koordinatprocessering. Batch transformation of coordinate rows
//! through any operator the library knows, including the Borneo resources.
//!
//! Example:
//!
//! ```sh
//! echo 5.573408816 116.035751582 48.502 | kp "geo | borneo:wgs84_rso"
//! echo 704346.3829 617355.6843 | kp --inv --dms "geo | borneo:wgs84_rso"
//! ```
use anyhow::Context as _;
use borneo_geodesy::authoring::*;
use clap::Parser;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kp")]
#[command(author, version, long_about = None)]
#[command(about = "KP: The Borneo Geodesy Coordinate Processing program")]
struct Cli {
    /// The operation to carry out e.g. 'geo | borneo:wgs84_rso'
    operation: String,

    /// Inverse operation
    #[arg(long = "inv")]
    inverse: bool,

    /// Number of decimals in output. Full precision if not given
    #[arg(short = 'd', long)]
    decimals: Option<usize>,

    /// Output the first two coordinates as latitude and longitude in
    /// degrees, minutes and seconds
    #[arg(long)]
    dms: bool,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on. Read from stdin if none are given
    files: Vec<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is KP");
    debug!("{:#?}", options);

    // ::new() rather than ::default(), to get access to the builtin resources
    let mut ctx = Minimal::new();
    let op = ctx
        .op(&options.operation)
        .with_context(|| format!("instantiating '{}'", options.operation))?;
    let direction = if options.inverse { Inv } else { Fwd };

    let mut operands = Vec::new();
    if options.files.is_empty() {
        let stdin = std::io::stdin();
        read_rows(stdin.lock(), "stdin", &mut operands)?;
    } else {
        for path in &options.files {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_rows(BufReader::new(file), &path.to_string_lossy(), &mut operands)?;
        }
    }
    debug!("Read {} coordinates", operands.len());

    let n = ctx.apply(op, direction, &mut operands)?;
    if n < operands.len() {
        warn!("{} of {} coordinates failed", operands.len() - n, operands.len());
    }

    for coord in &operands {
        println!("{}", format_row(coord, options.decimals, options.dms));
    }
    Ok(())
}

/// Whitespace separated rows of up to 4 numbers, optionally in colon
/// separated sexagesimal notation. Blank lines and `#` comments are skipped.
/// Missing trailing coordinates are set to 0.
fn read_rows(reader: impl BufRead, source: &str, operands: &mut Vec<Coor4D>) -> anyhow::Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut coord = Coor4D::origin();
        for (i, item) in line.split_whitespace().take(4).enumerate() {
            coord[i] = angular::parse_sexagesimal(item)
                .with_context(|| format!("{source}, line {}: cannot parse '{item}'", index + 1))?;
        }
        operands.push(coord);
    }
    Ok(())
}

fn format_row(coord: &Coor4D, decimals: Option<usize>, dms: bool) -> String {
    let number = |value: f64| match decimals {
        Some(d) => format!("{value:.d$}"),
        None => format!("{value}"),
    };

    let mut fields = Vec::with_capacity(4);
    if dms && !coord.is_degenerate() {
        fields.push(angular::decimal_to_dms(coord[0], true));
        fields.push(angular::decimal_to_dms(coord[1], false));
    } else {
        fields.push(number(coord[0]));
        fields.push(number(coord[1]));
    }
    fields.push(number(coord[2]));
    fields.push(number(coord[3]));
    fields.join(" ")
}
