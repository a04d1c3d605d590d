//! Very simple tool that accepts SVG path as an input and prints its bounding box
#![deny(warnings)]

use pathbbox::*;
use std::{
    env,
    fs::File,
    io::{BufReader, Read, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    json_input: bool,
    json_output: bool,
    segments: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            json_input: false,
            json_output: false,
            segments: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "pathbbox".to_owned());
        for arg in args {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-j" => result.json_output = true,
                "-J" => result.json_input = true,
                "-s" => result.segments = true,
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        _ => return Err("unexpected positional argment".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Very simple tool that accepts SVG path as an input and prints its bounding box");
            eprintln!("\nUSAGE:");
            eprintln!("    {} [-j] [-J] [-s] <file.path>", cmd);
            eprintln!("\nARGS:");
            eprintln!("    -j                 print bounding boxes as JSON");
            eprintln!("    -J                 input is a JSON array of path commands");
            eprintln!("    -s                 print bounding box of each segment");
            eprintln!("    <file.path>        file containing SVG path ('-' means stdin)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

/// Load path from the file
fn path_load(path: &str, json: bool) -> Result<Path, Error> {
    let input: Box<dyn Read> = if path != "-" {
        Box::new(BufReader::new(File::open(path)?))
    } else {
        Box::new(std::io::stdin())
    };
    let path = tracing::debug_span!("[parse]").in_scope(|| {
        if json {
            Path::read_json(input)
        } else {
            Path::read_svg_path(input)
        }
    })?;
    Ok(path)
}

/// Write single bounding box, empty path is reported as `null` or `none`
fn bbox_write(out: &mut impl Write, bbox: Option<Rect>, json: bool) -> Result<(), Error> {
    if json {
        serde_json::to_writer(&mut *out, &bbox)?;
        writeln!(out)?;
    } else {
        match bbox {
            Some(bbox) => writeln!(out, "{}", bbox)?,
            None => writeln!(out, "none")?,
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let path = path_load(&args.input_file, args.json_input)?;
    tracing::debug!("[path:segments_count] {}", path.segments_count());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.segments {
        for segment in path.segments() {
            bbox_write(&mut out, Some(segment.bbox(None)), args.json_output)?;
        }
    }
    let bbox = tracing::debug_span!("[bbox]").in_scope(|| path.bbox());
    bbox_write(&mut out, bbox, args.json_output)?;
    Ok(())
}
