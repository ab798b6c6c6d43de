//! inception-report – command-line Lean Inception report generator.
//!
//! Usage:
//!   inception-report <report.json> [output.pdf] [--brand "Acme"]
//!
//! If `output.pdf` is omitted the PDF is written next to the input file with
//! the same stem (e.g. `workshop.json` → `workshop.pdf`).

use std::{env, fs, path::PathBuf, process};

use inception_report::{generate_from_json, ReportOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut brand: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--brand" | "-b" => match iter.next() {
                Some(v) => brand = Some(v.clone()),
                None => {
                    eprintln!("Error: --brand needs a value.");
                    print_usage(&args[0]);
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let mut options = ReportOptions::default();
    if let Some(brand) = brand {
        options.brand_name = brand;
    }

    let report = match generate_from_json(&json, &options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating output directory: {e}");
                process::exit(1);
            }
        }
    }

    match report.save_to(&output) {
        Ok(len) => {
            let pages = report.page_count();
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{}, {} section{})",
                output.display(),
                len,
                pages,
                if pages == 1 { "" } else { "s" },
                report.toc().len(),
                if report.toc().len() == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error writing '{}': {e}", output.display());
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("inception-report – Lean Inception workshop report generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <report.json> [output.pdf] [--brand \"Acme\"]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <report.json>  Workshop report: title, workshopName, templates, metadata");
    eprintln!("  [output.pdf]   Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --brand, -b    Brand name printed in every footer (default: Lean Inception)");
    eprintln!("  --help         Print this message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace page breaks and section layout.");
}
