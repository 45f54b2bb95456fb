//! declara – command-line declaration generator.
//!
//! Usage:
//!   declara <form.json> [output.pdf] [--underline-blanks] [--fonts DIR] [--russian]
//!
//! The form file carries the declarant profile, the auxiliary-person list,
//! and the optional verification string / base64 logo. If `output.pdf` is
//! omitted the document is written next to the form file under its standard
//! name (`declaracao_residencia.pdf`).

use std::{env, fs, path::PathBuf, process};

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use serde::Deserialize;

use declara::pipeline::{generate_document, DocumentConfig};
use declara::profile::{AuxiliaryPerson, DeclarantProfile, RenderOptions};
use declara::strings::DocumentStrings;

/// On-disk form file.
#[derive(Deserialize)]
struct FormFile {
    profile: DeclarantProfile,
    #[serde(default)]
    persons: Vec<AuxiliaryPerson>,
    #[serde(default)]
    verification_text: Option<String>,
    /// Base64-encoded PNG/JPEG.
    #[serde(default)]
    logo_base64: Option<String>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut underline_blanks = false;
    let mut russian = false;
    let mut fonts_dir: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--underline-blanks" | "-u" => underline_blanks = true,
            "--russian" | "-r" => russian = true,
            "--fonts" | "-f" => match iter.next() {
                Some(v) => fonts_dir = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--fonts requires a directory argument");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
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
            eprintln!("Error: no form file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };
    let form: FormFile = match serde_json::from_str(&json) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let logo = match &form.logo_base64 {
        Some(b64) => match BASE64_STD.decode(b64.trim()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                eprintln!("Error decoding logo_base64: {e}");
                process::exit(1);
            }
        },
        None => None,
    };

    let options = RenderOptions {
        underline_blanks,
        logo,
        verification_text: form.verification_text.clone(),
    };

    let mut config = DocumentConfig::default();
    if let Some(t) = title {
        config.title = t;
    }
    if russian {
        config.strings = DocumentStrings::russian_annotated();
    }
    if fonts_dir.is_some() {
        config.fonts_dir = fonts_dir;
    }

    match generate_document(&form.profile, &form.persons, &options, &config) {
        Ok(doc) => {
            // Default output: next to the form file, under the standard name.
            let output = output_path.unwrap_or_else(|| {
                input
                    .parent()
                    .map(|p| p.join(doc.file_name))
                    .unwrap_or_else(|| PathBuf::from(doc.file_name))
            });
            if let Err(e) = fs::write(&output, &doc.bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!("Wrote '{}' ({} bytes)", output.display(), doc.bytes.len());
        }
        Err(e) => {
            eprintln!("Error generating document: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("declara – residence-declaration PDF generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <form.json> [output.pdf] [--underline-blanks] [--fonts DIR] [--russian]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <form.json>    Form file: profile, persons, verification_text, logo_base64");
    eprintln!("  [output.pdf]   Output path (default: declaracao_residencia.pdf next to the form)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --underline-blanks, -u   Print fixed-width underscore runs for blank fields");
    eprintln!("  --fonts, -f DIR          Directory with DejaVuSans[-Bold|-Oblique].ttf");
    eprintln!("  --russian, -r            Russian-annotated headings");
    eprintln!("  --title, -t              Document title in the PDF metadata");
    eprintln!("  --help                   Print this message");
}
