use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use serde_formtree::{FormData, ParseOptions, Scalar};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "formtree", version, about = "Build nested JSON from bracket-named form entries")]
struct Args {
    /// Entries file: a JSON array of {"name", "value"} objects. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Indentation size (default: 2, 0 for compact output).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Keep spaces and stray '[' in the leading field name instead of folding them to '_'.
    #[arg(long = "no-normalize", action = ArgAction::SetFalse, default_value_t = true)]
    normalize: bool,

    /// Print the entries that would be submitted, with the tree packed into one JSON field
    /// (default field name: __dataJSON__).
    #[arg(long, value_name = "name", num_args = 0..=1, default_missing_value = "")]
    envelope: Option<String>,

    /// Log skipped entries to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

#[derive(Serialize)]
struct EntryOut<'a> {
    name: &'a str,
    value: &'a Scalar,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if args.verbose {
        log::set_logger(&LOGGER)?;
        log::set_max_level(LevelFilter::Debug);
    }

    let (input_text, input_source) = read_input(args.input.as_deref())?;
    let entries: Value = serde_json::from_str(&input_text)?;
    if !entries.is_array() {
        return Err("input must be a JSON array of {\"name\", \"value\"} objects".into());
    }
    let form = FormData::from_json_entries(&entries);
    let options = ParseOptions::new().with_normalize_first_name(args.normalize);

    let output = match args.envelope.as_deref() {
        Some(name) => {
            let packed = form.pack_json(Some(name), &options)?;
            let out: Vec<EntryOut<'_>> = packed
                .iter()
                .map(|entry| EntryOut {
                    name: &entry.name,
                    value: &entry.value,
                })
                .collect();
            serde_json::to_value(out)?
        }
        None => serde_formtree::to_json_value(&form.to_tree(&options))?,
    };

    let output_path = args.output.as_deref().filter(|path| *path != "-");
    with_output_writer(output_path, |writer| write_json(writer, &output, args.indent))?;
    if let Some(path) = output_path {
        report_status(&input_source, path);
    }
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    println!("✔ Built {input_label} → {}", display_path(output_path));
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    abs.strip_prefix(&cwd)
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_else(|_| abs.to_string_lossy().into_owned())
}
