use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{Parser, ValueEnum};
use formtree::{BuildOptions, FormTree, FormValues};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formtree", version, about = "Turn dotted form keys into a JSON tree")]
struct Args {
    /// Input file path (.json or urlencoded). Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Input format (default: json for .json files, urlencoded otherwise).
    #[arg(short, long, value_enum, value_name = "format")]
    format: Option<FormatArg>,

    /// Indentation size, 0 for compact output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Keep integer-keyed maps as maps instead of turning them into arrays.
    #[arg(long = "no-arrayify")]
    no_arrayify: bool,

    /// Largest array index accepted in a form key.
    #[arg(long = "max-index", alias = "maxIndex", value_name = "number")]
    max_index: Option<usize>,

    /// Log build details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Urlencoded,
    Json,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "formtree=debug" } else { "formtree=warn" };
    let filter = match level.parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let (input, input_source) = read_input(args.input.as_deref())?;
    let format = resolve_format(args, &input_source);
    debug!(?format, ?input_source, bytes = input.len(), "read form input");

    let form = parse_form(&input, format)?;
    let mut options = BuildOptions::new().with_arrayify(!args.no_arrayify);
    if let Some(max_index) = args.max_index {
        options = options.with_max_index(max_index);
    }
    let tree = FormTree::with_options(form, &options)?;

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    with_output_writer(output_target.path(), |writer| {
        write_json(writer, &tree, args.indent)
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    Ok(())
}

fn resolve_format(args: &Args, input_source: &InputSource) -> FormatArg {
    if let Some(format) = args.format {
        return format;
    }

    match input_source {
        InputSource::Stdin => FormatArg::Urlencoded,
        InputSource::File(path) => match Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => FormatArg::Json,
            _ => FormatArg::Urlencoded,
        },
    }
}

fn parse_form(input: &str, format: FormatArg) -> Result<FormValues, Box<dyn Error>> {
    match format {
        FormatArg::Json => Ok(formtree::parse_json_form(input)?),
        // Bodies saved by hand usually end in a newline that is not part of the last value.
        FormatArg::Urlencoded => Ok(formtree::parse_urlencoded(input.trim_end().as_bytes())),
    }
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

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
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

fn write_json(writer: &mut dyn Write, tree: &FormTree, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, tree)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    tree.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    let output_label = display_path(output_path);
    info!(input = %input_label, output = %output_label, "wrote form tree");
    println!("✔ Built {input_label} → {output_label}");
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
