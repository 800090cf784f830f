use flowmap::{LayoutKind, Settings};
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Help,
    Usage(String),
    Flowmap(flowmap::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Help => write!(f, "{}", usage()),
            CliError::Usage(msg) => write!(f, "error: {msg}\n\n{}", usage()),
            CliError::Flowmap(err) => write!(f, "error: {err}"),
        }
    }
}

impl From<flowmap::Error> for CliError {
    fn from(value: flowmap::Error) -> Self {
        Self::Flowmap(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    iterations: Option<usize>,
    only: Vec<LayoutKind>,
    sequential: bool,
}

fn usage() -> &'static str {
    "flowmap\n\
\n\
Precomputes the forceatlas2, circular and radial layouts of the money-flow graph.\n\
\n\
USAGE:\n\
  flowmap [--input <path>] [--out-dir <dir>] [--config <path>] [--seed <n>] [--iterations <n>] [--only forceatlas2|circular|radial]... [--sequential]\n\
\n\
NOTES:\n\
  - Defaults: --input src/data/graph.json, --out-dir src/data/layouts, all strategies.\n\
  - --config reads a JSON settings file; flags override it.\n\
  - --only may be repeated to select several strategies; fa2 is short for forceatlas2.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) to change log verbosity; logs go to stderr.\n\
"
}

fn value<'a>(it: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str, CliError> {
    it.next()
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Help),
            "--input" => args.input = Some(PathBuf::from(value(&mut it, a)?)),
            "--out-dir" => args.out_dir = Some(PathBuf::from(value(&mut it, a)?)),
            "--config" => args.config = Some(PathBuf::from(value(&mut it, a)?)),
            "--seed" => {
                let raw = value(&mut it, a)?;
                args.seed = Some(
                    raw.parse::<u64>()
                        .map_err(|_| CliError::Usage(format!("invalid --seed `{raw}`")))?,
                );
            }
            "--iterations" => {
                let raw = value(&mut it, a)?;
                args.iterations = Some(
                    raw.parse::<usize>()
                        .map_err(|_| CliError::Usage(format!("invalid --iterations `{raw}`")))?,
                );
            }
            "--only" => {
                let raw = value(&mut it, a)?;
                let kind = raw
                    .parse::<LayoutKind>()
                    .map_err(|_| CliError::Usage(format!("unknown strategy `{raw}`")))?;
                args.only.push(kind);
            }
            "--sequential" => args.sequential = true,
            other => return Err(CliError::Usage(format!("unexpected argument `{other}`"))),
        }
    }

    Ok(args)
}

/// Defaults, then the settings file, then flags.
fn settings(args: Args) -> Result<Settings, CliError> {
    let mut s = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(input) = args.input {
        s.input = input;
    }
    if let Some(out_dir) = args.out_dir {
        s.out_dir = out_dir;
    }
    if let Some(seed) = args.seed {
        s.forceatlas2.random_seed = seed;
    }
    if let Some(iterations) = args.iterations {
        s.forceatlas2.iterations = iterations;
    }
    if !args.only.is_empty() {
        s.strategies = args.only;
    }
    if args.sequential {
        s.parallel = false;
    }
    Ok(s)
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = settings(args)?;
    tracing::debug!(?settings, "resolved settings");

    let summary = flowmap::run(&settings)?;
    for l in &summary.layouts {
        println!(
            "{} {} ({} ms)",
            l.kind,
            l.path.display(),
            l.elapsed.as_millis()
        );
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Help) => {
            println!("{}", usage());
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
