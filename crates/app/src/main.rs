use std::{
    io::BufRead,
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Instant,
};

use algorithm_visualiser_core::{
    Algorithm, AppConfig, Category, Presenter, RenderModel, Session, Subjects, TraceExport,
    VisualiserError,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalPresenter;

fn main() -> algorithm_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List => run_list(),
        Commands::Trace {
            algorithm,
            input,
            output,
            json,
        } => run_trace(config, &algorithm, &input, output.as_deref(), json),
        Commands::Play {
            algorithm,
            input,
            speed,
            record,
        } => run_play(config, &algorithm, &input, speed, record.as_deref()),
        Commands::Interactive { input } => run_interactive(config, &input),
    }
}

fn run_list() -> algorithm_visualiser_core::Result<()> {
    for algorithm in Algorithm::ALL {
        let info = algorithm.info();
        println!(
            "{:<22} {:<10} best {:<10} avg {:<10} worst {:<10} space {:<8} {}",
            algorithm.slug(),
            info.category,
            info.time.best,
            info.time.average,
            info.time.worst,
            info.space,
            info.description,
        );
    }
    Ok(())
}

fn run_trace(
    config: AppConfig,
    algorithm: &str,
    input: &InputArgs,
    output: Option<&Path>,
    json: bool,
) -> algorithm_visualiser_core::Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let mut model = RenderModel::new();
    let mut session = build_session(config, input, &mut model)?;
    session.select_algorithm(algorithm, &mut model);

    let steps = session
        .ensure_trace(&mut model)
        .cloned()
        .ok_or_else(|| VisualiserError::msg("no trace was generated"))?;
    tracing::info!(algorithm = algorithm.slug(), steps = steps.len(), "trace ready");

    let export = TraceExport {
        algorithm,
        input: session.values().to_vec(),
        target: (algorithm.category() == Category::Searching).then(|| session.target()),
        steps,
    };

    if let Some(path) = output {
        export.write_json(path)?;
        tracing::info!(?path, "wrote trace");
    } else if json {
        println!("{}", export.to_json()?);
    } else {
        println!("{} over {:?}", algorithm, export.input);
        for (index, step) in export.steps.iter().enumerate() {
            let subjects = match &step.subjects {
                Subjects::Indices(indices) => format!("{indices:?}"),
                Subjects::Node(node) => format!("node {node}"),
                Subjects::None => String::new(),
            };
            println!("{index:>4}  {:<10} {:<16} {}", step.kind, subjects, step.message);
        }
    }

    Ok(())
}

fn run_play(
    config: AppConfig,
    algorithm: &str,
    input: &InputArgs,
    speed: Option<f32>,
    record: Option<&Path>,
) -> algorithm_visualiser_core::Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let mut presenter = TerminalPresenter::new();
    if record.is_some() {
        presenter = presenter.with_recorder();
    }

    let mut session = build_session(config, input, &mut presenter)?;
    if let Some(speed) = speed {
        session.set_speed(speed)?;
    }
    session.select_algorithm(algorithm, &mut presenter);
    session.play(&mut presenter);
    presenter.flush()?;

    while let Some(wait) = session.time_until_next_advance() {
        thread::sleep(wait);
        session.tick(wait, &mut presenter);
        presenter.flush()?;
    }

    if let (Some(path), Some(recorder)) = (record, presenter.recorder()) {
        recorder.write_json(path)?;
        tracing::info!(?path, events = recorder.events().len(), "wrote presenter log");
    }
    Ok(())
}

fn run_interactive(config: AppConfig, input: &InputArgs) -> algorithm_visualiser_core::Result<()> {
    let mut presenter = TerminalPresenter::new();
    let mut session = build_session(config, input, &mut presenter)?;
    print_help();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        session.tick(now - last, &mut presenter);
        last = now;
        presenter.flush()?;

        let received = match session.time_until_next_advance() {
            Some(wait) => rx.recv_timeout(wait),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => match handle_command(line.trim(), &mut session, &mut presenter) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => eprintln!("error: {err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Runs one interactive command. Returns `false` when the user quits.
fn handle_command<P: Presenter>(
    line: &str,
    session: &mut Session,
    presenter: &mut P,
) -> algorithm_visualiser_core::Result<bool> {
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((line, ""));

    match command {
        "" => {}
        "q" | "quit" | "exit" => return Ok(false),
        "h" | "help" => print_help(),
        "list" => run_list()?,
        "select" | "s" => {
            let algorithm: Algorithm = argument.parse()?;
            session.select_algorithm(algorithm, presenter);
        }
        "play" | "p" => {
            session.play(presenter);
        }
        "pause" => {
            session.pause(presenter);
        }
        "toggle" | "t" => {
            if session.is_playing() {
                session.pause(presenter);
            } else {
                session.play(presenter);
            }
        }
        "step" | "n" => {
            session.step_forward(presenter);
        }
        "back" | "b" => {
            session.step_backward(presenter);
        }
        "reset" | "r" => session.reset(presenter),
        "speed" => {
            let speed = parse_argument::<f32>(argument, "speed")?;
            let applied = session.set_speed(speed)?;
            println!("speed {applied}x ({} ms per step)", session.delay().as_millis());
        }
        "input" => session.apply_custom_input(argument, presenter)?,
        "random" => session.randomize(presenter),
        "size" => {
            let size = parse_argument::<usize>(argument, "size")?;
            let applied = session.set_array_size(size, presenter);
            println!("array size {applied}");
        }
        "target" => {
            let target = parse_argument::<i64>(argument, "target")?;
            session.set_target(target, presenter);
        }
        "status" => println!(
            "algorithm: {}  state: {:?}  step: {} / {}  speed: {}x  target: {}  input: {:?}",
            session
                .algorithm()
                .map_or("none", |algorithm| algorithm.slug()),
            session.state(),
            session.cursor(),
            session.trace().map_or(0, |trace| trace.len()),
            session.speed(),
            session.target(),
            session.values(),
        ),
        other => {
            return Err(VisualiserError::invalid_input(format!(
                "unknown command `{other}`, type `help` for a list"
            )))
        }
    }

    Ok(true)
}

fn parse_argument<T: std::str::FromStr>(
    argument: &str,
    what: &str,
) -> algorithm_visualiser_core::Result<T> {
    argument
        .parse()
        .map_err(|_| VisualiserError::invalid_input(format!("`{argument}` is not a valid {what}")))
}

fn print_help() {
    println!(
        "commands: select <algorithm> | play | pause | toggle | step | back | reset | \
         speed <x> | input <n, n, ...> | random | size <n> | target <n> | status | list | quit"
    );
}

fn build_session<P: Presenter>(
    mut config: AppConfig,
    input: &InputArgs,
    presenter: &mut P,
) -> algorithm_visualiser_core::Result<Session> {
    if let Some(target) = input.target {
        config.input.search_target = target;
    }
    if let Some(size) = input.size {
        config.input.array_size = size;
    }
    if input.seed.is_some() {
        config.input.seed = input.seed;
    }

    let mut session = Session::new(config)?;
    if let Some(values) = &input.input {
        session.apply_custom_input(values, presenter)?;
    }
    Ok(session)
}

fn load_config(path: Option<&Path>) -> algorithm_visualiser_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading config");
            AppConfig::from_path(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Step-by-step algorithm visualiser", long_about = None)]
struct Cli {
    /// JSON config file with playback and input settings.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Comma separated input values, e.g. "5,3,8,1,9".
    #[arg(short, long)]
    input: Option<String>,
    /// Value the search algorithms look for.
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<i64>,
    /// Size of the random input when no values are given.
    #[arg(long)]
    size: Option<usize>,
    /// Seed for reproducible random input.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the available algorithms and their complexity classes.
    List,
    /// Generate the full step trace for one algorithm.
    Trace {
        /// Algorithm name, e.g. `bubble-sort` or `bfs`.
        algorithm: String,
        #[command(flatten)]
        input: InputArgs,
        /// Write the trace as JSON to this path.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the trace as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Animate an algorithm in the terminal until it completes.
    Play {
        /// Algorithm name, e.g. `quick-sort`.
        algorithm: String,
        #[command(flatten)]
        input: InputArgs,
        /// Speed multiplier; the step delay is the base delay divided by it.
        #[arg(long)]
        speed: Option<f32>,
        /// Write every presenter call as JSON to this path.
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Drive a session with line commands on stdin.
    Interactive {
        #[command(flatten)]
        input: InputArgs,
    },
}
