// pl0quad: PL/0 to quadruple compiler with a step-through emission viewer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use simple_logger::SimpleLogger;

use pl0quad::compiler::constants::DEFAULT_HISTORY_LIMIT;
use pl0quad::snapshot::Replay;
use pl0quad::ui::App;
use pl0quad::{compile_with, report, Compilation, Options};

/// Exit code for bad command-line usage (EX_USAGE)
const EXIT_USAGE: u8 = 64;

enum Mode {
    /// Step through the emission history
    View,
    /// Print the quadruple program
    Print,
    /// Write the three reports into a directory
    Emit(PathBuf),
}

struct Args {
    input: PathBuf,
    mode: Mode,
    trace: bool,
    history_limit: usize,
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.pl0> [--print] [--emit <dir>] [--trace] [--history-limit <MiB>]",
        program_name
    );
    eprintln!();
    eprintln!("  (no mode)              step through code generation in the terminal UI");
    eprintln!("  --print                print the quadruple program to stdout");
    eprintln!("  --emit <dir>           write tokens.txt, symbols.txt and program.quad");
    eprintln!("  --trace                log every matched token and parser rule");
    eprintln!(
        "  --history-limit <MiB>  memory budget for the viewer history (default {})",
        DEFAULT_HISTORY_LIMIT / (1024 * 1024)
    );
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut mode = Mode::View;
    let mut trace = false;
    let mut history_limit = DEFAULT_HISTORY_LIMIT;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--print" => mode = Mode::Print,
            "--emit" => {
                let dir = iter.next().ok_or("--emit needs a directory")?;
                mode = Mode::Emit(PathBuf::from(dir));
            }
            "--trace" => trace = true,
            "--history-limit" => {
                let mib: usize = iter
                    .next()
                    .ok_or("--history-limit needs a size in MiB")?
                    .parse()
                    .map_err(|_| "--history-limit expects a whole number of MiB")?;
                if mib == 0 {
                    return Err("--history-limit must be at least 1 MiB".to_string());
                }
                history_limit = mib.saturating_mul(1024 * 1024);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => {
                if input.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    let input = input.ok_or("no input file provided")?;
    Ok(Args {
        input,
        mode,
        trace,
        history_limit,
    })
}

fn init_logger(trace: bool) {
    let logger = if trace {
        SimpleLogger::new().with_level(LevelFilter::Trace)
    } else {
        SimpleLogger::new().with_level(LevelFilter::Warn).env()
    };
    if let Err(err) = logger.init() {
        eprintln!("Warning: logger already initialised: {}", err);
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("pl0quad");

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    init_logger(args.trace);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(&args.input)
        .map_err(|err| format!("cannot read '{}': {}", args.input.display(), err))?;

    let options = Options {
        record_history: matches!(args.mode, Mode::View),
        history_limit: args.history_limit,
    };
    let compilation = compile_with(&source, &options)?;

    match &args.mode {
        Mode::Print => {
            print!("{}", report::quad_program(compilation.quads()));
            Ok(())
        }
        Mode::Emit(dir) => write_reports(&compilation, dir),
        Mode::View => run_viewer(compilation, source),
    }
}

fn write_reports(compilation: &Compilation, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;

    let reports = [
        ("tokens.txt", report::token_report(compilation.tokens())),
        ("symbols.txt", report::symbol_report(compilation.symbols())),
        ("program.quad", report::quad_program(compilation.quads())),
    ];
    for (name, text) in reports {
        let path = dir.join(name);
        fs::write(&path, text)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn run_viewer(compilation: Compilation, source: String) -> Result<(), Box<dyn std::error::Error>> {
    let replay = Replay::new(compilation)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(replay, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
