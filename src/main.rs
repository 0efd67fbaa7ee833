use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::LevelFilter;

use parlc::config::{CompilerConfig, OutputConfig};
use parlc::{CompileError, Parser, analyze, generate, lex};

/// Compile a pixel-language program to stack-VM assembly
#[derive(ClapParser, Debug)]
#[command(name = "parlc", version, about)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Output file (defaults to the input name with the configured extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,

    /// Print the parsed AST and stop
    #[arg(long)]
    ast: bool,

    /// Append notes to the generated listing
    #[arg(long)]
    annotate: bool,

    /// Configuration file (defaults to parlc.toml next to the input, then in
    /// the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `-v` and `-vv` pick the level outright
fn verbosity_filter(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Without `-v` the filter comes from `PARLC_LOG`, warnings only by default
fn init_logging(verbose: u8) {
    let mut builder = match verbosity_filter(verbose) {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(level);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::new().filter_or("PARLC_LOG", "warn")),
    };
    builder.format_timestamp(None).init();
}

fn load_config(cli: &Cli) -> Result<CompilerConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CompilerConfig::load(path)?,
        None => {
            let beside_input = cli
                .input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            CompilerConfig::load_or_default(&[beside_input, PathBuf::from(".")])?
        }
    };
    if cli.annotate {
        config.codegen.annotate = true;
    }
    Ok(config)
}

fn output_path(input: &Path, explicit: Option<&Path>, output: &OutputConfig) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(&output.extension),
    }
}

/// Returns `Ok(false)` when the program was rejected with a diagnostic
fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let config = load_config(cli)?;
    let source = fs::read_to_string(&cli.input)
        .map_err(|e| format!("{}: {}", cli.input.display(), e))?;
    let filename = cli.input.display().to_string();

    let report = |err: CompileError| {
        eprintln!("{}", err.format_with_source_and_file(&source, Some(&filename)));
        false
    };

    let tokens = match lex(&source) {
        Ok(tokens) => tokens,
        Err(e) => return Ok(report(e.into())),
    };
    if cli.tokens {
        for token in &tokens {
            println!("{:?} {:?}", token.kind, token.lexeme);
        }
        return Ok(true);
    }

    let mut program = match Parser::parse(&tokens) {
        Ok(program) => program,
        Err(e) => return Ok(report(e.into())),
    };
    if cli.ast {
        println!("{:#?}", program);
        return Ok(true);
    }

    let info = match analyze(&mut program) {
        Ok(info) => info,
        Err(e) => return Ok(report(e.into())),
    };

    let assembly = match generate(&program, &info, &config.codegen) {
        Ok(assembly) => assembly,
        Err(e) => return Ok(report(e.into())),
    };

    let out = output_path(&cli.input, cli.output.as_deref(), &config.output);
    fs::write(&out, assembly.render(config.codegen.annotate))
        .map_err(|e| format!("could not write to {}: {}", out.display(), e))?;
    log::info!("wrote {} instructions to {}", assembly.len(), out.display());
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
