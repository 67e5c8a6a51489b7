//! primc-drv - The compiler driver.
//!
//! Orchestrates the pipeline over one source file:
//!
//! ```text
//! read file -> lexer -> token pool -> parser -> AST
//!           -> analyser -> HIR -> MIR generator -> quadruple listing
//! ```
//!
//! Diagnostics and artifact dumps go to stderr through `tracing`
//! (token stream and AST at DEBUG level); the final MIR listing is the
//! compilation artifact and goes to stdout. Exit code 0 on success,
//! non-zero on any fatal error from any stage.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use primc_lex::{ErrorPolicy, Lexer};
use primc_mir::Generator;
use primc_par::Parser as PrimParser;
use primc_sem::Analyser;
use primc_util::diagnostic::{Handler, Level};

/// primc - compile a Prim source file to quadruple MIR.
#[derive(Parser, Debug)]
#[command(name = "primc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prim compiler: one source file in, a quadruple listing out")]
pub struct Cli {
    /// Source file to compile.
    #[arg(short = 'f', long = "file", default_value = "./test.program")]
    pub file: PathBuf,

    /// Log verbosity: DEBUG dumps every artifact, INFO reports stage
    /// progress and diagnostics, CLOSE silences the logger entirely.
    #[arg(short = 'm', long = "mode", value_enum, default_value = "INFO", ignore_case = true)]
    pub mode: Mode,
}

/// Logger verbosity modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "CLOSE")]
    Close,
}

impl Mode {
    fn filter(self) -> &'static str {
        match self {
            Mode::Debug => "debug",
            Mode::Info => "info",
            Mode::Close => "off",
        }
    }
}

/// Initialise the logging system. Diagnostics go to stderr so stdout
/// stays clean for the MIR listing.
fn init_logging(mode: Mode) {
    let filter = EnvFilter::new(mode.filter());
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    // A second init (tests driving run() twice) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Run the whole pipeline for the given invocation.
pub fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.mode);

    let source = primc_lex::read_source(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    tracing::info!("compiling {}", cli.file.display());

    // Lexical analysis. The driver uses the abort policy: the first
    // lexical error stops the compilation.
    let (pool, lex_errors) = Lexer::new(&source).tokenize(ErrorPolicy::Abort);
    if !lex_errors.is_empty() {
        for error in &lex_errors {
            tracing::error!("{}", error);
        }
        bail!("lexical analysis failed");
    }
    tracing::info!("lexer produced {} tokens", pool.len());
    for token in pool.iter() {
        tracing::debug!("{}", token);
    }

    // Parsing. Fatal on the first unexpected token.
    let ast = PrimParser::new(&pool)
        .parse_program()
        .context("parsing failed")?;
    tracing::info!("parser produced {} methods", ast.methods.len());
    if cli.mode == Mode::Debug {
        let json = serde_json::to_string_pretty(&ast).context("AST dump failed")?;
        tracing::debug!("AST:\n{}", json);
    }

    // Semantic analysis. Errors accumulate; the pipeline halts after
    // the stage if any were reported. Warnings are logged and ignored.
    let handler = Handler::new();
    let (hir, error_count) = Analyser::new(&handler).analyse(&ast);
    for diagnostic in handler.diagnostics() {
        match diagnostic.level {
            Level::Error => tracing::error!("{}", diagnostic),
            Level::Warning => tracing::warn!("{}", diagnostic),
        }
    }
    if error_count > 0 {
        bail!("semantic analysis failed with {} error(s)", error_count);
    }
    tracing::info!("analyser produced {} methods", hir.methods.len());

    // MIR generation. Fatal on missing main, orphan break/continue, or
    // a call to an unknown method.
    let mir = Generator::new(&hir)
        .generate()
        .context("MIR generation failed")?;
    tracing::info!("generator produced {} quadruples", mir.len());

    for (idx, quad) in mir.iter().enumerate() {
        println!("{:3}| {}", idx, quad);
    }
    Ok(())
}
