//! Sciscript CLI - sub/superscript markup for chemical formulas and units

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use sciscript::{
    convert_at, convert_with_diagnostics,
    diagnostics::{check_expression, format_diagnostics},
    units::{is_builtin_unit, BUILTIN_UNITS},
    ConversionError, ConversionResult, MathOverride, ModeOverride, NoMathContext, Options,
    UnitSymbol,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, BufRead};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sciscript")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Sciscript - Typeset-ready markup for chemical formulas and physical units", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Expressions to convert (reads one per line from stdin if none given)
    expressions: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Treat every expression as a molecule
    #[arg(long, conflicts_with = "unit")]
    molecule: bool,

    /// Treat every expression as a unit expression
    #[arg(long)]
    unit: bool,

    /// Output is inserted inside an existing math region
    #[arg(long)]
    math: bool,

    /// Print the kind used next to each result
    #[arg(short = 'k', long)]
    show_kind: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging (equivalent to RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

/// Options shared by every command
#[cfg(feature = "cli")]
#[derive(clap::Args)]
struct ConfigArgs {
    /// Load options from a TOML file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Numbers at or above this value are rendered as isotopes
    #[arg(long, global = true)]
    isotope_limit: Option<u64>,

    /// Text inserted between unit terms
    #[arg(long, global = true)]
    space: Option<String>,

    /// Always wrap results in \mathrm{...}
    #[arg(long, global = true)]
    mathrm: bool,

    /// Do not use the built-in unit vocabulary
    #[arg(long, global = true)]
    no_builtin_units: bool,

    /// Extra unit symbol, as SYM or SYM=REPLACEMENT (repeatable)
    #[arg(long = "add-unit", value_name = "SYM[=REPL]", global = true)]
    units: Vec<String>,

    /// Exact-match override, as RAW=OUTPUT (repeatable)
    #[arg(long = "exception", value_name = "RAW=OUTPUT", global = true)]
    exceptions: Vec<String>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check expressions for potential conversion issues
    Check {
        /// Expressions to check
        expressions: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the kind the classifier picks for each expression
    Classify {
        /// Expressions to classify
        expressions: Vec<String>,
    },

    /// Convert the expression before a caret offset in a file
    Span {
        /// Document to edit
        file: String,

        /// Byte offset of the caret
        #[arg(long)]
        caret: usize,

        /// Write the edited document back instead of printing it
        #[arg(long)]
        in_place: bool,
    },

    /// List the effective unit vocabulary
    Units,

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if cli.verbose { "debug" } else { "warn" },
    ));
    logger.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> ConversionResult<()> {
    let options = build_options(&cli.config)?;

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &options);
    }

    let mode = if cli.molecule {
        ModeOverride::ForceMolecule
    } else if cli.unit {
        ModeOverride::ForceUnit
    } else {
        ModeOverride::Auto
    };
    let math = if cli.math {
        MathOverride::ForceMath
    } else {
        MathOverride::Auto
    };

    let expressions = read_expressions(cli.expressions)?;
    let mut warning_count = 0;

    for raw in &expressions {
        let conversion = convert_with_diagnostics(raw, mode, math, &options, &NoMathContext);

        if !cli.quiet {
            for warning in &conversion.warnings {
                eprintln!("\x1b[33m[{}]\x1b[0m {}", raw, warning);
            }
        }
        warning_count += conversion.warnings.len();

        if cli.show_kind {
            println!("{}\t{}", conversion.kind, conversion.output);
        } else {
            println!("{}", conversion.output);
        }
    }

    // Check strict mode
    if cli.strict && warning_count > 0 {
        eprintln!(
            "Error: {} conversion warning(s) in strict mode",
            warning_count
        );
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, options: &Options) -> ConversionResult<()> {
    match cmd {
        Commands::Check {
            expressions,
            no_color,
        } => {
            let mut any_errors = false;
            for raw in read_expressions(expressions)? {
                let result = check_expression(&raw, options);
                println!("{}", raw);
                println!("{}", format_diagnostics(&result, !no_color));
                println!();
                any_errors |= result.has_errors();
            }

            if any_errors {
                std::process::exit(1);
            }
        }

        Commands::Classify { expressions } => {
            for raw in read_expressions(expressions)? {
                println!("{}\t{}", sciscript::classify(&raw, options), raw);
            }
        }

        Commands::Span {
            file,
            caret,
            in_place,
        } => {
            let text = fs::read_to_string(&file)?;
            let span = convert_at(
                &text,
                caret,
                ModeOverride::Auto,
                MathOverride::Auto,
                options,
            )
            .ok_or_else(|| {
                ConversionError::invalid(format!("no expression before offset {}", caret))
            })?;

            eprintln!(
                "{}: converted '{}' as {}",
                file,
                &text[span.start..span.end],
                span.conversion.kind
            );
            let edited = span.apply(&text);
            if in_place {
                fs::write(&file, edited)?;
                eprintln!("✓ Output written to: {}", file);
            } else {
                print!("{}", edited);
            }
        }

        Commands::Units => {
            for (symbol, replacement) in options.vocabulary() {
                let origin = if is_builtin_unit(symbol)
                    && !options.units.iter().any(|u| u.symbol == symbol)
                {
                    "builtin"
                } else {
                    "config"
                };
                match replacement {
                    Some(text) => println!("{}\t{}\t{}", symbol, origin, text),
                    None => println!("{}\t{}", symbol, origin),
                }
            }
        }

        Commands::Info => {
            println!("Sciscript - Typeset-ready markup for chemical formulas and physical units");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Molecules: H2O -> H$_2$O, C18O -> C$^{{18}}$O");
            println!("  ✓ Units: m2s-2 -> m$^2$ s$^{{-2}}$, 2.74e-13 -> $2.74\\times10^{{-13}}$");
            println!("  ✓ Automatic unit/molecule classification");
            println!("  ✓ \\mathrm rendering for math regions");
            println!("  ✓ Caret-based conversion inside documents");
            println!();
            println!("Disambiguation:");
            println!("  C18.H   trailing '.' forces a subscript");
            println!("  H2.18O  leading '.' forces a superscript");
            println!();
            println!("Built-in unit symbols: {}", BUILTIN_UNITS.len());
            println!("Isotope limit: {}", options.isotope_limit);
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides
#[cfg(feature = "cli")]
fn build_options(args: &ConfigArgs) -> ConversionResult<Options> {
    let mut options = match args.config {
        Some(ref path) => Options::from_toml_str(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };

    if let Some(limit) = args.isotope_limit {
        options.isotope_limit = limit;
    }
    if let Some(ref space) = args.space {
        options.space = space.clone();
    }
    if args.mathrm {
        options.use_mathrm = true;
    }
    if args.no_builtin_units {
        options.use_builtin_units = false;
    }
    for spec in &args.units {
        options.add_unit(UnitSymbol::parse(spec)?)?;
    }
    for spec in &args.exceptions {
        let (raw, output) = spec.split_once('=').ok_or_else(|| {
            ConversionError::config_key("exception", format!("expected RAW=OUTPUT, got '{}'", spec))
        })?;
        options.exceptions.insert(raw.to_string(), output.to_string());
    }

    options.validate()?;
    Ok(options)
}

/// Use the given expressions, or read non-empty lines from stdin
#[cfg(feature = "cli")]
fn read_expressions(expressions: Vec<String>) -> ConversionResult<Vec<String>> {
    if !expressions.is_empty() {
        return Ok(expressions);
    }

    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install sciscript --features cli");
    eprintln!("  sciscript [OPTIONS] [EXPRESSIONS]...");
}
