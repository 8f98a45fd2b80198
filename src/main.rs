
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod frontend;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs;
use std::path::Path;

use frontend::{ir, scanner, validator::Validator};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let mode = if args.is_present("scan") {
        "scan"
    } else if args.is_present("ir") {
        "ir"
    } else {
        "parse"
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tMode: {}\n\tPrint Debug: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        mode,
        args.is_present("print-debug"),
        args.value_of("INPUT").unwrap()
    );

    let ifile = args.value_of("INPUT").unwrap();
    let ipath = Path::new(ifile);

    if ipath.extension().and_then(|e| e.to_str()) != Some("iloc") {
        error!("fatal: cannot compile `{}`: expected a `.iloc` file extension", ipath.display());
        std::process::exit(1);
    }

    // The file is read in full before any pipeline stage runs.
    let source = match fs::read_to_string(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(text) => text,
    };

    let source_lines: Vec<String> = source.lines().map(str::to_owned).collect();
    let tokens = scanner::scan(&source_lines);
    debug!("scanned {} token(s) from {} line(s)", tokens.len(), source_lines.len());

    if mode == "scan" {
        for token in tokens.iter() {
            println!("{}", token);
        }
        return;
    }

    let diagnostics = Validator::new(&tokens).run();
    debug!("validation produced {} diagnostic(s)", diagnostics.len());

    if !diagnostics.is_empty() {
        for diagnostic in diagnostics.iter() {
            println!("{}", diagnostic);
        }
        return;
    }

    if mode == "parse" {
        println!("VALID ILOC PROGRAM");
        println!("Compilation Successful!");
        return;
    }

    let instructions = ir::build(&tokens);

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for ins in instructions.iter() {
            grid.add(Cell::from(format!("Line {}:", ins.line)));
            grid.add(Cell::from(ins.opcode.to_string()));
            grid.add(Cell::from(ins.op1.clone().unwrap_or_default()));
            grid.add(Cell::from(ins.op2.clone().unwrap_or_default()));
            grid.add(Cell::from(ins.op3.clone().unwrap_or_default()));
        }

        println!("{}", grid.fit_into_columns(5));
    }

    for ins in instructions.iter() {
        println!("{}", ins);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("scan")
            .short("s")
            .long("scan")
            .takes_value(false)
            .conflicts_with_all(&["parse", "ir"])
            .help("scan only: print the token stream"))
        .arg(Arg::with_name("parse")
            .short("p")
            .long("parse")
            .takes_value(false)
            .conflicts_with("ir")
            .help("scan and validate, report errors or success (default)"))
        .arg(Arg::with_name("ir")
            .short("r")
            .long("ir")
            .takes_value(false)
            .help("scan, validate, and print the intermediate representation"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .takes_value(false)
            .help("prints the IR as an aligned listing alongside the normal output"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
