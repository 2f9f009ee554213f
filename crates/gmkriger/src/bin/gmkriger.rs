//! Command-line front end: Kriged intensity estimates for a site file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::info;
use tracing::level_filters::LevelFilter;

use gmkriger::logging;
use gmkriger::prelude::*;

struct CliArgs {
    log_level: Option<LevelFilter>,
    data_dir: Option<PathBuf>,
    earthquake: Option<String>,
    im: Option<String>,
    model: String,
    sites: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: bool,
    list: bool,
}

fn print_usage() {
    println!("Usage: gmkriger [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -h, --help                 Print help");
    println!("  -d, --data-dir <DIR>       Catalogue directory (default: $GMKRIGER_DATA_DIR or ./data)");
    println!("  -e, --earthquake <NAME>    Catalogue earthquake name");
    println!("  -m, --im <IM>              pga, pgv, ia, cav, cavdp, psa(0.3), psa(0.6), psa(1.0)");
    println!("      --model <SET>          all, realizations or map (default: all)");
    println!("  -s, --sites <PATH>         JSON array of {{id, lat, lon, vs30[, z1, z2p5]}}");
    println!("      --csv <PATH>           Also write the result table as CSV");
    println!("      --json                 Print the result as JSON instead of a table");
    println!("  -l, --list                 Print correlation-model availability and exit");
    println!("      --log-level <LEVEL>    off, error, warn, info, debug or trace (overrides -v)");
    println!("  -v, -vv, -vvv              Log info, debug or trace (default: warn, or $RUST_LOG)");
}

fn required(iter: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match iter.next() {
        Some(value) => value,
        None => {
            eprintln!("error: {flag} requires an argument");
            std::process::exit(2);
        }
    }
}

fn parse_cli_args() -> CliArgs {
    let mut args = CliArgs {
        log_level: None,
        data_dir: None,
        earthquake: None,
        im: None,
        model: "all".to_string(),
        sites: None,
        csv: None,
        json: false,
        list: false,
    };
    let mut verbosity = 0u8;
    let mut explicit_level = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-d" | "--data-dir" => args.data_dir = Some(required(&mut iter, &arg).into()),
            "-e" | "--earthquake" => args.earthquake = Some(required(&mut iter, &arg)),
            "-m" | "--im" => args.im = Some(required(&mut iter, &arg)),
            "--model" => args.model = required(&mut iter, &arg),
            "-s" | "--sites" => args.sites = Some(required(&mut iter, &arg).into()),
            "--csv" => args.csv = Some(required(&mut iter, &arg).into()),
            "--json" => args.json = true,
            "-l" | "--list" => args.list = true,
            "--log-level" => match logging::parse_level(&required(&mut iter, &arg)) {
                Ok(level) => explicit_level = Some(level),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(2);
                }
            },
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                std::process::exit(2);
            }
        }
    }

    args.log_level = explicit_level.or_else(|| logging::level_for_verbosity(verbosity));
    args
}

fn run(args: CliArgs) -> Result<(), KrigerError> {
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    if args.list {
        print!("{}", models(&data_dir)?);
        return Ok(());
    }

    let earthquake = args.earthquake.ok_or(KrigerError::MissingParameter {
        parameter: "earthquake",
    })?;
    let im = args.im.ok_or(KrigerError::MissingParameter { parameter: "im" })?;
    let sites_path = args.sites.ok_or(KrigerError::MissingParameter {
        parameter: "sites",
    })?;

    let text = fs::read_to_string(&sites_path)
        .map_err(|e| KrigerError::Io(format!("{}: {e}", sites_path.display())))?;
    let records: Vec<SiteRecord> = serde_json::from_str(&text)?;
    let sites: Vec<Site> = records.into_iter().map(Site::from).collect();
    info!(count = sites.len(), path = %sites_path.display(), "read sites");

    let estimator = GmKriger::new()
        .data_dir(data_dir)
        .earthquake(earthquake)
        .intensity_name(&im)
        .correlation_set_name(&args.model)
        .build()?;
    let result = estimator.estimate_sites(&sites)?;

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        print!("{result}");
    }

    if let Some(path) = args.csv {
        result.write_csv(&path)?;
        info!(path = %path.display(), "wrote CSV");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = parse_cli_args();

    if let Err(e) = logging::init(args.log_level) {
        eprintln!("warning: {e}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
