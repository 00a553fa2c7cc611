use dynmatch_runner::{ExperimentConfig, run_experiment};

fn print_help() {
    eprintln!(
        r#"dynmatch - dynamic matching market simulator

USAGE:
    dynmatch [OPTIONS]

OPTIONS:
    --config <PATH>     Load experiment from JSON file
    --json              Print the report as JSON
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # One greedy and one patient run, m=1000 d=5 until t=100
    dynmatch

    # Run an experiment file and export the summary
    dynmatch --config experiment.json --json > report.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--json" => json = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading experiment from: {}", path);
            ExperimentConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default experiment");
            ExperimentConfig::default()
        }
    };

    let report = run_experiment(&config).await?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
