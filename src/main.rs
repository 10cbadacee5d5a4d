use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use scam_intel::{AnalysisRequest, Config, RequestError, RequestGate, ScamAnalyzer};
use std::io::Read;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "/etc/scam-intel.yaml";

fn main() {
    let matches = Command::new("scam-intel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract scam intelligence from suspicious messages")
        .long_about(
            "Analyzes a suspected scam message and prints a JSON report with:\n\
             • URLs, email addresses, phone numbers and crypto wallet addresses\n\
             • Behavioral indicators such as urgency, impersonation and threats\n\
             • A scam-type label, risk score and short narrative",
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Message text to analyze (reads stdin when omitted)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read the message from a file")
                .conflicts_with("message"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .value_name("JSON")
                .help("Opaque JSON metadata passed along with the message"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Load and validate the configured rule set")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Check this key against the configured shared secret before analyzing"),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .help("Pretty-print the JSON report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);
    let config_found = std::path::Path::new(config_path).exists();
    let config = if config_found {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e:#}");
                process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    init_logger(matches.get_flag("verbose"), &config);
    if !config_found {
        log::warn!("Configuration file '{config_path}' not found, using default configuration");
    }

    let rules = match config.load_rules() {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error loading rule set: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("Rule set: {}", config.rules_file.as_deref().unwrap_or("built-in"));
        println!("Indicator rules: {}", rules.indicators.len());
        for (i, rule) in rules.indicators.iter().enumerate() {
            println!("  {}. {}", i + 1, rule.tag);
        }
        println!("Scam-type rules: {}", rules.scam_types.len());
        for (i, rule) in rules.scam_types.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, rule.label, rule.keywords.join(", "));
        }
        println!(
            "API key: {}",
            if config.resolve_api_key().is_some() {
                "configured"
            } else {
                "not configured"
            }
        );
        return;
    }

    let request = match read_request(&matches) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let analyzer = ScamAnalyzer::with_rules(rules);
    let result = match matches.get_one::<String>("api-key") {
        Some(presented) => match config.resolve_api_key() {
            Some(secret) => RequestGate::new(secret, analyzer).handle(presented, &request),
            None => {
                eprintln!(
                    "Error: no API key configured (set api.api_key or ${})",
                    config.api.api_key_env
                );
                process::exit(1);
            }
        },
        None if request.message.trim().is_empty() => Err(RequestError::EmptyInput),
        None => Ok(analyzer.analyze(&request.message, request.metadata.as_ref())),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let output = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            process::exit(1);
        }
    }
}

fn init_logger(verbose: bool, config: &Config) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config
            .logging
            .as_ref()
            .and_then(|logging| logging.level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn read_request(matches: &ArgMatches) -> anyhow::Result<AnalysisRequest> {
    let message = if let Some(message) = matches.get_one::<String>("message") {
        message.clone()
    } else if let Some(path) = matches.get_one::<String>("file") {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read message file '{path}': {e}"))?
    } else {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let metadata = match matches.get_one::<String>("metadata") {
        Some(raw) => Some(
            serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("Invalid metadata JSON: {e}"))?,
        ),
        None => None,
    };

    Ok(AnalysisRequest { message, metadata })
}

fn generate_default_config(path: &str) {
    match Config::default().to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Set the API key through the environment variable named in api.api_key_env.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}
