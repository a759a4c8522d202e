use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use uigen_core::{Orchestrator, PipelineConfig, PipelineResult};
use uigen_export::render_tree;
use uigen_spec::{ExportFormat, ExportPackage};

mod summary;

fn cli() -> Command {
    Command::new("uigen")
        .version(uigen_core::VERSION)
        .about("Turn short UI requests into validated, exportable component specifications")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Pipeline configuration file (TOML)"),
        )
        .subcommand(
            Command::new("run")
                .about("Run one or more requests through a single conversation")
                .arg(
                    Arg::new("request")
                        .required(true)
                        .help("First request, e.g. \"Create a pricing page\""),
                )
                .arg(
                    Arg::new("then")
                        .long("then")
                        .action(ArgAction::Append)
                        .help("Follow-up request, applied in order"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["jsx", "schema", "tree", "all"])
                        .help("Export format"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the final export files into this directory"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print each pipeline result as JSON"),
                ),
        )
        .subcommand(
            Command::new("chat")
                .about("Read requests from stdin, one per line (/reset, /show, /quit)"),
        )
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<PipelineConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let mut config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("run", args)) => {
            if let Some(format) = args.get_one::<String>("format") {
                let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
                config.export = config.export.with_format(format);
            }
            run(config, args).await
        }
        Some(("chat", _)) => chat(config).await,
        _ => Ok(ExitCode::SUCCESS),
    }
}

async fn run(config: PipelineConfig, args: &ArgMatches) -> Result<ExitCode> {
    let json = args.get_flag("json");
    let mut requests: Vec<&String> = args.get_one::<String>("request").into_iter().collect();
    requests.extend(args.get_many::<String>("then").into_iter().flatten());

    let mut orchestrator = Orchestrator::new(config);
    info!(conversation = %orchestrator.conversation_id(), requests = requests.len(), "starting conversation");

    let mut last: Option<PipelineResult> = None;
    for request in requests {
        let result = orchestrator.process_request(request).await;
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("> {request}");
            println!("{}", summary::summarize(&result));
        }
        last = Some(result);
    }

    let Some(result) = last else {
        return Ok(ExitCode::SUCCESS);
    };

    if let Some(dir) = args.get_one::<PathBuf>("out") {
        match &result.export {
            Some(package) => {
                write_package(dir, package)?;
                eprintln!("wrote {} file(s) to {}", package.files.len(), dir.display());
            }
            None => eprintln!("nothing exported; {} not written", dir.display()),
        }
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn write_package(dir: &Path, package: &ExportPackage) -> Result<()> {
    for file in &package.files {
        let path = dir.join(&file.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(file = %path.display(), "export file written");
    }
    Ok(())
}

async fn chat(config: PipelineConfig) -> Result<ExitCode> {
    let mut orchestrator = Orchestrator::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("uigen {} - type a request, /show, /reset or /quit", uigen_core::VERSION);
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "/quit" | "/exit" => break,
            "/reset" => {
                orchestrator.reset();
                println!("new conversation {}", orchestrator.conversation_id());
            }
            "/show" => match orchestrator.get_current_specification() {
                Some(spec) => print!("{}", render_tree(spec)),
                None => println!("no specification yet"),
            },
            request => {
                let result = orchestrator.process_request(request).await;
                println!("{}", summary::summarize(&result));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn run_collects_follow_ups_in_order() {
        let matches = cli()
            .try_get_matches_from([
                "uigen", "run", "Create a pricing page", "--then", "make it bigger", "--then",
                "add testimonials", "--format", "tree",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let follow_ups: Vec<&String> = args.get_many::<String>("then").unwrap().collect();
        assert_eq!(follow_ups, vec!["make it bigger", "add testimonials"]);
        assert_eq!(args.get_one::<String>("format").unwrap(), "tree");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = cli().try_get_matches_from(["uigen", "run", "x", "--format", "pdf"]);
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn package_written_with_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new().with_export_options(
            uigen_export::ExportOptions::new().with_layout(uigen_export::FileLayout::PerComponent),
        );
        let result = Orchestrator::new(config)
            .process_request("Create a pricing page")
            .await;
        let package = result.export.unwrap();

        write_package(dir.path(), &package).unwrap();
        assert!(dir.path().join("components").is_dir());
        for file in &package.files {
            let written = std::fs::read_to_string(dir.path().join(&file.name)).unwrap();
            assert_eq!(written, file.content);
        }
    }
}
