#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = cli::AssetizeCli::parse();

    if let Some(shell) = args.completions {
        cli::AssetizeCli::print_completions(shell);
        return ExitCode::SUCCESS;
    }

    match args.command {
        Some(cli::Command::Convert(convert_args)) => assetize::run_convert(assetize::ConvertOptions {
            source: convert_args.source,
            destination: convert_args.destination,
            target: convert_args.target.into(),
            precount: convert_args.precount,
        }),
        Some(cli::Command::Verify(verify_args)) => assetize::run_verify(assetize::VerifyOptions {
            root: verify_args.root,
            format: verify_args.format.into(),
            strict: verify_args.strict,
        }),
        None => {
            if let Err(error) = cli::AssetizeCli::command().print_help() {
                log::error!("Failed to print the help: {}", error);
            }
            ExitCode::FAILURE
        }
    }
}
