//! zoom-pull - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use zoom_pull::{
    api::ZoomApi,
    catalog::CatalogQuery,
    cli::{Args, Command},
    commands::{download_records, list_records, restore_trashed_records, DownloadRequest},
    config::{parse_date_range, validate_config, Config},
    download::transfer_for,
    error::{exit_codes, Error, Result},
    filter::FilterSelection,
    output::{print_error, print_info, print_run_settings, print_run_summary, print_warning},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Usage(_) | Error::DateParse(_) | Error::Regex(_) => {
                    ExitCode::from(exit_codes::USAGE_ERROR as u8)
                }
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::RemoteApi { .. }
                | Error::RemoteApiEmbedded { .. }
                | Error::Token(_)
                | Error::Http(_) => ExitCode::from(exit_codes::API_ERROR as u8),
                Error::RedirectExpected { .. }
                | Error::Transfer(_)
                | Error::PathCollision { .. }
                | Error::InvalidFilename(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config_path = args.config_path();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with secrets and CLI arguments");
        Config::default()
    };

    if let Some(dir) = &args.secrets_dir {
        config.apply_secrets_dir(dir)?;
    }

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    let mut stdout = std::io::stdout();

    match args.command {
        Command::List { range, filters } => {
            let (from, to) = parse_date_range(&range.from_date, &range.to_date)?;
            let filter = FilterSelection::from(filters).conjunction()?;
            validate_config(&config)?;

            let selection = filter.as_ref().map(|f| f.to_string());
            print_run_settings("list", selection.as_deref(), None);

            let api = ZoomApi::new(&config)?;
            let count = list_records(
                &api,
                CatalogQuery::DateRange { from, to },
                filter.as_ref(),
                &mut stdout,
            )
            .await?;
            print_info(&format!("Listed {} meetings", count));
        }
        Command::Download(download) => {
            let (from, to) = parse_date_range(&download.range.from_date, &download.range.to_date)?;
            let filter = FilterSelection::from(download.filters.clone()).exactly_one()?;
            validate_config(&config)?;

            let selection = filter.to_string();
            let target = download.downloads_dir.display().to_string();
            print_run_settings("download", Some(selection.as_str()), Some(target.as_str()));

            let request = DownloadRequest {
                query: CatalogQuery::DateRange { from, to },
                filter,
                csv_paths_relative_to: download.csv_root(),
                csv_log_path: download.csv_log,
                downloads_dir: download.downloads_dir,
                trash_after_download: download.trash_after_download,
            };

            let api = ZoomApi::new(&config)?;
            let transfer = transfer_for(&config)?;
            let summary =
                download_records(&api, transfer.as_ref(), &config, &request, &mut stdout).await?;
            print_run_summary(&summary);
        }
        Command::RestoreTrashed { filters } => {
            let filter = FilterSelection::from(filters).exactly_one()?;
            validate_config(&config)?;

            let selection = filter.to_string();
            print_run_settings("restore-trashed", Some(selection.as_str()), None);

            let api = ZoomApi::new(&config)?;
            let summary = restore_trashed_records(&api, &filter, &mut stdout).await?;
            print_run_summary(&summary);
        }
    }

    Ok(())
}
