use anyhow::Context;
use clap::Parser;
use expiry_check::adapters::{CollectingSink, StderrSink, SystemClock, TracingSink};
use expiry_check::domain::ports::{Clock, DiagnosticSink};
use expiry_check::utils::error::{ErrorCategory, ExpiryError};
use expiry_check::utils::logger;
use expiry_check::{CheckEngine, CliConfig, ExpiryConfig, FixedClock, ScanReport};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli) {
        Ok(report) if report.has_errors() => {
            tracing::debug!(
                "{} expired, {} invalid out of {} markers",
                report.expired,
                report.invalid,
                report.declarations
            );
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let Some(err) = e.downcast_ref::<ExpiryError>() else {
                eprintln!("❌ {:#}", e);
                return ExitCode::from(3);
            };

            tracing::error!(
                "❌ Expiry check failed: {:#} (Category: {:?}, Severity: {:?})",
                e,
                err.category(),
                err.severity()
            );
            eprintln!("❌ {}", err.user_friendly_message());
            eprintln!("💡 {}", err.recovery_suggestion());

            // 根據錯誤類別決定退出碼
            match err.category() {
                ErrorCategory::Marker => ExitCode::from(2),
                ErrorCategory::Source | ErrorCategory::Config | ErrorCategory::System => {
                    ExitCode::from(3)
                }
            }
        }
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<ScanReport> {
    let mut config = ExpiryConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_to(&mut config);

    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => {
            tracing::info!("🕒 Evaluating markers as of {}", now);
            Box::new(FixedClock::new(now))
        }
        None => Box::new(SystemClock),
    };

    let engine = CheckEngine::new(config);

    if engine.config().is_json() {
        let mut sink = CollectingSink::default();
        let report = engine.run(clock.as_ref(), &mut sink)?;
        println!("{}", serde_json::to_string_pretty(&report).map_err(ExpiryError::from)?);
        return Ok(report);
    }

    // JSON 日誌模式下，診斷也以結構化記錄輸出
    let mut sink: Box<dyn DiagnosticSink> = if cli.json_logs {
        Box::new(TracingSink)
    } else {
        Box::new(StderrSink::new())
    };
    let report = engine.run(clock.as_ref(), sink.as_mut())?;
    if report.has_errors() {
        println!(
            "❌ {} expired and {} invalid #[{}] markers",
            report.expired,
            report.invalid,
            engine.config().scan.marker
        );
    } else {
        println!(
            "✅ {} #[{}] markers checked, none expired",
            report.declarations,
            engine.config().scan.marker
        );
    }
    Ok(report)
}
