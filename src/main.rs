use clap::Parser;
use text_boundary::config::TomlConfig;
use text_boundary::utils::{logger, validation::Validate};
use text_boundary::{BoundaryConfig, BoundaryError, BoundarySuite, CliConfig, TokioProcessRunner};

fn load_config(cli: &CliConfig) -> Result<BoundaryConfig, BoundaryError> {
    let mut config = BoundaryConfig::default();

    if let Some(path) = &cli.config {
        text_boundary::utils::validation::validate_path("config", path)?;
        tracing::info!("📁 Loading configuration from: {}", path);
        config.apply_toml(&TomlConfig::from_file(path)?);
    }

    // 應用命令列覆蓋設定
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let locale = config.locale_provider();
    let suite = BoundarySuite::from_config(TokioProcessRunner::new(), &*locale, &config)?;
    let report = suite.run().await;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!(
            "{} {} | encoding {} | locale {}",
            report.runtime.package,
            report.runtime.version,
            report.runtime.encoding,
            report.runtime.ambient_encoding.as_deref().unwrap_or("none")
        );
        for case in &report.cases {
            let mark = if case.passed { "✅" } else { "❌" };
            println!("{} {:<20} {}", mark, case.name, case.detail);
        }
        println!(
            "{} passed, {} failed",
            report.passed_count(),
            report.failed_count()
        );
    }

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
