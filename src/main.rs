use clap::Parser;
use market_brief::utils::{logger, validation::Validate};
use market_brief::{AppConfig, CliConfig, Credentials, Delivery, EtlEngine, EtlError, MarketBriefPipeline};

async fn run(cli: &CliConfig) -> Result<Delivery, EtlError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let credentials = Credentials::from_env(!cli.dry_run)?;

    let pipeline = MarketBriefPipeline::new(config, credentials, cli.dry_run)?;
    EtlEngine::new(pipeline).run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting market-brief");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(Delivery::Delivered { .. }) => {
            tracing::info!("✅ Report broadcast completed");
            println!("✅ Report broadcast completed");
        }
        Ok(Delivery::Skipped) => {
            tracing::info!("✅ Dry run completed");
        }
        Ok(delivery) => {
            // 廣播失敗不影響結束碼，但需要人工補發
            tracing::error!("❌ Report was generated but not delivered: {:?}", delivery);
            eprintln!("❌ Report was generated but not delivered; resend it manually");
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
