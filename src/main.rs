use clap::Parser;
use physician_directory::utils::{logger, validation::Validate};
use physician_directory::{CliConfig, DirectoryPipeline, DirectoryPlan, EtlEngine, LocalStorage};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_directory_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let output_directory = config.output_directory();
    tracing::info!("📁 Input: {}", config.input.path);
    tracing::info!("📁 Output directory: {}", output_directory.display());

    let storage = LocalStorage::new(output_directory);
    let engine = EtlEngine::new(DirectoryPipeline::new(storage, config));

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no documents will be written");
        match engine.plan() {
            Ok(plan) => {
                println!("{}", serde_json::to_string_pretty(&plan_summary(&plan))?);
                return Ok(());
            }
            Err(e) => fail(e),
        }
    }

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Directory generation completed: {} of {} physicians in {} documents",
                summary.records_rendered,
                summary.records_read,
                summary.documents_written.len()
            );
            println!("✅ Wrote {} documents", summary.documents_written.len());
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: physician_directory::DirectoryError) -> ! {
    tracing::error!("❌ Directory generation failed: {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

/// Document titles, file names and per-section counts, without physician data.
fn plan_summary(plan: &DirectoryPlan) -> serde_json::Value {
    let documents: Vec<serde_json::Value> = plan
        .documents
        .iter()
        .map(|document| {
            let sections: Vec<serde_json::Value> = document
                .sections
                .iter()
                .map(|section| {
                    serde_json::json!({
                        "heading": section.heading,
                        "physicians": section.records.len(),
                    })
                })
                .collect();
            serde_json::json!({
                "title": document.title,
                "file": document.file_name(),
                "sections": sections,
            })
        })
        .collect();

    serde_json::json!({
        "documents": documents,
        "physicians": plan.rendered_records(),
        "excluded_by_title": plan.dropped_by_title,
        "excluded_by_specialty": plan.dropped_by_specialty,
        "without_specialty": plan.dropped_blank_specialty,
    })
}
