use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use portfolio_check::config::{ApplicationConfig, ConfigOverrides, LogConfig};
use portfolio_check::data_ingestion::DataLoader;
use portfolio_check::session::QuerySession;
use portfolio_check::valuation::MissingPricePolicy;

#[derive(Parser)]
#[command(name = "portfolio_check", about = "投資組合估值查詢工具")]
struct Cli {
    /// 存放 Investments.csv、Quotes.csv、Transactions.csv 的目錄
    #[arg(short, long)]
    data_folder: Option<String>,

    /// 輸出股票、基金、不動產的小計與百分比
    #[arg(short, long)]
    verbose: bool,

    /// 直接執行查詢 (格式 'd-m-Y HH:MM:SS;投資人ID')，可重複；未指定時進入互動模式
    #[arg(short, long)]
    query: Vec<String>,

    /// 缺少價格時的處理方式 (zero 或 fail)
    #[arg(long)]
    policy: Option<MissingPricePolicy>,

    /// 日誌等級 (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置，命令列參數優先
    let app_config = ApplicationConfig::load_from_env()
        .and_then(|config| {
            config.with_overrides(ConfigOverrides {
                data_folder: cli.data_folder,
                missing_price_policy: cli.policy,
                log_level: cli.log_level,
                verbose: cli.verbose,
            })
        })
        .context("無法加載配置")?;

    init_logging(&app_config.log)?;

    let loader = DataLoader::new(app_config.data.clone());
    let (registry, report) = loader.load().context("載入資料失敗")?;
    if report.total_skipped() > 0 {
        info!("共略過 {} 列無效資料", report.total_skipped());
    }

    let session = QuerySession::new(&registry, app_config.valuation.missing_price_policy)
        .with_date_formats(&app_config.data.date_formats)
        .with_verbose(cli.verbose);

    if cli.query.is_empty() {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        session.run(stdin.lock(), &mut stdout)?;
        return Ok(());
    }

    let mut failed = 0;
    for query in &cli.query {
        match session.answer(query) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                error!("查詢 '{}' 失敗: {}", query, err);
                eprintln!("{}", err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} 筆查詢失敗", failed));
    }
    Ok(())
}

/// 初始化日誌系統，日誌輸出至 stderr 以免與查詢結果混雜
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(log_config.env_filter())
        .with_writer(io::stderr);

    let result = if log_config.format == "compact" {
        tracing::subscriber::set_global_default(builder.compact().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
