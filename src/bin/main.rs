use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use portfolio_returns::config::{self, ApplicationConfig, LogConfig};
use portfolio_returns::data_provider::YahooFinanceProvider;
use portfolio_returns::domain_types::{Period, PortfolioWeight};
use portfolio_returns::output::{ArtifactWriter, RunReceipt};
use portfolio_returns::pipeline::ReturnsPipeline;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "portfolio_returns", about = "股票與投資組合日報酬率計算工具")]
struct Cli {
    /// 輸出目錄（覆寫配置中的 output.directory）
    #[arg(long, global = true)]
    output_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 單一商品：報酬率、損益表、資產負債表與基準指數
    Single {
        /// 股票代碼，例如 AAPL
        #[arg(long)]
        ticker: String,

        /// 回溯區間，例如 1y、6mo、max
        #[arg(long)]
        period: Period,
    },

    /// 投資組合：加權報酬率與基準指數
    Portfolio {
        /// 以 / 分隔的股票代碼，例如 AAPL/MSFT
        #[arg(long)]
        tickers: String,

        /// 以 / 分隔的權重，小數點可用 , 或 .，例如 0,6/0.4
        #[arg(long, allow_hyphen_values = true)]
        weights: String,

        /// 回溯區間，例如 1y、6mo、max
        #[arg(long)]
        period: Period,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 解析命令行參數
    let cli = Cli::parse();

    // 初始化配置
    let mut app_config = config::init_config().context("無法加載應用程序配置")?;
    if let Some(dir) = cli.output_dir {
        app_config.output = app_config.output.with_directory(dir);
    }

    // 初始化日誌系統，guard 需存活至程式結束
    let _log_guard = init_logging(&app_config.log)?;

    run(cli.command, app_config).await
}

async fn run(command: Commands, app_config: ApplicationConfig) -> Result<()> {
    let provider = YahooFinanceProvider::new(&app_config.provider).context("無法建立數據來源客戶端")?;
    let pipeline = ReturnsPipeline::new(
        provider,
        app_config.benchmark.symbol.as_str(),
        app_config.portfolio.alignment,
    );
    let writer = ArtifactWriter::new(app_config.output.clone()).context("無法建立輸出目錄")?;

    match command {
        Commands::Single { ticker, period } => {
            let report = pipeline
                .run_single(&ticker, &period)
                .await
                .with_context(|| format!("{} 流程失敗", ticker))?;
            let written = report.write_to(&writer).context("寫入輸出檔案失敗")?;
            writer
                .write_receipt(&RunReceipt::Single { ticker })
                .context("寫入執行紀錄失敗")?;
            info!("單一商品流程完成，共寫入 {} 個檔案", written.len() + 1);
        }
        Commands::Portfolio {
            tickers,
            weights,
            period,
        } => {
            let basket = PortfolioWeight::parse_basket(&tickers, &weights).context("無法解析投資組合輸入")?;
            writer
                .write_receipt(&RunReceipt::Portfolio {
                    period: period.clone(),
                    tickers,
                    weights,
                })
                .context("寫入執行紀錄失敗")?;

            let report = pipeline
                .run_portfolio(&basket, &period)
                .await
                .context("投資組合流程失敗")?;
            let written = report.write_to(&writer).context("寫入輸出檔案失敗")?;
            info!("投資組合流程完成，共寫入 {} 個檔案", written.len() + 1);
        }
    }

    Ok(())
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let level = match log_config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    // RUST_LOG 優先於配置檔的級別
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (writer, guard) = match &log_config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "portfolio_returns.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(log_config.directory.is_none())
        .with_writer(writer);

    let result = match log_config.format.to_lowercase().as_str() {
        "compact" => tracing::subscriber::set_global_default(builder.compact().finish()),
        _ => tracing::subscriber::set_global_default(builder.pretty().finish()),
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(guard)
}
