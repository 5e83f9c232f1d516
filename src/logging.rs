//! ログ出力の初期化
//!
//! 利用者向けの進捗表示は標準出力（println!）、内部ログは tracing で標準エラーへ。

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` があればそれを使い、なければ `--verbose` で debug、通常は warn
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
