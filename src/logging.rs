use tracing_subscriber::EnvFilter;

/// ログ出力を初期化（標準エラーへ）
///
/// `RUST_LOG` が設定されていればそれを優先する。
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,power_cropper=debug"
    } else {
        "warn,power_cropper=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // 二重初期化（テスト等）は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .try_init();
}
