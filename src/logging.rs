use tracing_subscriber::EnvFilter;

/// stderr로 로그를 내보내는 구독자를 설치한다.
///
/// `RUST_LOG`가 있으면 그것을 따르고, 없으면 warn(verbose면 debug) 수준이다.
/// 이미 설치된 경우 조용히 넘어간다.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
