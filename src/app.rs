use tracing_subscriber::EnvFilter;

pub async fn run() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let boot = crate::infrastructure::bootstrap::setup()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    crate::interfaces::http::start_server(boot.state, boot.logs)?.await
}
