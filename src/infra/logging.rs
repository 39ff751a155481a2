use tracing_subscriber::{fmt, EnvFilter};

/// Подключить `tracing` для бинарников.
///
/// Уровень берётся из `RUST_LOG`, иначе `default_level`. Повторный вызов
/// ничего не делает.
pub fn init_tracing(service_name: &str, default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .compact()
        .try_init();

    tracing::debug!(service = service_name, "tracing initialized");
}
