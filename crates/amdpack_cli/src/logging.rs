use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr. `RUST_LOG` wins over the verbosity flags.
pub fn init(verbosity: u8, silent: bool) {
  let level = match (silent, verbosity) {
    (true, _) => LevelFilter::WARN,
    (false, 0) => LevelFilter::INFO,
    (false, 1) => LevelFilter::DEBUG,
    (false, _) => LevelFilter::TRACE,
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::default()
      .add_directive(LevelFilter::WARN.into())
      .add_directive(level_directive("amdpack", level))
      .add_directive(level_directive("amdpack_resolver", level))
  });

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .init();
}

fn level_directive(target: &str, level: LevelFilter) -> tracing_subscriber::filter::Directive {
  format!("{target}={level}").parse().unwrap_or_else(|_| level.into())
}
