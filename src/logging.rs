//! Terminal+file logging initializer for binaries and tests that opt in via
//! the `diagnostics` feature. The library itself never calls this — it only
//! ever emits `log` facade calls, leaving the sink to the embedding
//! application, mirroring the teacher's own `lib.rs::init()`.

/// Initializes a combined terminal (info) + file (debug) logger under
/// `logs/<unix-seconds>.log`. Panics on failure, matching the teacher's own
/// "this is an opt-in diagnostic tool, not a library entry point" stance.
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
