/*!
 * timerctl - POSIX timer demo
 *
 * Creates a signal-notifying interval timer, waits for a number of
 * expirations and prints the kernel's view of the timer after each one.
 */

use miette::{IntoDiagnostic, Result};
use tracing::info;

use posix_timer::core::TimerctlConfig;
use posix_timer::{init_tracing, PosixTimer, TimerConfig, TimerError};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured tracing
    init_tracing();

    if !posix_timer::timer::is_supported() {
        return Err(TimerError::Unsupported.into());
    }

    let config = TimerctlConfig::from_env();
    info!(?config, "timerctl starting");

    let timer_config = TimerConfig::new()
        .with_signal(config.signal.clone())
        .with_clock(config.clock);
    let mut timer = PosixTimer::new(timer_config)?;

    run(&mut timer, &config).await?;

    timer.disarm()?;
    info!(status = ?timer.status()?, "Timer disarmed");
    Ok(())
}

#[cfg(unix)]
async fn run(timer: &mut PosixTimer, config: &TimerctlConfig) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let signo = timer
        .signal_number()
        .ok_or_else(|| miette::miette!("timer has no notification signal"))?;
    // Listener must be registered before the first expiry
    let mut expirations = signal(SignalKind::from_raw(signo)).into_diagnostic()?;

    let interval = (config.interval_ms > 0).then_some(config.interval_ms);
    timer.arm(config.start_ms, interval)?;
    info!(
        signal = signo,
        start_ms = config.start_ms,
        interval_ms = config.interval_ms,
        "Timer armed"
    );

    for tick in 1..=config.ticks {
        if expirations.recv().await.is_none() {
            break;
        }
        let status = timer.status()?;
        println!("{}", serde_json::to_string(&status).into_diagnostic()?);
        info!(tick, overrun = timer.overrun()?, "Timer expired");

        if interval.is_none() {
            break;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn run(_timer: &mut PosixTimer, _config: &TimerctlConfig) -> Result<()> {
    Err(TimerError::Unsupported.into())
}
