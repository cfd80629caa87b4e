use std::sync::{Arc, atomic::AtomicBool};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    OsSigInt,
    OsSigQuit,
    OsSigTerm,
    UserInt,
}

const FORCE_QUIT_THRESHOLD: u8 = 3;

#[derive(Debug)]
/// The receiving side of the shutdown broadcast.
///
/// The http server waits on this to know when to stop accepting connections.
pub struct InterruptReceiver {
    interrupt_rx: broadcast::Receiver<Interrupted>,
    stopped: Arc<AtomicBool>,
}

impl InterruptReceiver {
    #[must_use]
    #[inline]
    pub fn new(interrupt_rx: broadcast::Receiver<Interrupted>) -> Self {
        Self {
            interrupt_rx,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wait for an interrupt signal to be received.
    ///
    /// # Errors
    ///
    /// Fails if the interrupt signal cannot be received (e.g. the sender has been dropped)
    #[inline]
    pub async fn wait(&mut self) -> Result<Interrupted, broadcast::error::RecvError> {
        let interrupted = self.interrupt_rx.recv().await?;

        self.stopped
            .store(true, std::sync::atomic::Ordering::SeqCst);

        Ok(interrupted)
    }

    /// Wait for an interrupt and log why the server is stopping.
    ///
    /// Suitable as the future passed to `axum::serve(..).with_graceful_shutdown`.
    #[inline]
    pub async fn shutdown_signal(mut self) {
        match self.wait().await {
            Ok(Interrupted::UserInt) => log::info!("Stopping server per user request"),
            Ok(Interrupted::OsSigInt) => log::info!("Stopping server because of an os sig int"),
            Ok(Interrupted::OsSigTerm) => log::info!("Stopping server because of an os sig term"),
            Ok(Interrupted::OsSigQuit) => log::info!("Stopping server because of an os sig quit"),
            Err(e) => log::error!("Stopping server because of an unexpected error: {e}"),
        }
    }

    #[must_use]
    #[inline]
    pub fn resubscribe(&self) -> Self {
        Self {
            interrupt_rx: self.interrupt_rx.resubscribe(),
            stopped: self.stopped.clone(),
        }
    }

    /// Check if an interrupt signal has been received previously.
    #[must_use]
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
/// The sending side of the shutdown broadcast.
pub struct Terminator {
    interrupt_tx: broadcast::Sender<Interrupted>,
}

impl Terminator {
    #[must_use]
    #[inline]
    pub const fn new(interrupt_tx: broadcast::Sender<Interrupted>) -> Self {
        Self { interrupt_tx }
    }

    /// Send an interrupt signal to the application.
    ///
    /// # Errors
    ///
    /// Fails if the interrupt signal cannot be sent (e.g. the receiver has been dropped)
    #[inline]
    pub fn terminate(&self, interrupted: Interrupted) -> anyhow::Result<()> {
        self.interrupt_tx.send(interrupted)?;

        Ok(())
    }

    fn forward(&self, interrupted: Interrupted) {
        if let Err(e) = self.terminate(interrupted) {
            log::warn!("failed to send {interrupted:?} signal: {e}");
        }
    }
}

#[cfg(unix)]
async fn terminate_by_signal(terminator: Terminator) -> std::io::Result<()> {
    let mut interrupt_signal = signal(SignalKind::interrupt())?;
    let mut term_signal = signal(SignalKind::terminate())?;
    let mut quit_signal = signal(SignalKind::quit())?;

    let mut signal_tick = tokio::time::interval(std::time::Duration::from_secs(1));
    signal_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut kill_count = 0;

    loop {
        if kill_count >= FORCE_QUIT_THRESHOLD {
            log::warn!(
                "Received {FORCE_QUIT_THRESHOLD} signals, forcefully terminating the application"
            );
            std::process::exit(1);
        }

        tokio::select! {
            _ = signal_tick.tick() => {}
            _ = interrupt_signal.recv() => {
                terminator.forward(Interrupted::OsSigInt);
                kill_count += 1;
            }
            _ = term_signal.recv() => {
                terminator.forward(Interrupted::OsSigTerm);
                kill_count += 1;
            }
            _ = quit_signal.recv() => {
                terminator.forward(Interrupted::OsSigQuit);
                kill_count += 1;
            }
            _ = tokio::signal::ctrl_c() => {
                terminator.forward(Interrupted::UserInt);
                kill_count += 1;
            }
        }
    }
}

#[cfg(not(unix))]
async fn terminate_by_signal(terminator: Terminator) -> std::io::Result<()> {
    let mut signal_tick = tokio::time::interval(std::time::Duration::from_secs(1));
    signal_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut kill_count = 0;

    loop {
        if kill_count >= FORCE_QUIT_THRESHOLD {
            log::warn!(
                "Received {FORCE_QUIT_THRESHOLD} signals, forcefully terminating the application"
            );
            std::process::exit(1);
        }

        tokio::select! {
            _ = signal_tick.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                terminator.forward(Interrupted::UserInt);
                kill_count += 1;
            }
        }
    }
}

/// Create the shutdown broadcast channel and start listening for os signals on a dedicated thread.
///
/// # Errors
///
/// Fails if the runtime for the signal listener cannot be created.
#[allow(clippy::module_name_repetitions)]
#[inline]
pub fn create_termination() -> std::io::Result<(Terminator, InterruptReceiver)> {
    let (tx, rx) = broadcast::channel(2);
    let terminator = Terminator::new(tx);
    let interrupt = InterruptReceiver::new(rx);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .thread_name("folio-terminator")
        .build()?;
    let terminator_clone = terminator.clone();

    std::thread::spawn(move || {
        rt.block_on(async {
            if let Err(e) = terminate_by_signal(terminator_clone).await {
                log::error!("Failed to listen for os signals: {e}");
            }
        });
    });

    Ok((terminator, interrupt))
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    #[tokio::test]
    async fn test_terminate() {
        let (terminator, mut rx) = create_termination().unwrap();
        assert!(!rx.is_stopped());

        terminator
            .terminate(Interrupted::UserInt)
            .expect("failed to send interrupt signal");

        assert_eq!(rx.wait().await, Ok(Interrupted::UserInt));
        assert!(rx.is_stopped());
    }

    #[rstest]
    #[timeout(Duration::from_secs(1))]
    #[tokio::test]
    async fn test_shutdown_signal_resolves_for_every_subscriber() {
        let (terminator, rx) = create_termination().unwrap();
        let other = rx.resubscribe();

        terminator.terminate(Interrupted::OsSigTerm).unwrap();

        rx.shutdown_signal().await;
        other.shutdown_signal().await;
    }
}
