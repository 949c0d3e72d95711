//! Animation driver: a background thread that feeds a spectrogram at its
//! configured line rate.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam::channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use spectro_core::Spectrogram;

use crate::source::LineSource;

/// Pulls lines from a [`LineSource`] and draws them at the spectrogram's
/// line rate, correcting for scheduling drift.
///
/// The spectrogram is shared so the host can read the surface between ticks.
/// A rate of 0 draws a single line and then leaves stepping to the caller.
pub struct AnimationDriver {
    spectrogram: Arc<Mutex<Spectrogram>>,
    cancel_tx: Option<Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl AnimationDriver {
    pub fn new(spectrogram: Arc<Mutex<Spectrogram>>) -> Self {
        Self {
            spectrogram,
            cancel_tx: None,
            thread: None,
        }
    }

    pub fn spectrogram(&self) -> &Arc<Mutex<Spectrogram>> {
        &self.spectrogram
    }

    /// Start drawing lines from `source`. Calling this while already running
    /// cancels the current loop and restarts timing with the new source.
    pub fn start(&mut self, mut source: impl LineSource) {
        if self.thread.is_some() {
            self.cancel_pending();
        }

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let spectrogram = self.spectrogram.clone();
        spectrogram.lock().start(Instant::now());

        let thread = thread::Builder::new()
            .name("spectro-driver".to_string())
            .spawn(move || loop {
                let Some(line) = source.next_line() else {
                    log::debug!("line source exhausted, driver exiting");
                    break;
                };
                let delay = spectrogram.lock().advance(line, Instant::now());
                let Some(delay) = delay else {
                    log::debug!("static line rate, driver exiting after one line");
                    break;
                };
                match cancel_rx.recv_timeout(delay) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .expect("failed to spawn spectrogram driver thread");

        self.cancel_tx = Some(cancel_tx);
        self.thread = Some(thread);
    }

    /// Cancel the pending tick, wait for the thread, and stop the
    /// spectrogram. No-op when the driver was never started.
    pub fn stop(&mut self) {
        if self.thread.is_none() {
            return;
        }
        self.cancel_pending();
        self.spectrogram.lock().stop();
    }

    /// True while the driver thread is still scheduling lines.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // Full means a cancel is already queued
            let _ = cancel_tx.try_send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("spectrogram driver thread panicked");
            }
        }
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticLineSource;
    use spectro_core::{Direction, ScanState, SpectrogramOptions};
    use std::time::Duration;

    fn shared(rate: f64) -> Arc<Mutex<Spectrogram>> {
        let options = SpectrogramOptions {
            line_rate: rate,
            ..Default::default()
        };
        Arc::new(Mutex::new(Spectrogram::raster_scan(4, 8, Direction::Down, &options)))
    }

    fn wait_until_idle(driver: &AnimationDriver) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while driver.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_static_rate_draws_one_line() {
        let sg = shared(0.0);
        let mut driver = AnimationDriver::new(sg.clone());
        driver.start(StaticLineSource::new(vec![100u8; 4]));
        wait_until_idle(&driver);

        assert!(!driver.is_running());
        assert!(!sg.lock().is_running());
        assert_eq!(sg.lock().next_line(), 1);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let sg = shared(10.0);
        let mut driver = AnimationDriver::new(sg.clone());
        driver.stop();
        assert_eq!(sg.lock().state(), ScanState::Idle);
        assert_eq!(sg.lock().next_line(), 0);
    }

    #[test]
    fn test_driver_lifecycle() {
        let sg = shared(10.0);
        let mut driver = AnimationDriver::new(sg.clone());
        driver.start(StaticLineSource::new(vec![50u8; 4]));
        assert!(sg.lock().is_running());

        driver.stop();
        assert!(!driver.is_running());
        assert!(!sg.lock().is_running());
        assert_eq!(sg.lock().state(), ScanState::Idle);
        assert_eq!(sg.lock().next_line(), 0);
    }
}
