#![forbid(unsafe_code)]

//! Dedicated input thread.
//!
//! The reader thread owns the blocking [`KeySource`] and runs
//! [`KeyReader::poll`] in a loop, so consumers only ever touch the
//! [`InputQueue`]. It exits when the stop signal is set (checked between
//! keys), when the source is exhausted, or on a read error, and closes the
//! queue on the way out so blocked consumers wake up.
//!
//! A read that is already blocked is not interrupted: the thread notices the
//! stop signal after the next key arrives. [`InputReader`] therefore never
//! joins on drop.

use std::io;
use std::thread::{self, JoinHandle};

use crate::error::Unavailable;
use crate::input_queue::InputQueue;
use crate::key_decoder::{KeyReader, KeySource, Platform};
use crate::stop::StopTrigger;

/// Settings for [`InputReader::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Which decoding strategy to run.
    pub platform: Platform,
    /// Name of the spawned thread.
    pub thread_name: String,
}

impl InputConfig {
    /// Config for the running platform.
    pub fn detect() -> Result<Self, Unavailable> {
        Ok(Self {
            platform: Platform::detect()?,
            ..Self::default()
        })
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            platform: if cfg!(windows) {
                Platform::Windows
            } else {
                Platform::Posix
            },
            thread_name: "stui-input".to_owned(),
        }
    }
}

/// Handle to the running input thread.
#[derive(Debug)]
pub struct InputReader {
    handle: Option<JoinHandle<()>>,
    trigger: StopTrigger,
    queue: InputQueue,
}

impl InputReader {
    /// Spawn the reader thread over `source`.
    ///
    /// Keys are pushed onto `queue`; the thread exits once `trigger` fires.
    pub fn spawn<S>(
        config: InputConfig,
        source: S,
        queue: InputQueue,
        trigger: StopTrigger,
    ) -> io::Result<Self>
    where
        S: KeySource + Send + 'static,
    {
        let stop = trigger.signal();
        let thread_queue = queue.clone();
        let platform = config.platform;
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                tracing::debug!(?platform, "input reader started");
                let mut reader =
                    KeyReader::new(platform.decoder(), Box::new(source), thread_queue.clone());
                while !stop.is_stopped() {
                    match reader.poll() {
                        Ok(_) => {}
                        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                            tracing::debug!("input source exhausted");
                            break;
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "input read failed");
                            break;
                        }
                    }
                }
                thread_queue.close();
                tracing::debug!("input reader stopped");
            })?;

        Ok(Self {
            handle: Some(handle),
            trigger,
            queue,
        })
    }

    /// Spawn the reader thread over standard input, read through the
    /// platform's [`Platform::source`].
    pub fn spawn_stdin(
        config: InputConfig,
        queue: InputQueue,
        trigger: StopTrigger,
    ) -> io::Result<Self> {
        let source = config.platform.source(io::stdin());
        Self::spawn(config, source, queue, trigger)
    }

    /// Fire the stop signal and close the queue.
    pub fn stop(&self) {
        self.trigger.stop();
        self.queue.close();
    }

    /// Whether the thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the thread to exit.
    ///
    /// Blocks until the source yields another key or ends.
    pub fn join(mut self) -> thread::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        }
    }
}
