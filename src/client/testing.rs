//! In-memory transport and log capture for unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::client::{ClientError, ClientRequest, ClientResponse, Transport};

/// Replays a fixed script of outcomes and records every request it sees.
///
/// Once the script runs dry the last outcome keeps repeating.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ClientResponse, String>>>,
    last: Mutex<Option<Result<ClientResponse, String>>>,
    seen: Mutex<Vec<ClientRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn with_statuses(statuses: &[StatusCode]) -> Self {
        Self::new(
            statuses
                .iter()
                .map(|status| Ok(ClientResponse::new(*status, status.as_str().to_string())))
                .collect(),
        )
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    fn new(script: Vec<Result<ClientResponse, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ClientRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ClientRequest) -> Result<ClientResponse, ClientError> {
        self.seen.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        let outcome = match next {
            Some(outcome) => {
                *self.last.lock().unwrap() = Some(outcome.clone());
                outcome
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err("script is empty".to_string())),
        };
        outcome.map_err(ClientError::Transport)
    }
}

/// Log sink for a scoped `fmt` subscriber.
#[derive(Clone, Default)]
pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    /// Route this thread's events into the buffer until the guard drops.
    pub(crate) fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
