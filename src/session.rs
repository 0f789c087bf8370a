pub use self::config::SessionConfig;
pub use self::service::{PrintService, ServiceError};
pub use self::status::{SessionStatus, ServiceStatus};

mod config;
mod service;
mod status;

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{Mutex, MutexGuard};
use tokio::sync::{oneshot, watch};

use crate::{Error, CommandBuffer};

/// Dispatch currently waiting on the service
struct InFlight {
    job: u64,
    /// Fired with the reason when the connection gets lost
    abort: oneshot::Sender<String>
}

struct State {
    status: SessionStatus,
    known_printers: Vec<String>,
    selected_printer: Option<String>,
    /// Changes with every status transition, so answers from an older connection can be told apart
    epoch: u64,
    in_flight: Option<InFlight>,
    next_job: u64,
    closed: bool
}

#[derive(Default)]
struct Notifications {
    queue: VecDeque<ServiceStatus>,
    draining: bool
}

/// Connection to a print service, and the printer selected on it
///
/// The session starts disconnected. [start](PrintSession::start) asks the service to connect, and the service reports back through [on_status_changed](PrintSession::on_status_changed). Once connected, printers can be listed and selected, and compiled receipts dispatched to the selected one.
///
/// Losing the connection (or being blocked by the service) forgets the printers and the selection, and fails the pending dispatch. Dropping the session shuts it down.
pub struct PrintSession {
    service: Arc<dyn PrintService>,
    config: SessionConfig,
    state: Mutex<State>,
    notifications: Mutex<Notifications>,
    status_sender: watch::Sender<SessionStatus>
}

impl PrintSession {
    /// Creates a disconnected session, with the default [SessionConfig](crate::SessionConfig)
    pub fn new(service: Arc<dyn PrintService>) -> PrintSession {
        PrintSession::with_config(service, SessionConfig::default())
    }

    pub fn with_config(service: Arc<dyn PrintService>, config: SessionConfig) -> PrintSession {
        let (status_sender, _) = watch::channel(SessionStatus::Disconnected);
        PrintSession {
            service,
            config,
            state: Mutex::new(State {
                status: SessionStatus::Disconnected,
                known_printers: Vec::new(),
                selected_printer: None,
                epoch: 0,
                in_flight: None,
                next_job: 0,
                closed: false
            }),
            notifications: Mutex::new(Notifications::default()),
            status_sender
        }
    }

    /// Asks the service to connect
    ///
    /// Does nothing if the session is already connecting or connected. Otherwise the session moves to [Connecting](SessionStatus::Connecting) until the service reports the connection as open.
    pub fn start(&self) -> Result<(), Error> {
        let epoch = {
            let mut state = self.state.lock();
            if state.closed {
                return Err(Error::SessionClosed);
            }
            match state.status {
                SessionStatus::Connecting | SessionStatus::Connected => return Ok(()),
                SessionStatus::Disconnected | SessionStatus::Blocked => {
                    self.transition(&mut state, SessionStatus::Connecting, "session restarted");
                    state.epoch
                }
            }
        };

        if let Err(e) = self.service.connect() {
            let mut state = self.state.lock();
            if state.epoch == epoch {
                self.transition(&mut state, SessionStatus::Disconnected, "connection failed");
            }
            return Err(Error::Service(e));
        }
        Ok(())
    }

    /// Entry point for the status notifications of the service
    ///
    /// Can be called from any thread, and from inside the service's own methods. Notifications are applied one at a time, in the order they arrived.
    pub fn on_status_changed(&self, status: ServiceStatus) -> Result<(), Error> {
        if self.state.lock().closed {
            return Err(Error::SessionClosed);
        }

        let mut notifications = self.notifications.lock();
        notifications.queue.push_back(status);
        if notifications.draining {
            // Whoever is draining will get to it
            return Ok(());
        }
        notifications.draining = true;
        while let Some(status) = notifications.queue.pop_front() {
            MutexGuard::unlocked(&mut notifications, || self.apply(status));
        }
        notifications.draining = false;
        Ok(())
    }

    fn apply(&self, notification: ServiceStatus) {
        let reconnect = {
            let mut state = self.state.lock();
            if state.closed {
                debug!("{:?} arrived after shutdown, ignored", notification);
                return;
            }
            match (notification, state.status) {
                (ServiceStatus::Open, SessionStatus::Connecting) => {
                    self.transition(&mut state, SessionStatus::Connected, "connection opened");
                    false
                },
                (ServiceStatus::Closed, SessionStatus::Connected) => {
                    self.transition(&mut state, SessionStatus::Disconnected, "connection closed");
                    if self.config.auto_reconnect {
                        self.transition(&mut state, SessionStatus::Connecting, "reconnecting");
                    }
                    self.config.auto_reconnect
                },
                (ServiceStatus::Closed, SessionStatus::Connecting) => {
                    self.transition(&mut state, SessionStatus::Disconnected, "connection closed");
                    false
                },
                (ServiceStatus::Blocked, status) if status != SessionStatus::Blocked => {
                    self.transition(&mut state, SessionStatus::Blocked, "blocked by the print service");
                    false
                },
                (notification, status) => {
                    debug!("{:?} ignored while {:?}", notification, status);
                    false
                }
            }
        };

        if reconnect {
            info!("Connection to the print service lost, reconnecting");
            if let Err(e) = self.service.connect() {
                warn!("Reconnection failed: {}", e);
                let mut state = self.state.lock();
                if state.status == SessionStatus::Connecting && !state.closed {
                    self.transition(&mut state, SessionStatus::Disconnected, "reconnection failed");
                }
            }
        }
    }

    // Every status change goes through here, with the state locked
    fn transition(&self, state: &mut State, status: SessionStatus, reason: &str) {
        debug!("Print session {:?} -> {:?} ({})", state.status, status, reason);
        state.status = status;
        state.epoch += 1;
        if status != SessionStatus::Connected {
            state.known_printers.clear();
            state.selected_printer = None;
            if let Some(in_flight) = state.in_flight.take() {
                // The dispatch may be gone already
                let _ = in_flight.abort.send(reason.to_string());
            }
        }
        self.status_sender.send_replace(status);
    }

    /// Queries the installed printers
    ///
    /// The answer, without duplicates, becomes the list of known printers. A selected printer that is not listed anymore gets unselected.
    pub async fn list_printers(&self) -> Result<Vec<String>, Error> {
        let epoch = {
            let state = self.state.lock();
            if state.closed {
                return Err(Error::SessionClosed);
            }
            if state.status != SessionStatus::Connected {
                return Err(Error::NotConnected);
            }
            state.epoch
        };

        let listed = self.service.printers().await?;
        let mut printers: Vec<String> = Vec::with_capacity(listed.len());
        for printer in listed {
            if !printers.contains(&printer) {
                printers.push(printer);
            }
        }

        let mut state = self.state.lock();
        if state.closed {
            return Err(Error::SessionClosed);
        }
        // The connection changed while we waited
        if state.epoch != epoch || state.status != SessionStatus::Connected {
            return Err(Error::NotConnected);
        }
        if let Some(selected) = &state.selected_printer {
            if !printers.contains(selected) {
                debug!("{} is not installed anymore, unselected", selected);
                state.selected_printer = None;
            }
        }
        state.known_printers = printers.clone();
        Ok(printers)
    }

    /// Selects one of the printers of the last listing
    pub fn select<A: AsRef<str>>(&self, name: A) -> Result<(), Error> {
        let name = name.as_ref();
        let mut state = self.state.lock();
        if state.closed {
            return Err(Error::SessionClosed);
        }
        if !state.known_printers.iter().any(|printer| printer == name) {
            return Err(Error::UnknownPrinter(name.to_string()));
        }
        state.selected_printer = Some(name.to_string());
        Ok(())
    }

    /// Sends a compiled receipt to the selected printer
    ///
    /// Only one dispatch can be pending at a time, a second one fails right away with [DispatchInProgress](crate::Error::DispatchInProgress). If the connection is lost before the service finishes, the dispatch fails with [TransmissionFailed](crate::Error::TransmissionFailed).
    pub async fn dispatch(&self, buffer: CommandBuffer) -> Result<(), Error> {
        let (job, printer, abort) = {
            let mut state = self.state.lock();
            if state.closed {
                return Err(Error::SessionClosed);
            }
            if state.status != SessionStatus::Connected {
                return Err(Error::NotConnected);
            }
            let printer = match &state.selected_printer {
                Some(printer) => printer.clone(),
                None => return Err(Error::NoPrinterSelected)
            };
            if state.in_flight.is_some() {
                return Err(Error::DispatchInProgress);
            }
            let (sender, receiver) = oneshot::channel();
            state.next_job += 1;
            let job = state.next_job;
            state.in_flight = Some(InFlight {
                job,
                abort: sender
            });
            (job, printer, receiver)
        };
        let _guard = InFlightGuard {
            state: &self.state,
            job
        };

        info!("Dispatching {} bytes to {} (job {})", buffer.len(), printer, job);
        let result = tokio::select! {
            // A lost connection wins over a late answer
            biased;
            reason = abort => {
                Err(Error::TransmissionFailed(reason.unwrap_or_else(|_| "dispatch aborted".to_string())))
            },
            sent = self.service.send(&printer, &buffer) => {
                sent.map_err(|e| Error::TransmissionFailed(e.to_string()))
            }
        };

        match &result {
            Ok(_) => info!("Job {} printed on {}", job, printer),
            Err(e) => info!("Job {} failed: {}", job, e)
        }
        result
    }

    /// Disconnects from the service, forgetting the printers
    ///
    /// A blocked session stays blocked.
    pub fn stop(&self) -> Result<(), Error> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Err(Error::SessionClosed);
            }
            match state.status {
                SessionStatus::Connecting | SessionStatus::Connected => {
                    self.transition(&mut state, SessionStatus::Disconnected, "session stopped");
                },
                SessionStatus::Disconnected | SessionStatus::Blocked => return Ok(())
            }
        }
        self.service.disconnect();
        Ok(())
    }

    /// Releases the connection for good
    ///
    /// The pending dispatch fails, and every later call returns [SessionClosed](crate::Error::SessionClosed). Calling it twice does nothing.
    pub fn shutdown(&self) {
        let was_connected = {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            let was_connected = matches!(state.status, SessionStatus::Connecting | SessionStatus::Connected);
            self.transition(&mut state, SessionStatus::Disconnected, "session shut down");
            was_connected
        };
        if was_connected {
            self.service.disconnect();
        }
        debug!("Print session shut down");
    }

    pub fn status(&self) -> SessionStatus {
        self.state.lock().status
    }

    /// Receiver that follows every status change
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_sender.subscribe()
    }

    /// Printers of the last listing
    pub fn known_printers(&self) -> Vec<String> {
        self.state.lock().known_printers.clone()
    }

    pub fn selected_printer(&self) -> Option<String> {
        self.state.lock().selected_printer.clone()
    }

    /// First printer of the last listing. It is not selected.
    pub fn default_printer(&self) -> Option<String> {
        self.state.lock().known_printers.first().cloned()
    }
}

impl Drop for PrintSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Frees the in-flight slot when the dispatch ends, or when its future gets dropped
struct InFlightGuard<'a> {
    state: &'a Mutex<State>,
    job: u64
}

impl<'a> Drop for InFlightGuard<'a> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        // A lost connection may have freed the slot, and a new dispatch taken it
        if state.in_flight.as_ref().map(|in_flight| in_flight.job) == Some(self.job) {
            state.in_flight = None;
        }
    }
}
