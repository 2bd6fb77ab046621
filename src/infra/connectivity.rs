use std::{
    net::{TcpStream, ToSocketAddrs},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{domain::events::ConnectivityStatus, infra::config::ConnectivityConfig};

const CONNECTIVITY_MONITOR_SHUTDOWN_FAILED: &str = "CONNECTIVITY_MONITOR_SHUTDOWN_FAILED";

/// Background probe that reports online/offline transitions.
///
/// Stops and joins its worker on drop.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ConnectivityMonitor {
    pub fn start(
        config: &ConnectivityConfig,
        status_tx: Sender<ConnectivityStatus>,
    ) -> Result<Self, std::io::Error> {
        let probe = TcpProbe {
            addr: config.probe_addr.clone(),
            timeout: Duration::from_millis(config.probe_timeout_ms),
        };
        let interval = Duration::from_millis(config.probe_interval_ms.max(100));

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("localnet-connectivity".to_owned())
            .spawn(move || run_monitor(move || probe.check(), interval, status_tx, stop_rx))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = CONNECTIVITY_MONITOR_SHUTDOWN_FAILED,
                    error = ?error,
                    "connectivity monitor worker panicked on shutdown"
                );
            }
        }
    }
}

struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    fn check(&self) -> ConnectivityStatus {
        let reachable = self
            .addr
            .to_socket_addrs()
            .map(|mut addrs| {
                addrs.any(|addr| TcpStream::connect_timeout(&addr, self.timeout).is_ok())
            })
            .unwrap_or(false);

        if reachable {
            ConnectivityStatus::Online
        } else {
            ConnectivityStatus::Offline
        }
    }
}

/// Probes until stopped, sending only changes.
fn run_monitor<P>(
    probe: P,
    interval: Duration,
    status_tx: Sender<ConnectivityStatus>,
    stop_rx: Receiver<()>,
) where
    P: Fn() -> ConnectivityStatus,
{
    let mut last = ConnectivityStatus::Unknown;

    loop {
        let status = probe();
        if status != last {
            tracing::info!(status = status.as_label(), "connectivity changed");
            if status_tx.send(status).is_err() {
                return;
            }
            last = status;
        }

        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, net::TcpListener};

    use super::*;

    #[test]
    fn monitor_reports_only_transitions() {
        let (status_tx, status_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();
        let script = [
            ConnectivityStatus::Online,
            ConnectivityStatus::Online,
            ConnectivityStatus::Offline,
            ConnectivityStatus::Online,
        ];
        let step = Cell::new(0usize);

        let probe = || {
            let index = step.get();
            step.set(index + 1);
            if index + 1 >= script.len() {
                let _ = stop_tx.send(());
            }
            script[index.min(script.len() - 1)]
        };

        run_monitor(probe, Duration::from_millis(1), status_tx, stop_rx);

        let seen: Vec<_> = status_rx.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                ConnectivityStatus::Online,
                ConnectivityStatus::Offline,
                ConnectivityStatus::Online,
            ]
        );
    }

    #[test]
    fn tcp_probe_sees_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");

        let probe = TcpProbe {
            addr: addr.to_string(),
            timeout: Duration::from_millis(500),
        };

        assert_eq!(probe.check(), ConnectivityStatus::Online);
    }

    #[test]
    fn tcp_probe_reports_offline_for_unresolvable_host() {
        let probe = TcpProbe {
            addr: "not a host".to_owned(),
            timeout: Duration::from_millis(50),
        };

        assert_eq!(probe.check(), ConnectivityStatus::Offline);
    }

    #[test]
    fn monitor_stops_on_drop() {
        let (status_tx, _status_rx) = mpsc::channel();
        let config = ConnectivityConfig {
            probe_addr: "not a host".to_owned(),
            probe_interval_ms: 10_000,
            probe_timeout_ms: 10,
        };

        let monitor = ConnectivityMonitor::start(&config, status_tx).expect("monitor starts");
        drop(monitor);
    }
}
