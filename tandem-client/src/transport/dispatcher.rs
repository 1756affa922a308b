use std::sync::Mutex;
use tandem_core::ServerSignal;
use tokio::sync::mpsc;
use tracing::debug;

/// Fan-out of inbound server signals to whoever holds a subscription.
///
/// The socket read loop calls [`SignalDispatcher::dispatch`]; each live
/// subscriber receives a copy. Unsubscription is by scope: dropping the
/// receiver is enough, on every exit path — the dead entry is pruned on the
/// next dispatch.
pub struct SignalDispatcher {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ServerSignal>>>,
}

impl SignalDispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ServerSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("dispatcher lock poisoned")
            .push(tx);
        rx
    }

    pub fn dispatch(&self, signal: ServerSignal) {
        let mut subscribers = self.subscribers.lock().expect("dispatcher lock poisoned");
        subscribers.retain(|tx| match tx.send(signal.clone()) {
            Ok(()) => true,
            Err(_) => {
                debug!("Pruning dropped signal subscriber");
                false
            }
        });
    }
}

impl Default for SignalDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
