use futures::channel::mpsc;

/// Fan-out notification source.
///
/// Every call to [`Signal::subscribe`] hands out a [`Listener`] backed by its own
/// channel. Dropping (or closing) the listener is the unsubscribe: the source
/// notices the closed channel on the next emit and forgets it.
pub struct Signal<T> {
    senders: Vec<mpsc::UnboundedSender<T>>,
}

impl<T: Clone> Signal<T> {
    pub fn new() -> Self {
        Signal { senders: vec![] }
    }

    pub fn subscribe(&mut self) -> Listener<T> {
        let (tx, rx) = mpsc::unbounded();
        self.senders.push(tx);
        Listener { rx }
    }

    pub fn emit(&mut self, value: T) {
        self.senders
            .retain(|tx| tx.unbounded_send(value.clone()).is_ok());
    }

    pub fn subscriber_count(&mut self) -> usize {
        self.senders.retain(|tx| !tx.is_closed());
        self.senders.len()
    }
}

impl<T: Clone> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Listener<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Listener<T> {
    /// Takes every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = vec![];
        while let Ok(Some(value)) = self.rx.try_next() {
            out.push(value);
        }
        out
    }

    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_receive_in_emission_order() {
        let mut signal = Signal::new();
        let mut a = signal.subscribe();
        let mut b = signal.subscribe();

        signal.emit(1);
        signal.emit(2);

        assert_eq!(a.drain(), vec![1, 2]);
        assert_eq!(b.drain(), vec![1, 2]);
        assert!(a.drain().is_empty());
    }

    #[test]
    fn dropping_a_listener_unsubscribes_it() {
        let mut signal = Signal::new();
        let keep = signal.subscribe();
        let dropped = signal.subscribe();
        assert_eq!(signal.subscriber_count(), 2);

        drop(dropped);
        signal.emit("tick");

        assert_eq!(signal.subscriber_count(), 1);
        drop(keep);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn closed_listener_stops_receiving() {
        let mut signal = Signal::new();
        let mut listener = signal.subscribe();
        listener.close();

        signal.emit(5);

        assert!(listener.drain().is_empty());
        assert_eq!(signal.subscriber_count(), 0);
    }
}
