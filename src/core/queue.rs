//! Bounded wait queue for the producer/consumer hand-off

use super::command::DispatchCommand;
use crossbeam_channel::{bounded as channel_bounded, Receiver, Sender, TryRecvError};

/// Create the two halves of a bounded wait queue.
///
/// `capacity` bounds how many commands may be outstanding; `initial` is a
/// reservation hint for the consumer-side batch buffer.
pub fn bounded(capacity: usize, initial: usize) -> (QueueProducer, QueueConsumer) {
    let (tx, rx) = channel_bounded(capacity);
    (
        QueueProducer { tx, capacity },
        QueueConsumer {
            rx,
            capacity,
            initial,
        },
    )
}

/// Producer half: non-blocking enqueue, shared by any number of threads.
#[derive(Clone)]
pub struct QueueProducer {
    tx: Sender<DispatchCommand>,
    capacity: usize,
}

impl QueueProducer {
    /// Try to enqueue a command without blocking.
    ///
    /// Returns `false` when the queue is full or the consumer half is gone.
    pub fn enqueue(&self, command: DispatchCommand) -> bool {
        self.tx.try_send(command).is_ok()
    }

    /// Enqueue a command, waiting for space if the queue is full.
    ///
    /// Used only for the Stop command at shutdown, where a dropped command
    /// would leave the consumer running forever. Returns `false` when the
    /// consumer half is gone.
    pub fn enqueue_blocking(&self, command: DispatchCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Consumer half: blocking batch dequeue, owned by the consumer thread.
pub struct QueueConsumer {
    rx: Receiver<DispatchCommand>,
    capacity: usize,
    initial: usize,
}

impl QueueConsumer {
    /// Block until at least one command is available, then drain
    /// opportunistically into `batch` up to `capacity` commands.
    ///
    /// `batch` is cleared first. Returns `false` only on permanent closure
    /// (every producer handle dropped), after which no data will ever arrive.
    pub fn dequeue(&self, batch: &mut Vec<DispatchCommand>) -> bool {
        batch.clear();

        match self.rx.recv() {
            Ok(command) => batch.push(command),
            Err(_) => return false,
        }

        while batch.len() < self.capacity {
            match self.rx.try_recv() {
                Ok(command) => batch.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        true
    }

    pub fn initial(&self) -> usize {
        self.initial
    }
}
