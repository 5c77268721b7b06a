//! Hand-off queue between the compute workers and the aggregator.
//!
//! Any number of [`Producer`] handles push records; a single [`Consumer`]
//! drains them. The queue closes when the last producer is dropped, and that
//! close is the end-of-stream signal the consumer waits for.

use tokio::sync::mpsc;

use crate::forecast::CityStat;

pub fn channel() -> (Producer, Consumer) {
    let (tx, rx) = mpsc::unbounded_channel();

    (Producer { tx }, Consumer { rx })
}

#[derive(Debug, Clone)]
pub struct Producer {
    tx: mpsc::UnboundedSender<CityStat>,
}

impl Producer {
    /// Enqueues a record. Returns it back if the consumer is gone.
    pub fn push(&self, stat: CityStat) -> Result<(), CityStat> {
        self.tx.send(stat).map_err(|e| e.0)
    }
}

#[derive(Debug)]
pub struct Consumer {
    rx: mpsc::UnboundedReceiver<CityStat>,
}

impl Consumer {
    /// Next record in FIFO order, or `None` once every producer is dropped
    /// and the queue is empty.
    pub async fn next(&mut self) -> Option<CityStat> {
        self.rx.recv().await
    }

    /// Collects every record until the queue closes.
    pub async fn drain(mut self) -> Vec<CityStat> {
        let mut collected = Vec::new();
        while let Some(stat) = self.next().await {
            collected.push(stat);
        }

        collected
    }
}

// -- Tests -------------------------------------------------------------------
