use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Collection stopped")]
    CollectionStopped,
}

/// Streams newline-delimited JSON text into the forwarding pipeline.
///
/// The transport session itself (the hub's WebSocket) is owned by whoever
/// feeds this reader; the collector only deals in complete text lines.
pub struct LineCollector<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin> LineCollector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// Runs until EOF, pushing each non-empty line into `tx`.
    pub async fn run(mut self, tx: mpsc::UnboundedSender<String>) -> Result<(), CollectorError> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(line).is_err() {
                return Err(CollectorError::CollectionStopped);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn splits_stream_into_lines() {
        let input = Cursor::new("{\"a\":1}\n\n{\"b\":2}\n");
        let (tx, mut rx) = mpsc::unbounded_channel();

        LineCollector::new(input).run(tx).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), "{\"a\":1}");
        assert_eq!(rx.recv().await.unwrap(), "{\"b\":2}");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn stops_when_receiver_goes_away() {
        let input = Cursor::new("one\ntwo\n");
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let result = LineCollector::new(input).run(tx).await;
        assert!(matches!(result, Err(CollectorError::CollectionStopped)));
    }
}
