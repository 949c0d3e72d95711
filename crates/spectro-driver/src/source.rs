//! Line sources: where the animation driver gets its next row of samples.

use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError};
use spectro_core::Intensity;

/// Supplies the next line of intensity samples to draw.
///
/// Sources never block: when nothing new is available they hand back the
/// most recent line again.
pub trait LineSource: Send + 'static {
    type Sample: Intensity;

    /// The line to draw now. Returns `None` when the source is exhausted.
    fn next_line(&mut self) -> Option<&[Self::Sample]>;
}

/// Repeats the same line forever.
pub struct StaticLineSource<S> {
    line: Vec<S>,
}

impl<S> StaticLineSource<S> {
    pub fn new(line: Vec<S>) -> Self {
        Self { line }
    }
}

impl<S: Intensity + Send + 'static> LineSource for StaticLineSource<S> {
    type Sample = S;

    fn next_line(&mut self) -> Option<&[S]> {
        Some(&self.line)
    }
}

/// Cycles through a fixed set of rows.
pub struct CyclingLineSource<S> {
    rows: Vec<Vec<S>>,
    current: usize,
}

impl<S> CyclingLineSource<S> {
    pub fn new(rows: Vec<Vec<S>>) -> Self {
        Self { rows, current: 0 }
    }

    pub fn set_row(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.current = index % self.rows.len();
        }
    }
}

impl<S: Intensity + Send + 'static> LineSource for CyclingLineSource<S> {
    type Sample = S;

    fn next_line(&mut self) -> Option<&[S]> {
        if self.rows.is_empty() {
            return None;
        }
        let index = self.current;
        self.current = (self.current + 1) % self.rows.len();
        Some(&self.rows[index])
    }
}

/// Lines pushed by a producer on another thread.
///
/// Each pull drains the queue and keeps only the newest line. If the producer
/// has not delivered anything since the last pull, the previous line is
/// reused (stale read); before the first delivery that is an empty line,
/// which draws as background.
pub struct ChannelLineSource<S> {
    line_rx: Receiver<Vec<S>>,
    line_tx: Sender<Vec<S>>,
    latest: Vec<S>,
}

impl<S> ChannelLineSource<S> {
    /// Create a source whose queue holds up to `capacity` pending lines.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self {
            line_rx: rx,
            line_tx: tx,
            latest: Vec::new(),
        }
    }

    /// Get a sender handle for the producer.
    pub fn sender(&self) -> Sender<Vec<S>> {
        self.line_tx.clone()
    }

    fn drain(&mut self) {
        loop {
            match self.line_rx.try_recv() {
                Ok(line) => self.latest = line,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl<S: Intensity + Send + 'static> LineSource for ChannelLineSource<S> {
    type Sample = S;

    fn next_line(&mut self) -> Option<&[S]> {
        self.drain();
        Some(&self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_repeats() {
        let mut source = StaticLineSource::new(vec![1u8, 2, 3]);
        assert_eq!(source.next_line(), Some(&[1u8, 2, 3][..]));
        assert_eq!(source.next_line(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_cycling_source_wraps() {
        let mut source = CyclingLineSource::new(vec![vec![1u8], vec![2u8]]);
        assert_eq!(source.next_line(), Some(&[1u8][..]));
        assert_eq!(source.next_line(), Some(&[2u8][..]));
        assert_eq!(source.next_line(), Some(&[1u8][..]));

        source.set_row(3);
        assert_eq!(source.next_line(), Some(&[2u8][..]));
    }

    #[test]
    fn test_cycling_source_empty_is_exhausted() {
        let mut source = CyclingLineSource::<u8>::new(Vec::new());
        assert_eq!(source.next_line(), None);
    }

    #[test]
    fn test_channel_source_stale_read() {
        let mut source = ChannelLineSource::new(4);
        let tx = source.sender();
        assert_eq!(source.next_line(), Some(&[][..]));

        tx.send(vec![1i32]).unwrap();
        assert_eq!(source.next_line(), Some(&[1i32][..]));
        // Nothing new: previous line again
        assert_eq!(source.next_line(), Some(&[1i32][..]));

        tx.send(vec![2]).unwrap();
        tx.send(vec![3]).unwrap();
        assert_eq!(source.next_line(), Some(&[3i32][..]));
    }

    #[test]
    fn test_channel_source_survives_disconnect() {
        let mut source = ChannelLineSource::new(1);
        {
            let tx = source.sender();
            tx.send(vec![7u8]).unwrap();
        }
        assert_eq!(source.next_line(), Some(&[7u8][..]));
        assert_eq!(source.next_line(), Some(&[7u8][..]));
    }
}
