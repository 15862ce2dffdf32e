//! Cursor-based reader over a buffered response.
//!
//! This is what firmware sees as the response's socket: `available`, `read`,
//! bulk reads and pattern search over a body that has already fully arrived.
//! The cursor only moves forward, except that [`ResponseStream::find_until`]
//! puts it back when it meets the terminator first.

use bytes::Bytes;
use sketchsim_common::Text;
use tracing::trace;

/// Pull-based byte reader over a completed response body.
#[derive(Debug, Clone, Default)]
pub struct ResponseStream {
    data: Bytes,
    pos: usize,
    stopped: bool,
}

impl ResponseStream {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: Bytes) -> Self {
        ResponseStream {
            data,
            pos: 0,
            stopped: false,
        }
    }

    /// Bytes left to read.
    pub fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next byte, advancing the cursor. `None` at the end.
    pub fn read(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Next byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Copy up to `buf.len()` bytes into `buf`. Returns the count copied,
    /// 0 at the end.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.available());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    /// Drain everything left into a [`Text`].
    pub fn read_string(&mut self) -> Text {
        let rest = Text::from(&self.data[self.pos..]);
        self.pos = self.data.len();
        rest
    }

    /// Read up to, not including, `terminator`. The terminator is consumed.
    pub fn read_string_until(&mut self, terminator: u8) -> Text {
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == terminator) {
            Some(i) => {
                let line = Text::from(&rest[..i]);
                self.pos += i + 1;
                line
            }
            None => self.read_string(),
        }
    }

    /// Skip forward past the next occurrence of `target`.
    ///
    /// On a miss the cursor is left at the end. An empty target matches
    /// immediately without moving.
    pub fn find(&mut self, target: impl AsRef<[u8]>) -> bool {
        let target = target.as_ref();
        match search(&self.data[self.pos..], target) {
            Some(i) => {
                self.pos += i + target.len();
                trace!("[HTTP] find matched, cursor at {}", self.pos);
                true
            }
            None => {
                self.pos = self.data.len();
                false
            }
        }
    }

    /// Like [`find`](Self::find), but if `terminator` occurs before `target`
    /// the cursor returns to where it was and the search fails.
    ///
    /// Occurrences are ordered by where they start: the terminator wins only
    /// if it starts strictly before the target. When neither occurs the
    /// cursor moves to the end, as with `find`. An empty terminator never
    /// stops the search.
    pub fn find_until(&mut self, target: impl AsRef<[u8]>, terminator: impl AsRef<[u8]>) -> bool {
        let (target, terminator) = (target.as_ref(), terminator.as_ref());
        if terminator.is_empty() {
            return self.find(target);
        }

        let rest = &self.data[self.pos..];
        let hit = search(rest, target);
        let stop = search(rest, terminator);
        match (hit, stop) {
            (Some(t), Some(s)) if s < t => {
                trace!("[HTTP] find_until hit terminator at {}", self.pos + s);
                false
            }
            (None, Some(_)) => false,
            (Some(t), _) => {
                self.pos += t + target.len();
                true
            }
            (None, None) => {
                self.pos = self.data.len();
                false
            }
        }
    }

    /// Outgoing data is accepted and dropped. Returns `buf.len()`.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }

    /// Whether unread data remains on a live stream.
    pub fn connected(&self) -> bool {
        !self.stopped && self.available() > 0
    }

    /// Release the buffer and reset the cursor.
    pub fn stop(&mut self) {
        self.data = Bytes::new();
        self.pos = 0;
        self.stopped = true;
    }
}

/// Offset of the first occurrence of `needle` in `haystack`.
fn search(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(s: &'static str) -> ResponseStream {
        ResponseStream::new(Bytes::from_static(s.as_bytes()))
    }

    #[test]
    fn test_read_until_empty() {
        let mut s = stream("ok");
        assert_eq!(s.available(), 2);
        assert_eq!(s.peek(), Some(b'o'));
        assert_eq!(s.read(), Some(b'o'));
        assert_eq!(s.read(), Some(b'k'));
        assert_eq!(s.read(), None);
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn test_read_bytes() {
        let mut s = stream("hello world");
        let mut buf = [0u8; 5];
        assert_eq!(s.read_bytes(&mut buf), 5);
        assert_eq!(&buf, b"hello");
        let mut big = [0u8; 32];
        assert_eq!(s.read_bytes(&mut big), 6);
        assert_eq!(&big[..6], b" world");
        assert_eq!(s.read_bytes(&mut big), 0);
    }

    #[test]
    fn test_find_until_rolls_back_on_terminator() {
        let mut s = stream("AAABBBCCC");
        assert!(!s.find_until("CCC", "BBB"));
        assert_eq!(s.position(), 0);

        assert!(s.find_until("BBB", "ZZZ"));
        assert_eq!(s.position(), 6);
        assert_eq!(s.read(), Some(b'C'));
    }

    #[test]
    fn test_find_until_miss_moves_to_end() {
        let mut s = stream("AAABBBCCC");
        assert!(!s.find_until("XYZ", "QQQ"));
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn test_find_until_terminator_only() {
        let mut s = stream("key: value\r\n\r\nbody");
        assert!(!s.find_until("missing", "\r\n\r\n"));
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_find_until_tie_prefers_target() {
        let mut s = stream("xxABCD");
        assert!(s.find_until("ABCD", "AB"));
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn test_find_until_orders_by_start_offset() {
        let mut s = stream("xABCD");
        assert!(!s.find_until("CD", "BCD"));
        assert_eq!(s.position(), 0);

        assert!(s.find_until("BCD", "CD"));
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn test_find() {
        let mut s = stream("HTTP/1.1 200 OK\r\n\r\n{\"temp\":21}");
        assert!(s.find("\r\n\r\n"));
        assert_eq!(s.peek(), Some(b'{'));
        assert!(s.find(""));
        assert_eq!(s.peek(), Some(b'{'));
        assert!(!s.find("humidity"));
        assert_eq!(s.available(), 0);
    }

    #[test]
    fn test_find_advances_past_match() {
        let mut s = stream("a,b,c");
        assert!(s.find(","));
        assert!(s.find(","));
        assert_eq!(s.read_string(), "c");
    }

    #[test]
    fn test_read_string_until() {
        let mut s = stream("line one\nline two\ntail");
        assert_eq!(s.read_string_until(b'\n'), "line one");
        assert_eq!(s.read_string_until(b'\n'), "line two");
        assert_eq!(s.read_string_until(b'\n'), "tail");
        assert_eq!(s.read_string_until(b'\n'), "");
    }

    #[test]
    fn test_stop_and_connected() {
        let mut s = stream("abc");
        assert!(s.connected());
        assert_eq!(s.write(b"ignored"), 7);
        s.stop();
        assert!(!s.connected());
        assert_eq!(s.available(), 0);
        assert_eq!(s.read(), None);
        assert!(!ResponseStream::default().connected());
    }
}
