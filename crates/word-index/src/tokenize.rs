use std::io::{self, BufRead};
use std::vec;

use crate::record::LineNumber;

/// Split one line into normalized tokens.
///
/// The line is lowercased first, then cut on every char that is neither a
/// letter nor a digit. Empty pieces are dropped.
pub fn tokenize(line: &str) -> Vec<String> {
    line.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Stream `(line_number, token)` pairs from `reader` in file order.
///
/// Lines end at `\n`, `\r` or `\r\n`. Bytes that are not valid UTF-8 decode
/// to U+FFFD, which separates words like any other non-alphanumeric char.
/// Line numbers start at 1; lines without tokens still advance the counter.
pub fn tokenize_lines<R: BufRead>(reader: R) -> TokenLines<R> {
    TokenLines {
        reader,
        line: 0,
        skip_lf: false,
        pending: Vec::new().into_iter(),
    }
}

pub struct TokenLines<R> {
    reader: R,
    line: LineNumber,
    // Last line ended in `\r`; a following `\n` belongs to it.
    skip_lf: bool,
    pending: vec::IntoIter<String>,
}

impl<R: BufRead> TokenLines<R> {
    fn read_raw_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        let mut read_any = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                return Ok(read_any.then_some(buf));
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            match available.iter().position(|b| matches!(b, b'\n' | b'\r')) {
                Some(end) => {
                    buf.extend_from_slice(&available[..end]);
                    self.skip_lf = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(Some(buf));
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.reader.consume(len);
                    read_any = true;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for TokenLines<R> {
    type Item = io::Result<(LineNumber, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.next() {
                return Some(Ok((self.line, token)));
            }
            let raw = match self.read_raw_line() {
                Ok(Some(raw)) => raw,
                Ok(None) => return None,
                Err(err) => return Some(Err(err)),
            };
            self.line = match self.line.checked_add(1) {
                Some(line) => line,
                None => return Some(Err(io::Error::other("line number overflow"))),
            };
            self.pending = tokenize(&String::from_utf8_lossy(&raw)).into_iter();
        }
    }
}
