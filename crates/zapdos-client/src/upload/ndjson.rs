//! Incremental NDJSON decoder.
//!
//! The metadata-commit response arrives as newline-delimited JSON over a
//! chunked body, so records can be split at arbitrary byte offsets. The
//! decoder keeps a single carried buffer; `\n` is a single byte in UTF-8,
//! which makes byte-level splitting safe across multi-byte characters. A
//! line that fails to parse is logged and skipped, never fatal to the
//! stream.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

/// Push-based decoder for one NDJSON stream. Non-restartable: feed chunks
/// in order, then call [`finish`](NdjsonDecoder::finish) once for the
/// residual fragment. Abandoning the decoder early simply drops whatever
/// was buffered.
#[derive(Debug)]
pub struct NdjsonDecoder<T> {
    buf: Vec<u8>,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> NdjsonDecoder<T> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Feed one chunk, returning every record completed by it. The final
    /// (possibly incomplete) fragment stays buffered for the next chunk.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<T> {
        self.buf.extend_from_slice(chunk);

        let mut records = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(record) = Self::decode_line(&line[..line.len() - 1]) {
                records.push(record);
            }
        }
        records
    }

    /// Flush the residual buffer at end of stream under the same tolerant
    /// rule as complete lines.
    pub fn finish(&mut self) -> Option<T> {
        let rest = std::mem::take(&mut self.buf);
        Self::decode_line(&rest)
    }

    fn decode_line(line: &[u8]) -> Option<T> {
        let line = match line.last() {
            Some(b'\r') => &line[..line.len() - 1],
            _ => line,
        };
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            return None;
        }

        match serde_json::from_slice(line) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    line = %String::from_utf8_lossy(line),
                    "Skipping undecodable stream line"
                );
                None
            }
        }
    }
}

impl<T: DeserializeOwned> Default for NdjsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn decode_chunks(chunks: &[&[u8]]) -> Vec<Value> {
        let mut decoder = NdjsonDecoder::<Value>::new();
        let mut records = Vec::new();
        for chunk in chunks {
            records.extend(decoder.push(chunk));
        }
        records.extend(decoder.finish());
        records
    }

    #[test]
    fn decodes_complete_lines() {
        let records = decode_chunks(&[b"{\"a\":1}\n{\"b\":2}\n"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], 1);
        assert_eq!(records[1]["b"], 2);
    }

    #[test]
    fn chunk_boundary_invariant_at_every_offset() {
        let payload = b"{\"a\":1}\n{\"b\":2}\n";
        let expected = decode_chunks(&[payload]);
        assert_eq!(expected.len(), 2);

        for split in 0..=payload.len() {
            let (head, tail) = payload.split_at(split);
            assert_eq!(decode_chunks(&[head, tail]), expected, "split at {}", split);
        }
    }

    #[test]
    fn multibyte_characters_survive_chunk_splits() {
        let payload = "{\"name\":\"caf\u{e9} \u{1f600}\"}\n".as_bytes();
        let expected = decode_chunks(&[payload]);
        assert_eq!(expected.len(), 1);

        for split in 0..=payload.len() {
            let (head, tail) = payload.split_at(split);
            assert_eq!(decode_chunks(&[head, tail]), expected, "split at {}", split);
        }
    }

    #[test]
    fn malformed_line_is_skipped_not_fatal() {
        let records = decode_chunks(&[b"{\"a\":1}\nnot json\n{\"b\":2}\n"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], 1);
        assert_eq!(records[1]["b"], 2);
    }

    #[test]
    fn truncated_residue_is_dropped_at_finish() {
        let mut decoder = NdjsonDecoder::<Value>::new();
        let records = decoder.push(b"{\"a\":1}\n{\"b\":");
        assert_eq!(records.len(), 1);
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn trailing_record_without_newline_is_recovered() {
        let records = decode_chunks(&[b"{\"a\":1}\n{\"b\":2}"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["b"], 2);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let records = decode_chunks(&[b"{\"a\":1}\r\n\r\n\n{\"b\":2}\r\n"]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(decode_chunks(&[b""]).is_empty());
    }
}
