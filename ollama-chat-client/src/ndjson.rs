//! Decoding of Ollama's newline-delimited JSON stream.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::{OllamaError, Result};
use crate::types::ChatResponse;

struct Decoder<S> {
    inner: S,
    buffer: Vec<u8>,
    finished: bool,
}

/// Turn a byte stream into a stream of chat increments, one per line.
///
/// Lines split across network chunks are reassembled and blank lines are
/// skipped. The stream ends after the first error, after an increment with
/// `done: true`, or when the body ends.
pub(crate) fn decode_chat_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<ChatResponse>>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<OllamaError>,
{
    let decoder = Decoder {
        inner: byte_stream,
        buffer: Vec::new(),
        finished: false,
    };

    stream::unfold(decoder, |mut decoder| async move {
        loop {
            if decoder.finished {
                return None;
            }

            if let Some(pos) = decoder.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = decoder.buffer.drain(..=pos).collect();
                if let Some(item) = parse_line(&line) {
                    decoder.finished = is_terminal(&item);
                    return Some((item, decoder));
                }
                continue;
            }

            match decoder.inner.next().await {
                Some(Ok(chunk)) => decoder.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    decoder.finished = true;
                    return Some((Err(e.into()), decoder));
                }
                None => {
                    decoder.finished = true;
                    let rest = std::mem::take(&mut decoder.buffer);
                    return parse_line(&rest).map(|item| (item, decoder));
                }
            }
        }
    })
}

fn parse_line(line: &[u8]) -> Option<Result<ChatResponse>> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    let item = match serde_json::from_slice::<ChatResponse>(line) {
        Ok(ChatResponse {
            error: Some(message),
            ..
        }) => Err(OllamaError::Api(message)),
        Ok(resp) => Ok(resp),
        Err(e) => Err(OllamaError::Json(e)),
    };
    Some(item)
}

fn is_terminal(item: &Result<ChatResponse>) -> bool {
    match item {
        Ok(resp) => resp.done,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(parts: &[&str]) -> impl Stream<Item = Result<Bytes>> + Unpin {
        let owned: Vec<Result<Bytes>> = parts
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p.as_bytes())))
            .collect();
        stream::iter(owned)
    }

    async fn contents(parts: &[&str]) -> Vec<std::result::Result<String, String>> {
        decode_chat_stream(chunks(parts))
            .map(|item| {
                item.map(|r| r.content().to_owned())
                    .map_err(|e| e.to_string())
            })
            .collect()
            .await
    }

    #[tokio::test]
    async fn reassembles_lines_split_across_chunks() {
        let out = contents(&[
            r#"{"message":{"role":"assistant","content":"Hel"}}"#,
            "\n{\"message\":{\"role\":\"assis",
            "tant\",\"content\":\"lo\"}}\n",
        ])
        .await;
        assert_eq!(out, vec![Ok("Hel".to_owned()), Ok("lo".to_owned())]);
    }

    #[tokio::test]
    async fn skips_blank_lines_and_keeps_trailing_line() {
        let out = contents(&[
            "\n\r\n",
            "{\"message\":{\"content\":\"a\"}}\n\n",
            "{\"message\":{\"content\":\"b\"}}",
        ])
        .await;
        assert_eq!(out, vec![Ok("a".to_owned()), Ok("b".to_owned())]);
    }

    #[tokio::test]
    async fn stops_after_done() {
        let out = contents(&[
            "{\"message\":{\"content\":\"x\"},\"done\":true}\n",
            "{\"message\":{\"content\":\"ignored\"}}\n",
        ])
        .await;
        assert_eq!(out, vec![Ok("x".to_owned())]);
    }

    #[tokio::test]
    async fn error_line_ends_stream() {
        let out = contents(&[
            "{\"message\":{\"content\":\"Hel\"}}\n",
            "{\"error\":\"model crashed\"}\n",
            "{\"message\":{\"content\":\"ignored\"}}\n",
        ])
        .await;
        assert_eq!(
            out,
            vec![Ok("Hel".to_owned()), Err("model crashed".to_owned())]
        );
    }

    #[tokio::test]
    async fn malformed_line_is_an_error() {
        let out = contents(&["not json\n"]).await;
        assert_eq!(out.len(), 1);
        assert!(out[0].as_ref().unwrap_err().starts_with("malformed backend response"));
    }

    #[tokio::test]
    async fn transport_error_ends_stream() {
        let parts: Vec<Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"{\"message\":{\"content\":\"a\"}}\n")),
            Err(OllamaError::Api("connection reset".into())),
            Ok(Bytes::from_static(b"{\"message\":{\"content\":\"b\"}}\n")),
        ];
        let out: Vec<_> = decode_chat_stream(stream::iter(parts)).collect().await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap().content(), "a");
        assert!(matches!(out[1], Err(OllamaError::Api(_))));
    }
}
