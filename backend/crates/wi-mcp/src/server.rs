use crate::error_codes::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use crate::{Metrics, PROTOCOL_VERSION, SERVER_NAME, ToolError, ToolRouter};

use error_location::ErrorLocation;

use std::panic::Location;

use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Longest header line accepted in `Content-Length` framing
pub const MAX_HEADER_LINE_BYTES: usize = 8 * 1024;

const JSONRPC_VERSION: &str = "2.0";
const CONTENT_LENGTH: &str = "content-length";

#[derive(Error, Debug)]
pub enum McpServerError {
    #[error("I/O error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Invalid Content-Length header: {value} {location}")]
    InvalidContentLength {
        value: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize response: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for McpServerError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for McpServerError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type McpServerResult<T> = std::result::Result<T, McpServerError>;

/// How a message was framed on the wire. Replies use the same framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// `Content-Length: N\r\n\r\n` followed by N bytes
    ContentLength,
    /// One JSON document per line
    Line,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Frame {
    Message { framing: Framing, body: Vec<u8> },
    TooLarge { framing: Framing },
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    fn tool_failure(id: Value, err: &ToolError) -> Self {
        Self::failure(id, err.code(), err.client_message(), err.data())
    }
}

/// MCP server speaking JSON-RPC 2.0 over a byte stream
pub struct McpServer {
    router: ToolRouter,
    max_body_bytes: usize,
    metrics: Metrics,
}

impl McpServer {
    pub fn new(router: ToolRouter, max_body_bytes: usize) -> Self {
        Self {
            router,
            max_body_bytes,
            metrics: Metrics::new(),
        }
    }

    pub fn router(&self) -> &ToolRouter {
        &self.router
    }

    /// Serve on the process stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> McpServerResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Process messages one at a time until the reader reaches EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpServerResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server ready (max body {} bytes)", self.max_body_bytes);

        while let Some(frame) = read_frame(&mut reader, self.max_body_bytes).await? {
            let (framing, reply) = match frame {
                Frame::Message { framing, body } => (framing, self.handle_message(&body).await),
                Frame::TooLarge { framing } => {
                    warn!("Rejected message over {} bytes", self.max_body_bytes);
                    self.metrics.protocol_error(INVALID_REQUEST);
                    let reply = JsonRpcResponse::failure(
                        Value::Null,
                        INVALID_REQUEST,
                        format!("Message exceeds {} bytes", self.max_body_bytes),
                        None,
                    );
                    (framing, Some(serde_json::to_value(reply)?))
                }
            };

            if let Some(reply) = reply {
                write_frame(&mut writer, framing, &reply).await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one decoded message body. Returns `None` for notifications.
    pub async fn handle_message(&self, body: &[u8]) -> Option<Value> {
        let reply = match serde_json::from_slice::<Value>(body) {
            Ok(message) => self.handle_value(message).await?,
            Err(e) => {
                debug!("Unparseable message: {}", e);
                self.metrics.protocol_error(PARSE_ERROR);
                JsonRpcResponse::failure(Value::Null, PARSE_ERROR, "Parse error", None)
            }
        };

        match serde_json::to_value(reply) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Failed to encode JSON-RPC reply: {}", e);
                None
            }
        }
    }

    async fn handle_value(&self, message: Value) -> Option<JsonRpcResponse> {
        let Value::Object(mut message) = message else {
            self.metrics.protocol_error(INVALID_REQUEST);
            return Some(JsonRpcResponse::failure(
                Value::Null,
                INVALID_REQUEST,
                "Request must be a JSON object",
                None,
            ));
        };

        let id = message.remove("id").unwrap_or(Value::Null);
        let is_notification = id.is_null();

        if message.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            self.metrics.protocol_error(INVALID_REQUEST);
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
                None,
            ));
        }

        let Some(method) = message.get("method").and_then(Value::as_str).map(str::to_owned)
        else {
            self.metrics.protocol_error(INVALID_REQUEST);
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "method must be a string",
                None,
            ));
        };

        if is_notification {
            debug!("Notification {}", method);
            return None;
        }

        let params = message.remove("params").unwrap_or(Value::Null);
        Some(self.handle_request(id, &method, params).await)
    }

    async fn handle_request(&self, id: Value, method: &str, params: Value) -> JsonRpcResponse {
        match method {
            "initialize" => JsonRpcResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": { "tools": { "listChanged": false } },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": self.router.list_tools() }),
            ),
            "tools/call" => self.handle_tool_call(id, params).await,
            other => {
                self.metrics.protocol_error(METHOD_NOT_FOUND);
                JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                    None,
                )
            }
        }
    }

    async fn handle_tool_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            self.metrics.protocol_error(INVALID_PARAMS);
            return JsonRpcResponse::failure(
                id,
                INVALID_PARAMS,
                "tools/call requires a string name",
                Some(json!({ "field": "name" })),
            );
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.router.call_tool(name, arguments).await {
            Ok(value) => JsonRpcResponse::success(
                id,
                json!({ "content": [{ "type": "json", "json": value }] }),
            ),
            Err(e) => JsonRpcResponse::tool_failure(id, &e),
        }
    }
}

/// Read the next message. Returns `None` at EOF.
pub(crate) async fn read_frame<R>(reader: &mut R, max_body_bytes: usize) -> McpServerResult<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let Some(line) = read_line_limited(reader, max_body_bytes).await? else {
            return Ok(None);
        };
        if line.overflow {
            return Ok(Some(Frame::TooLarge {
                framing: Framing::Line,
            }));
        }

        // Bytes stay raw so invalid UTF-8 fails JSON parsing as it does
        // under Content-Length framing
        let trimmed = line.bytes.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        let header = std::str::from_utf8(trimmed)
            .ok()
            .and_then(|text| header_value(text, CONTENT_LENGTH));
        if let Some(value) = header {
            let length = parse_content_length(value)?;
            skip_remaining_headers(reader).await?;
            return read_body(reader, length, max_body_bytes).await.map(Some);
        }

        return Ok(Some(Frame::Message {
            framing: Framing::Line,
            body: trimmed.to_vec(),
        }));
    }
}

/// Consume header lines up to and including the blank separator.
async fn skip_remaining_headers<R>(reader: &mut R) -> McpServerResult<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let Some(line) = read_line_limited(reader, MAX_HEADER_LINE_BYTES).await? else {
            return Ok(());
        };
        if line.overflow {
            return Err(McpServerError::InvalidContentLength {
                value: "header line too long".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let text = String::from_utf8_lossy(&line.bytes);
        if text.trim().is_empty() {
            return Ok(());
        }
        if header_value(text.trim(), CONTENT_LENGTH).is_some() {
            return Err(McpServerError::InvalidContentLength {
                value: "duplicate header".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }
}

async fn read_body<R>(reader: &mut R, length: usize, max_body_bytes: usize) -> McpServerResult<Frame>
where
    R: AsyncBufRead + Unpin,
{
    if length > max_body_bytes {
        let drained = tokio::io::copy(&mut (&mut *reader).take(length as u64), &mut tokio::io::sink())
                .await?;
        debug!("Drained {} of {} oversized body bytes", drained, length);
        return Ok(Frame::TooLarge {
            framing: Framing::ContentLength,
        });
    }

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;
    Ok(Frame::Message {
        framing: Framing::ContentLength,
        body,
    })
}

async fn write_frame<W>(writer: &mut W, framing: Framing, reply: &Value) -> McpServerResult<()>
where
    W: AsyncWrite + Unpin,
{
    let payload = serde_json::to_vec(reply)?;
    match framing {
        Framing::ContentLength => {
            let header = format!("Content-Length: {}\r\n\r\n", payload.len());
            writer.write_all(header.as_bytes()).await?;
            writer.write_all(&payload).await?;
        }
        Framing::Line => {
            writer.write_all(&payload).await?;
            writer.write_all(b"\n").await?;
        }
    }
    writer.flush().await?;
    Ok(())
}

struct LimitedLine {
    bytes: Vec<u8>,
    overflow: bool,
}

/// Read through the next `\n`, keeping at most `limit` bytes of content.
/// Longer lines are consumed entirely and flagged as overflowed.
async fn read_line_limited<R>(reader: &mut R, limit: usize) -> McpServerResult<Option<LimitedLine>>
where
    R: AsyncBufRead + Unpin,
{
    let mut bytes = Vec::new();
    let mut overflow = false;
    let mut read_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        read_any = true;

        let (chunk, done) = match available.iter().position(|b| *b == b'\n') {
            Some(end) => (&available[..end], true),
            None => (available, false),
        };
        if !overflow {
            if bytes.len() + chunk.len() > limit.saturating_add(1) {
                overflow = true;
                bytes = Vec::new();
            } else {
                bytes.extend_from_slice(chunk);
            }
        }

        let used = chunk.len() + usize::from(done);
        reader.consume(used);
        if done {
            break;
        }
    }

    if !read_any {
        return Ok(None);
    }
    // Allow for a trailing \r
    if !overflow && bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]).len() > limit {
        overflow = true;
        bytes.clear();
    }
    Ok(Some(LimitedLine { bytes, overflow }))
}

fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (key, value) = line.split_once(':')?;
    key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
}

#[track_caller]
fn parse_content_length(value: &str) -> McpServerResult<usize> {
    value
        .parse::<usize>()
        .map_err(|_| McpServerError::InvalidContentLength {
            value: value.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
