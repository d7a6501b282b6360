mod handlers;
mod tools;

use serde_json::{json, Value};
use std::io::{self, BufRead, Read, Write};

use crate::analyze::Analyzer;
use crate::error::{AnalyzerError, Result};
use handlers::{error_text, handle_analyze_tool, handle_batch_analyze, handle_initialize};
use tools::{get_mcp_tools, ANALYZE_TOOL, BATCH_TOOL};

const MAX_REQUEST_SIZE: u64 = 10 * 1024 * 1024;

enum Incoming {
    Line(Vec<u8>),
    Oversized,
    Closed,
}

fn next_message(reader: &mut impl BufRead) -> io::Result<Incoming> {
    let mut buf = Vec::new();
    let limit = MAX_REQUEST_SIZE + 1;
    let read = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
    if read == 0 {
        return Ok(Incoming::Closed);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if read as u64 == limit {
        discard_rest_of_line(reader)?;
        return Ok(Incoming::Oversized);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Incoming::Line(buf))
}

fn discard_rest_of_line(reader: &mut impl BufRead) -> io::Result<()> {
    let mut scratch = Vec::new();
    loop {
        scratch.clear();
        let read = reader.by_ref().take(64 * 1024).read_until(b'\n', &mut scratch)?;
        if read == 0 || scratch.last() == Some(&b'\n') {
            return Ok(());
        }
    }
}

pub fn serve_stdio(analyzer: &Analyzer) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    tracing::info!("mcp-analyzer server started on stdio");
    serve(analyzer, stdin.lock(), stdout.lock())
}

pub fn serve(analyzer: &Analyzer, mut reader: impl BufRead, mut writer: impl Write) -> Result<()> {
    loop {
        let line = match next_message(&mut reader)? {
            Incoming::Closed => break,
            Incoming::Line(line) => line,
            Incoming::Oversized => {
                tracing::warn!(limit = MAX_REQUEST_SIZE, "request over size limit discarded");
                send_error(&mut writer, None, -32600, "Request exceeds 10MB size limit".to_string())?;
                continue;
            }
        };
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        // from_slice also rejects invalid UTF-8.
        let request: Value = match serde_json::from_slice(&line) {
            Ok(v) => v,
            Err(e) => {
                send_error(&mut writer, None, -32700, format!("Parse error: {e}"))?;
                continue;
            }
        };

        let id = request.get("id").cloned();
        let method = request.get("method").and_then(Value::as_str).unwrap_or("");
        let params = request.get("params").cloned().unwrap_or(json!({}));
        tracing::debug!(method, "request received");

        match method {
            "initialize" => send_result(&mut writer, id, handle_initialize(&params))?,
            "notifications/initialized" | "initialized" => {}
            "ping" => send_result(&mut writer, id, json!({}))?,
            "tools/list" => send_result(&mut writer, id, json!({ "tools": get_mcp_tools() }))?,
            "tools/call" => {
                let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

                let result = match tool_name {
                    ANALYZE_TOOL => handle_analyze_tool(analyzer, &arguments),
                    BATCH_TOOL => handle_batch_analyze(analyzer, &arguments),
                    other => Err(AnalyzerError::InvalidInput(format!("Unknown tool: {other}"))),
                };

                let response = match result {
                    Ok(content) => json!({
                        "content": [{"type": "text", "text": content}],
                        "isError": false
                    }),
                    Err(e) => {
                        tracing::info!(tool = tool_name, error = %e, "tool call failed");
                        json!({
                            "content": [{"type": "text", "text": error_text(&e)}],
                            "isError": true
                        })
                    }
                };
                send_result(&mut writer, id, response)?;
            }
            "resources/list" => send_result(&mut writer, id, json!({"resources": []}))?,
            "prompts/list" => send_result(&mut writer, id, json!({"prompts": []}))?,
            _ => {
                // Notifications (no id) are ignored.
                if id.is_some() {
                    send_error(&mut writer, id, -32601, format!("Method not found: {method}"))?;
                }
            }
        }
    }

    Ok(())
}

fn send_result(writer: &mut impl Write, id: Option<Value>, result: Value) -> Result<()> {
    write_message(
        writer,
        json!({
            "jsonrpc": "2.0",
            "id": id.unwrap_or(Value::Null),
            "result": result
        }),
    )
}

fn send_error(writer: &mut impl Write, id: Option<Value>, code: i64, message: String) -> Result<()> {
    write_message(
        writer,
        json!({
            "jsonrpc": "2.0",
            "id": id.unwrap_or(Value::Null),
            "error": {"code": code, "message": message}
        }),
    )
}

fn write_message(writer: &mut impl Write, message: Value) -> Result<()> {
    writeln!(writer, "{message}")?;
    writer.flush()?;
    Ok(())
}
