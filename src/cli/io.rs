//! JSON I/O handling for CLI
//!
//! - Input: one JSON value on stdin (may span lines)
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::io::{Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read one JSON request, usually from stdin
pub fn read_request_from<R: Read>(mut reader: R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::usage("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Write a success response
pub fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write an error response
pub fn write_error_to<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_multiline_request() {
        let input = "{\n  \"id\": 1\n}\n";
        let value = read_request_from(input.as_bytes()).unwrap();
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn test_read_empty_request_fails() {
        let err = read_request_from("  \n".as_bytes()).unwrap_err();
        assert_eq!(err.code(), "SHAPE_CLI_USAGE_ERROR");
    }

    #[test]
    fn test_read_invalid_json_fails() {
        let err = read_request_from("{ nope".as_bytes()).unwrap_err();
        assert_eq!(err.code(), "SHAPE_CLI_JSON_ERROR");
    }

    #[test]
    fn test_write_response_envelope() {
        let mut out = Vec::new();
        write_response_to(&mut out, serde_json::json!({ "id": 1 })).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"status\":\"ok\",\"data\":{\"id\":1}}\n");
    }

    #[test]
    fn test_write_error_envelope() {
        let mut out = Vec::new();
        write_error_to(&mut out, "SHAPE_UNKNOWN_FIELD", "bad").unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "SHAPE_UNKNOWN_FIELD");
    }
}
