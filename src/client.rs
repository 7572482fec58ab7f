/*
 * This file is part of Adaptive MIPI.
 *
 * Copyright (C) 2025 Adaptive MIPI contributors
 *
 * Adaptive MIPI is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Adaptive MIPI is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Adaptive MIPI. If not, see <https://www.gnu.org/licenses/>.
 */

//! Daemon Client
//!
//! Blocking client for `adaptive-mipid`. One request line out, one response
//! line back, correlated by request id.

use std::io::{BufRead, BufReader, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use am_error::{AdaptiveMipiError, Result};
use am_protocol::{
    generate_request_id, Request, RequestEnvelope, Response, ResponseData, ResponseEnvelope,
    MAX_MESSAGE_SIZE,
};

const TIMEOUT_MS: u64 = 5000;

pub struct DaemonClient {
    writer: UnixStream,
    reader: BufReader<UnixStream>,
}

impl DaemonClient {
    pub fn connect(socket_path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(socket_path).map_err(|e| {
            AdaptiveMipiError::DaemonConnection(format!(
                "Failed to connect to daemon at {}: {}",
                socket_path.display(),
                e
            ))
        })?;
        let reader_stream = stream.try_clone()?;

        let timeout = Some(Duration::from_millis(TIMEOUT_MS));
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;
        reader_stream.set_read_timeout(timeout)?;

        Ok(Self {
            writer: stream,
            reader: BufReader::new(reader_stream),
        })
    }

    /// Send a request and wait for its response
    pub fn request(&mut self, req: Request) -> Result<Response> {
        req.validate()
            .map_err(|e| AdaptiveMipiError::daemon(format!("Request validation failed: {}", e)))?;

        let request_id = generate_request_id();
        let envelope = RequestEnvelope::with_id(req.clone(), request_id);

        let mut json = serde_json::to_vec(&envelope)?;
        json.push(b'\n');
        if json.len() > MAX_MESSAGE_SIZE {
            return Err(AdaptiveMipiError::MessageTooLarge {
                size: json.len(),
                max_size: MAX_MESSAGE_SIZE,
            });
        }

        self.writer.write_all(&json)?;

        // One byte past the limit is enough to tell an oversized response apart
        let mut response_buf: Vec<u8> = Vec::with_capacity(512);
        (&mut self.reader)
            .take(MAX_MESSAGE_SIZE as u64 + 1)
            .read_until(b'\n', &mut response_buf)?;

        if response_buf.is_empty() {
            return Err(AdaptiveMipiError::DaemonConnection(
                "Daemon closed connection".to_string(),
            ));
        }
        if response_buf.len() > MAX_MESSAGE_SIZE {
            return Err(AdaptiveMipiError::MessageTooLarge {
                size: response_buf.len(),
                max_size: MAX_MESSAGE_SIZE,
            });
        }
        if response_buf.last() == Some(&b'\n') {
            response_buf.pop();
        }

        let response_envelope: ResponseEnvelope = serde_json::from_slice(&response_buf)?;
        if response_envelope.id != request_id {
            return Err(AdaptiveMipiError::IpcProtocol(format!(
                "Response ID mismatch: expected {}, got {}",
                request_id, response_envelope.id
            )));
        }

        verify_response_type(&req, &response_envelope.response)?;
        Ok(response_envelope.response)
    }

    /// Like `request`, but turns an error response into `Err`
    pub fn request_data(&mut self, req: Request) -> Result<ResponseData> {
        match self.request(req)? {
            Response::Ok(data) => Ok(data),
            Response::Error { message } => Err(AdaptiveMipiError::DaemonRequest(message)),
        }
    }
}

/// Check that an `Ok` response carries the field the request asks for
fn verify_response_type(req: &Request, resp: &Response) -> Result<()> {
    let Response::Ok(data) = resp else {
        return Ok(());
    };

    let valid = match req {
        Request::Ping | Request::Version | Request::GetClockLabel { .. } => data.value.is_some(),
        Request::Notify { .. } | Request::NotifyFrame { .. } => data.handled.is_some(),
        Request::Classify { .. } => data.camera_type.is_some(),
        Request::InitMode { .. } | Request::UpdateMode { .. } | Request::ApplyClock { .. } => {
            data.selection.is_some()
        }
        Request::GetRfInfo => data.rf_info.is_some(),
        Request::GetOverride | Request::SetOverride { .. } => data.override_mode.is_some(),
    };

    if !valid {
        return Err(AdaptiveMipiError::IpcProtocol(format!(
            "Response type mismatch: got {:?} for request {:?}",
            data, req
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_protocol::SelectionInfo;

    #[test]
    fn test_error_response_is_always_valid() {
        let resp = Response::error("nope");
        assert!(verify_response_type(&Request::GetRfInfo, &resp).is_ok());
    }

    #[test]
    fn test_missing_field_is_mismatch() {
        let resp = Response::ok_string("pong");
        assert!(verify_response_type(&Request::Ping, &resp).is_ok());
        assert!(verify_response_type(&Request::GetRfInfo, &resp).is_err());
        assert!(verify_response_type(&Request::UpdateMode { slot: 0 }, &resp).is_err());
    }

    #[test]
    fn test_selection_response_matches() {
        let resp = Response::Ok(ResponseData::selection(SelectionInfo {
            slot: 0,
            sensor_id: 0x08E3,
            camera_type: "WIDE".into(),
            mode: "A".into(),
            current_index: None,
            new_index: Some(1),
            label: None,
        }));
        assert!(verify_response_type(&Request::ApplyClock { slot: 0 }, &resp).is_ok());
    }

    #[test]
    fn test_oversized_response_is_cut_off() {
        use std::os::unix::net::UnixListener;
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("am.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut request = String::new();
            BufReader::new(stream.try_clone().unwrap()).read_line(&mut request).unwrap();
            // No newline, and more than the client may buffer
            let _ = (&stream).write_all(&vec![b'x'; MAX_MESSAGE_SIZE * 4]);
        });

        let mut client = DaemonClient::connect(&path).unwrap();
        let err = client.request(Request::Ping).unwrap_err();
        assert!(matches!(
            err,
            AdaptiveMipiError::MessageTooLarge { size, max_size: MAX_MESSAGE_SIZE }
                if size == MAX_MESSAGE_SIZE + 1
        ));

        drop(client);
        server.join().unwrap();
    }

    #[test]
    fn test_connect_to_missing_socket_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = DaemonClient::connect(&dir.path().join("absent.sock")).err().unwrap();
        assert!(matches!(err, AdaptiveMipiError::DaemonConnection(_)));
    }
}
