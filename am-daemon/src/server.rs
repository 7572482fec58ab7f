//! Unix Socket Server
//!
//! JSON-lines request/response server for camera HALs, the modem bridge and
//! `amctl`. Each connection sends one `RequestEnvelope` per line and gets one
//! `ResponseEnvelope` line back.
//!
//! # Limits
//! - **Connections**: at most `MAX_CONNECTIONS` concurrent clients
//! - **Messages**: lines longer than `MAX_MESSAGE_SIZE` are rejected before buffering
//! - **Timeouts**: per-message read and write timeouts
//! - **Audit**: peer uid/pid logged for every connection

use std::collections::HashMap;
use std::future::Future;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, error, info, trace, warn};

use am_core::{classify, AdaptiveMipi, AdaptiveMipiError, NotifyResult, SensorControl};
use am_protocol::{
    parse_hex, Request, RequestEnvelope, Response, ResponseData, ResponseEnvelope,
    RilBridgeMessage, SelectionInfo,
};

// ============================================================================
// Limits
// ============================================================================

/// Maximum concurrent client connections
const MAX_CONNECTIONS: usize = 32;

/// Maximum message size in bytes
const MAX_MESSAGE_SIZE: usize = am_protocol::MAX_MESSAGE_SIZE;

/// Read timeout per message
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Write timeout per message
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Socket permissions (owner and group: camera HAL and RIL run in the same group)
const SOCKET_MODE: u32 = 0o660;

static ACTIVE_CONNECTIONS: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// Shared State
// ============================================================================

/// Everything request handlers touch
pub struct ServerState {
    mipi: Arc<AdaptiveMipi>,
    /// Sensor selection contexts keyed by HAL slot
    slots: Mutex<HashMap<u32, SensorControl>>,
}

impl ServerState {
    pub fn new(mipi: Arc<AdaptiveMipi>) -> Self {
        Self {
            mipi,
            slots: Mutex::new(HashMap::new()),
        }
    }
}

async fn read_line_bounded<R: tokio::io::AsyncBufRead + Unpin>(
    reader: &mut R,
    out: &mut Vec<u8>,
    max_len: usize,
) -> std::io::Result<usize> {
    out.clear();

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(0);
        }

        let (take_len, found_newline) = match available.iter().position(|b| *b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };

        let remaining = max_len.saturating_sub(out.len());
        if take_len > remaining {
            let consume_len = remaining.min(available.len());
            reader.consume(consume_len);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                AdaptiveMipiError::MessageTooLarge {
                    size: out.len() + take_len,
                    max_size: max_len,
                },
            ));
        }

        out.extend_from_slice(&available[..take_len]);
        reader.consume(take_len);

        if found_newline {
            return Ok(out.len());
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// Serve `socket_path` until `shutdown` resolves
pub async fn run_server<F>(
    socket_path: &str,
    state: Arc<ServerState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let path = Path::new(socket_path);

    // Only replace a stale socket, never follow a symlink
    if path.exists() {
        let metadata = path.symlink_metadata()?;
        if metadata.file_type().is_symlink() {
            anyhow::bail!("Socket path {} is a symlink, refusing to remove it", socket_path);
        }
        std::fs::remove_file(path)?;
        debug!("Removed existing socket file");
    }

    let listener = UnixListener::bind(socket_path)?;
    std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(SOCKET_MODE))?;

    info!("Listening on {} (mode {:o})", socket_path, SOCKET_MODE);
    info!("Limits: max_conn={}, max_msg={}", MAX_CONNECTIONS, MAX_MESSAGE_SIZE);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let current = ACTIVE_CONNECTIONS.load(Ordering::SeqCst);
                        if current >= MAX_CONNECTIONS {
                            warn!("Connection limit reached ({}), rejecting new connection", current);
                            drop(stream);
                            continue;
                        }

                        ACTIVE_CONNECTIONS.fetch_add(1, Ordering::SeqCst);
                        let state = state.clone();
                        tokio::spawn(async move {
                            handle_client(stream, state).await;
                            ACTIVE_CONNECTIONS.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                    Err(e) => {
                        error!("Accept error: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let _ = std::fs::remove_file(socket_path);
    info!("Server stopped");

    Ok(())
}

/// Peer identity for audit logging
#[derive(Debug, Clone, Copy, Default)]
struct PeerCredentials {
    uid: u32,
    pid: i32,
}

#[cfg(target_os = "linux")]
fn get_peer_credentials(stream: &UnixStream) -> Option<PeerCredentials> {
    use std::os::unix::io::AsRawFd;

    let fd = stream.as_raw_fd();
    // SAFETY: ucred is plain data; zeroed is a valid value.
    let mut cred: libc::ucred = unsafe { std::mem::zeroed() };
    let mut len = std::mem::size_of::<libc::ucred>() as libc::socklen_t;

    // SAFETY: fd is a live socket owned by `stream`, cred and len describe a
    // correctly sized buffer.
    let result = unsafe {
        libc::getsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_PEERCRED,
            &mut cred as *mut _ as *mut libc::c_void,
            &mut len,
        )
    };

    (result == 0).then_some(PeerCredentials {
        uid: cred.uid,
        pid: cred.pid,
    })
}

#[cfg(not(target_os = "linux"))]
fn get_peer_credentials(_stream: &UnixStream) -> Option<PeerCredentials> {
    None
}

async fn handle_client(stream: UnixStream, state: Arc<ServerState>) {
    let cred = get_peer_credentials(&stream).unwrap_or_default();
    debug!("Connection from uid={}, pid={}", cred.uid, cred.pid);

    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line: Vec<u8> = Vec::with_capacity(MAX_MESSAGE_SIZE);
    let mut request_count: u64 = 0;
    let connection_start = Instant::now();

    loop {
        let read_result = timeout(
            READ_TIMEOUT,
            read_line_bounded(&mut reader, &mut line, MAX_MESSAGE_SIZE),
        )
        .await;

        match read_result {
            Ok(Ok(0)) => {
                debug!(
                    "Client disconnected: uid={}, pid={}, requests={}, duration={:?}",
                    cred.uid,
                    cred.pid,
                    request_count,
                    connection_start.elapsed()
                );
                break;
            }
            Ok(Ok(n)) => {
                request_count += 1;
                trace!("Request #{} from uid={}: {} bytes", request_count, cred.uid, n);

                let line_str = match std::str::from_utf8(&line) {
                    Ok(s) => s,
                    Err(e) => {
                        debug!("Non-UTF8 request from uid={}: {}", cred.uid, e);
                        let envelope =
                            ResponseEnvelope::new(0, Response::error("Invalid request encoding"));
                        let _ = send_response(&mut writer, &envelope).await;
                        break;
                    }
                };

                let envelope = process_request(line_str, &state).await;
                if send_response(&mut writer, &envelope).await.is_err() {
                    break;
                }
            }
            Ok(Err(e)) => {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    warn!(
                        "Message too large (>{} bytes) from uid={}, pid={}",
                        MAX_MESSAGE_SIZE, cred.uid, cred.pid
                    );
                    let envelope = ResponseEnvelope::new(0, Response::error("Message too large"));
                    let _ = send_response(&mut writer, &envelope).await;
                } else {
                    error!("Read error from uid={}, pid={}: {}", cred.uid, cred.pid, e);
                }
                break;
            }
            Err(_) => {
                debug!("Read timeout for uid={}, pid={}", cred.uid, cred.pid);
                let envelope = ResponseEnvelope::new(0, Response::error("Read timeout"));
                let _ = send_response(&mut writer, &envelope).await;
                break;
            }
        }
    }
}

/// Send response with timeout
async fn send_response(
    writer: &mut tokio::net::unix::OwnedWriteHalf,
    envelope: &ResponseEnvelope,
) -> Result<(), ()> {
    let response_json = serde_json::to_string(envelope).unwrap_or_else(|_| {
        r#"{"id":0,"status":"error","message":"Serialization error"}"#.to_string()
    });

    let write_result = timeout(WRITE_TIMEOUT, async {
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        Ok::<_, std::io::Error>(())
    })
    .await;

    match write_result {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            error!("Write error: {}", e);
            Err(())
        }
        Err(_) => {
            error!("Write timeout");
            Err(())
        }
    }
}

// ============================================================================
// Request Handling
// ============================================================================

/// Parse, validate and execute one request line
async fn process_request(line: &str, state: &ServerState) -> ResponseEnvelope {
    let envelope: RequestEnvelope = match serde_json::from_str(line.trim()) {
        Ok(e) => e,
        Err(e) => {
            debug!("Invalid JSON: {}", e);
            return ResponseEnvelope::new(0, Response::error("Invalid request format"));
        }
    };

    let request_id = envelope.id;
    let request = envelope.request;

    if let Err(e) = request.validate() {
        warn!("Request validation failed: {}", e);
        return ResponseEnvelope::new(request_id, Response::error(e));
    }

    let response = match request {
        Request::Ping => Response::ok_string("pong"),
        Request::Version => Response::ok_string(env!("CARGO_PKG_VERSION")),
        Request::Notify { dev_id, data } => {
            let msg = RilBridgeMessage::new(dev_id, &data);
            handled(state.mipi.deliver(&msg))
        }
        Request::NotifyFrame { hex } => notify_frame(state, &hex),
        Request::Classify { sensor_id } => {
            Response::Ok(ResponseData::camera(classify(sensor_id).name().to_string()))
        }
        Request::InitMode { slot, sensor_id, mode } => {
            init_mode(state, slot, sensor_id, mode).await
        }
        Request::UpdateMode { slot } => update_mode(state, slot).await,
        Request::GetClockLabel { slot } => get_clock_label(state, slot).await,
        Request::ApplyClock { slot } => apply_clock(state, slot).await,
        Request::GetRfInfo => {
            Response::Ok(ResponseData::rf(state.mipi.selector().get_rf_info()))
        }
        Request::GetOverride => Response::Ok(ResponseData::override_mode(
            state.mipi.params().adaptive_mipi_mode(),
        )),
        Request::SetOverride { value } => match state.mipi.params().set_adaptive_mipi_mode(value) {
            Ok(()) => {
                info!("adaptive_mipi_mode set to {}", value);
                Response::Ok(ResponseData::override_mode(value))
            }
            Err(e) => Response::error(e.to_string()),
        },
    };

    ResponseEnvelope::new(request_id, response)
}

fn handled(result: NotifyResult) -> Response {
    Response::Ok(ResponseData::handled(result != NotifyResult::Done))
}

fn notify_frame(state: &ServerState, hex: &str) -> Response {
    let result = parse_hex(hex).and_then(|bytes| state.mipi.deliver_frame(&bytes));
    match result {
        Ok(result) => handled(result),
        Err(e) => {
            debug!("Rejected frame: {}", e);
            Response::error(e.to_string())
        }
    }
}

fn selection_info(state: &ServerState, slot: u32, ctrl: &SensorControl) -> SelectionInfo {
    SelectionInfo {
        slot,
        sensor_id: ctrl.sensor_id,
        camera_type: ctrl.camera_type().name().to_string(),
        mode: ctrl.mode_slot().name().to_string(),
        current_index: ctrl.current_index().get(),
        new_index: ctrl.new_index().get(),
        label: state
            .mipi
            .selector()
            .get_clock_label(ctrl)
            .ok()
            .map(str::to_string),
    }
}

async fn init_mode(state: &ServerState, slot: u32, sensor_id: u16, mode: u32) -> Response {
    let mut slots = state.slots.lock().await;
    let ctrl = slots
        .entry(slot)
        .or_insert_with(|| SensorControl::new(sensor_id, mode));
    ctrl.sensor_id = sensor_id;
    ctrl.sensor_mode = mode;

    state.mipi.selector().init_mode(ctrl);
    Response::Ok(ResponseData::selection(selection_info(state, slot, ctrl)))
}

async fn update_mode(state: &ServerState, slot: u32) -> Response {
    let mut slots = state.slots.lock().await;
    match slots.get_mut(&slot) {
        Some(ctrl) => {
            state.mipi.selector().update_mode(ctrl);
            Response::Ok(ResponseData::selection(selection_info(state, slot, ctrl)))
        }
        None => Response::error(AdaptiveMipiError::UnknownSlot(slot).to_string()),
    }
}

async fn get_clock_label(state: &ServerState, slot: u32) -> Response {
    let slots = state.slots.lock().await;
    let Some(ctrl) = slots.get(&slot) else {
        return Response::error(AdaptiveMipiError::UnknownSlot(slot).to_string());
    };

    match state.mipi.selector().get_clock_label(ctrl) {
        Ok(label) => Response::ok_string(label),
        Err(e) => Response::error(e.to_string()),
    }
}

async fn apply_clock(state: &ServerState, slot: u32) -> Response {
    let mut slots = state.slots.lock().await;
    match slots.get_mut(&slot) {
        Some(ctrl) => {
            if let Some(index) = ctrl.mark_applied() {
                info!("slot {} applied mipi clock index {}", slot, index);
            }
            Response::Ok(ResponseData::selection(selection_info(state, slot, ctrl)))
        }
        None => Response::error(AdaptiveMipiError::UnknownSlot(slot).to_string()),
    }
}
