//! The built-in TCP transport.
//!
//! Serves HTTP/1.1 over the standard library's TCP listener with a fixed
//! worker pool: connections are accepted on the main thread and handed to
//! workers, each of which reads requests, runs them through
//! [`App::handle`] and writes the response back, honouring keep-alive.
//! Requests carrying a WebSocket upgrade for a registered WS route are
//! handed off to the frame loop instead.

use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::{Shutdown, SocketAddr, TcpListener, TcpStream},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

use crate::{
    app::App,
    error::{Error, ParseError, Result},
    http::{headers::Headers, request::HttpRequest, response::HttpResponse, status::Status},
    internal::{
        http::{parse_header_line, parse_request_line},
        thread_pool::ThreadPool,
    },
    transport::Transport,
    ws::{accept_key, opcode, Frame, PeerSession, WsConnection, WsMessage},
};

/// The default transport: plain TCP, HTTP/1.1, WebSocket upgrades.
pub struct TcpTransport;

impl Transport for TcpTransport {
    fn run(&self, app: Arc<App>, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)?;
        let pool = ThreadPool::new(app.config.workers);

        loop {
            match listener.accept() {
                Ok((stream, _)) => {
                    let app = app.clone();
                    pool.execute(move || handle_connection(stream, app));
                }
                Err(err) => {
                    trace!(Level::Error, "Error accepting connection: {err}");
                }
            }
        }
    }
}

/// Serve one connection until it closes, upgrades, or stops keeping alive.
fn handle_connection(stream: TcpStream, app: Arc<App>) {
    trace!(Level::Debug, "Opening socket {:?}", stream.peer_addr());
    let _ = stream.set_read_timeout(app.config.socket_timeout);
    let _ = stream.set_write_timeout(app.config.socket_timeout);

    let mut reader = match stream.try_clone() {
        Ok(clone) => BufReader::new(clone),
        Err(_) => return,
    };
    let mut stream = stream;

    loop {
        let req = match read_request(&mut reader) {
            Ok(Some(req)) => req,
            // Clean end of stream between requests.
            Ok(None) => break,
            Err(Error::Parse(err)) => {
                trace!(Level::Debug, "Malformed request: {err}");
                let res = HttpResponse::new().status(Status::BadRequest).text("Bad Request");
                let _ = write_response(&mut stream, &res);
                break;
            }
            Err(err) => {
                // The client is gone (or timed out); nobody to answer.
                trace!(Level::Debug, "Read error: {err}");
                break;
            }
        };

        if is_upgrade_request(&req) && app.has_ws_route(&req.path) {
            drive_websocket(stream, reader, &app, req);
            return;
        }

        let keep_alive = req
            .header("Connection")
            .map(|c| !c.eq_ignore_ascii_case("close"))
            .unwrap_or(true);

        let res = app.handle(req);
        if write_response(&mut stream, &res).is_err() {
            break;
        }

        if !keep_alive || !app.config.keep_alive {
            break;
        }
    }

    trace!(Level::Debug, "Closing socket");
    let _ = stream.shutdown(Shutdown::Both);
}

/// Read one request off the wire.
/// Returns `Ok(None)` on a clean end of stream before a request line.
fn read_request(reader: &mut BufReader<TcpStream>) -> Result<Option<HttpRequest>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let request_line = line.trim_end();
    if request_line.is_empty() {
        return Err(ParseError::NoRequestLine.into());
    }
    let (method, url) = parse_request_line(request_line)?;

    let mut headers = Headers::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::ErrorKind::UnexpectedEof.into()));
        }

        let header_line = line.trim_end();
        if header_line.is_empty() {
            break;
        }
        headers.push(parse_header_line(header_line)?);
    }

    let content_length = headers
        .get("Content-Length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    Ok(Some(HttpRequest::new(method, url, headers, body)))
}

/// Emit `status line + headers + body`, adding a Content-Length if the app
/// did not set one.
fn write_response(stream: &mut TcpStream, res: &HttpResponse) -> io::Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        res.status.code(),
        res.status.reason_phrase()
    );

    for header in res.headers.iter() {
        head.push_str(&header.to_string());
        head.push_str("\r\n");
    }

    if !res.headers.has("Content-Length") && res.status != Status::SwitchingProtocols {
        head.push_str(&format!("Content-Length: {}\r\n", res.body.len()));
    }
    head.push_str("\r\n");

    stream.write_all(head.as_bytes())?;
    stream.write_all(&res.body)?;
    stream.flush()
}

/// Whether the request asks for a WebSocket upgrade.
fn is_upgrade_request(req: &HttpRequest) -> bool {
    let connection = req.header("Connection").unwrap_or_default();
    let upgrade = req.header("Upgrade").unwrap_or_default();

    connection
        .split(',')
        .any(|t| t.trim().eq_ignore_ascii_case("upgrade"))
        && upgrade.eq_ignore_ascii_case("websocket")
}

/// The send/close half of an upgraded connection, shared between the hub and
/// the frame loop.
struct TcpWsConnection {
    stream: Mutex<TcpStream>,
    open: AtomicBool,
}

impl TcpWsConnection {
    /// Best-effort frame write; errors are logged and swallowed.
    fn write_frame(&self, frame: Frame) {
        if !self.open.load(Ordering::Relaxed) {
            return;
        }

        let mut stream = self.stream.lock();
        if let Err(err) = frame.write(&mut *stream) {
            trace!(Level::Debug, "[WS] Write error: {err}");
        }
    }
}

impl WsConnection for TcpWsConnection {
    fn send(&self, msg: WsMessage) {
        match msg {
            WsMessage::Text(text) => self.write_frame(Frame::text(text)),
            WsMessage::Binary(data) => self.write_frame(Frame::binary(data)),
        }
    }

    fn close(&self) {
        if self.open.swap(false, Ordering::Relaxed) {
            let mut stream = self.stream.lock();
            let _ = Frame::close().write(&mut *stream);
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

/// Complete the handshake and pump frames until the connection ends.
fn drive_websocket(
    stream: TcpStream,
    mut reader: BufReader<TcpStream>,
    app: &App,
    req: HttpRequest,
) {
    let mut stream = stream;
    let Some(key) = req.header("Sec-WebSocket-Key") else {
        let res = HttpResponse::new()
            .status(Status::BadRequest)
            .text("Missing Sec-WebSocket-Key header");
        let _ = write_response(&mut stream, &res);
        return;
    };

    let accept = accept_key(key);
    trace!(Level::Debug, "[WS] Accept: {}", accept);

    let upgrade = HttpResponse::new()
        .status(Status::SwitchingProtocols)
        .header("Upgrade", "websocket")
        .header("Connection", "Upgrade")
        .header("Sec-WebSocket-Accept", &accept)
        .header("Sec-WebSocket-Version", "13");
    if write_response(&mut stream, &upgrade).is_err() {
        return;
    }

    let conn = Arc::new(TcpWsConnection {
        stream: Mutex::new(stream),
        open: AtomicBool::new(true),
    });
    let Some(session) = app.upgrade(&req.path, conn.clone()) else {
        conn.close();
        return;
    };

    // (opcode, accumulated payload) of an unfinished fragmented message.
    let mut fragments: Option<(u8, Vec<u8>)> = None;
    loop {
        let frame = match Frame::read(&mut reader) {
            Ok(frame) => frame,
            Err(err) => {
                trace!(Level::Debug, "[WS] Read error: {err}");
                break;
            }
        };

        match frame.opcode {
            opcode::CONTINUATION => {
                if let Some((op, mut payload)) = fragments.take() {
                    payload.extend_from_slice(&frame.payload);
                    if frame.fin {
                        deliver(&session, op, payload);
                    } else {
                        fragments = Some((op, payload));
                    }
                }
            }
            op @ (opcode::TEXT | opcode::BINARY) => {
                if frame.fin {
                    deliver(&session, op, frame.payload);
                } else {
                    fragments = Some((op, frame.payload));
                }
            }
            opcode::PING => conn.write_frame(Frame::pong(frame.payload)),
            opcode::CLOSE => {
                conn.close();
                break;
            }
            _ => {}
        }
    }

    session.close();
    conn.close();
}

/// Hand a complete message to the session.
fn deliver(session: &PeerSession, op: u8, payload: Vec<u8>) {
    match op {
        opcode::TEXT => session.message(WsMessage::Text(
            String::from_utf8_lossy(&payload).to_string(),
        )),
        _ => session.message(WsMessage::Binary(payload)),
    }
}
