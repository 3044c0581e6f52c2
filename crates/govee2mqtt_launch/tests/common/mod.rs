//! Test helpers for launch sequence integration tests

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Minimal HTTP server standing in for the Supervisor API.
///
/// Serves the canned responses in order, repeating the last one once the list
/// is exhausted, and records the head of every request it receives.
pub struct FakeSupervisor {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeSupervisor {
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        assert!(!responses.is_empty(), "at least one response is required");

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            for (index, stream) in listener.incoming().enumerate() {
                let Ok(mut stream) = stream else { break };
                let head = read_request_head(&mut stream);
                log.lock().unwrap().push(head);

                let (status, body) = &responses[index.min(responses.len() - 1)];
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(*status),
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request heads received so far, lowercased
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request_head(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => head.push_str(&line),
        }
    }
    head.to_lowercase()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    }
}

/// Supervisor body announcing an MQTT service at the given port
pub fn mqtt_service_body(port: u16) -> String {
    format!(
        concat!(
            r#"{{"result":"ok","data":{{"addon":"core_mosquitto","host":"127.0.0.1","#,
            r#""port":{},"ssl":false,"protocol":"3.1.1","#,
            r#""username":"addons","password":"broker-pass"}}}}"#
        ),
        port
    )
}

/// Supervisor body for a service nobody provides
pub fn no_service_body() -> String {
    r#"{"result":"error","message":"No mqtt service available","data":{}}"#.to_string()
}

/// A port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
