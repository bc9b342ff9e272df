//! Transport for telemetry events

use std::time::Duration;

use tracing::debug;

use super::TelemetryEvent;

/// Upper bound for a single telemetry request
pub const SEND_TIMEOUT: Duration = Duration::from_secs(3);

/// Delivers an event to an events URL
pub trait TelemetrySink {
    /// Send `event`; the error is a human-readable reason, only ever logged
    fn send(&self, url: &str, event: &TelemetryEvent) -> Result<(), String>;
}

/// Blocking HTTP sink with a short timeout
pub struct HttpSink {
    client: Option<reqwest::blocking::Client>,
}

impl HttpSink {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| debug!("Telemetry client unavailable: {}", e))
            .ok();
        Self { client }
    }
}

impl Default for HttpSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for HttpSink {
    fn send(&self, url: &str, event: &TelemetryEvent) -> Result<(), String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| "no HTTP client".to_string())?;

        let response = client
            .post(url)
            .json(event)
            .send()
            .map_err(|e| e.to_string())?;

        response.error_for_status().map_err(|e| e.to_string())?;
        debug!(event = %event.event_name, "Telemetry sent");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingSink;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    fn event() -> TelemetryEvent {
        TelemetryEvent {
            event_name: "installer_generated".to_string(),
            install_id: "install".to_string(),
            session_id: "session".to_string(),
            source: "dashboard".to_string(),
            tool_ids: vec!["remedy".to_string()],
            mode: Mode::Saga,
            manifest_ref: "main".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    /// Accept one request and hand back (request line, content type, body)
    fn capture_one(status_line: &'static str) -> (String, mpsc::Receiver<(String, String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else { return };
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_type = String::new();
            let mut length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let trimmed = line.trim_end();
                if trimmed.is_empty() {
                    break;
                }
                let lower = trimmed.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    length = v.trim().parse().unwrap();
                }
                if let Some(v) = lower.strip_prefix("content-type:") {
                    content_type = v.trim().to_string();
                }
            }
            let mut body = vec![0u8; length];
            reader.read_exact(&mut body).unwrap();
            let mut stream = reader.into_inner();
            let _ = stream.write_all(
                format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").as_bytes(),
            );
            let _ = tx.send((
                request_line.trim_end().to_string(),
                content_type,
                String::from_utf8(body).unwrap(),
            ));
        });
        (format!("http://{addr}/v1/events"), rx)
    }

    #[test]
    fn test_http_sink_posts_json() {
        let (url, rx) = capture_one("HTTP/1.1 202 Accepted");
        HttpSink::new().send(&url, &event()).unwrap();

        let (request_line, content_type, body) = rx.recv().unwrap();
        assert_eq!(request_line, "POST /v1/events HTTP/1.1");
        assert_eq!(content_type, "application/json");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["eventName"], "installer_generated");
        assert_eq!(json["source"], "dashboard");
    }

    #[test]
    fn test_http_sink_reports_non_success() {
        let (url, _rx) = capture_one("HTTP/1.1 500 Internal Server Error");
        assert!(HttpSink::new().send(&url, &event()).is_err());
    }

    #[test]
    fn test_http_sink_reports_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{addr}/v1/events");
        assert!(HttpSink::new().send(&url, &event()).is_err());
    }
}
