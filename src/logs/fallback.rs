// ABOUTME: Canned log output served when the container runtime is unreachable.
// ABOUTME: Models a healthy web service booting and answering requests.

use super::entry::{LogEntry, LogStream};

/// Seconds between the newest demo record and "now".
const NEWEST_AGE: i64 = 3600;

/// (seconds before the newest record, stream, message)
const DEMO_LINES: &[(i64, LogStream, &str)] = &[
    (1800, LogStream::Stdout, "Starting application server..."),
    (1750, LogStream::Stdout, "Database connection established"),
    (1700, LogStream::Stdout, "Redis cache initialized"),
    (1650, LogStream::Stdout, "Server listening on port 8080"),
    (1600, LogStream::Stdout, "Application started successfully"),
    (1200, LogStream::Stdout, "[INFO] Request received: GET /api/health"),
    (1195, LogStream::Stdout, "[INFO] Response sent: 200 OK"),
    (900, LogStream::Stdout, "[INFO] Request received: GET /api/users"),
    (
        895,
        LogStream::Stderr,
        "[WARN] Slow query detected: SELECT * FROM users (2.5s)",
    ),
    (890, LogStream::Stdout, "[INFO] Response sent: 200 OK"),
    (600, LogStream::Stdout, "[INFO] Request received: POST /api/auth/login"),
    (595, LogStream::Stdout, "[INFO] User authenticated successfully"),
    (590, LogStream::Stdout, "[INFO] Response sent: 200 OK"),
    (300, LogStream::Stdout, "[INFO] Request received: GET /api/data"),
    (295, LogStream::Stdout, "[INFO] Response sent: 200 OK"),
    (60, LogStream::Stdout, "[INFO] Health check passed"),
    (0, LogStream::Stdout, "[INFO] Server running normally"),
];

/// Demo log records relative to `now` (epoch seconds), oldest first.
pub fn demo_logs(now: i64) -> Vec<LogEntry> {
    let newest = now - NEWEST_AGE;
    DEMO_LINES
        .iter()
        .map(|&(age, stream, message)| LogEntry::new(newest - age, stream, message))
        .collect()
}
