//! Timed waits with an optional live countdown on stderr.

use std::io::Write;
use std::time::Duration;

use colored::{Color, Colorize};
use tokio::time::{sleep, Instant};

/// Wait `duration`, rendering the seconds left when `show` is set.
///
/// Sub-second waits never render.
pub async fn countdown(duration: Duration, message: &str, color: Color, show: bool) {
    if !show || duration < Duration::from_secs(1) {
        sleep(duration).await;
        return;
    }

    let deadline = Instant::now() + duration;
    let mut stderr = std::io::stderr();
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let remaining = deadline - now;
        let _ = write!(
            stderr,
            "\r{} {}",
            message.color(color).bold(),
            format_remaining(remaining).color(color)
        );
        let _ = stderr.flush();
        sleep(remaining.min(Duration::from_secs(1))).await;
    }
    let _ = write!(stderr, "\r\x1b[2K");
    let _ = stderr.flush();
}

/// `mm:ss` rendering, rounding partial seconds up.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
