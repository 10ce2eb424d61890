use std::time::{Duration, Instant};

/// Minimum spacing between repeated warnings of the same kind.
pub const LOG_THROTTLE: Duration = Duration::from_secs(2);

/// A timestamp that lets the next throttled log through immediately.
pub fn primed() -> Instant {
    Instant::now() - LOG_THROTTLE
}

pub fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_logged_recently_then_next_log_is_suppressed() {
        let mut last = primed();
        assert!(should_log(&mut last));
        assert!(!should_log(&mut last));
    }
}
