use chrono::{DateTime, Duration, Local, TimeZone};

/// Daily refresh timer, phase-locked to local midnight.
///
/// Two phases: the first deadline is the next local midnight (alignment),
/// every deadline after that is 24 hours past the previous one (repeat), so
/// the refresh stays aligned to midnight no matter when the app started.
/// The loop polls it instead of holding an OS timer, so there is no handle
/// to dispose; dropping the app stops it.
pub struct MidnightTimer {
    deadline: DateTime<Local>,
}

impl MidnightTimer {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self {
            deadline: next_midnight(now),
        }
    }

    /// True when a deadline has passed since the last poll. Re-arms 24 hours
    /// from the missed deadline, not from `now`, so the phase never drifts;
    /// sleeping through several days still yields a single fire.
    pub fn poll(&mut self, now: DateTime<Local>) -> bool {
        if now < self.deadline {
            return false;
        }
        while self.deadline <= now {
            self.deadline = self.deadline + Duration::hours(24);
        }
        true
    }

    #[cfg(test)]
    fn deadline(&self) -> DateTime<Local> {
        self.deadline
    }
}

fn next_midnight(now: DateTime<Local>) -> DateTime<Local> {
    let tomorrow = now
        .date_naive()
        .succ_opt()
        .expect("date within chrono range")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");
    // A DST transition can make local midnight ambiguous or skipped.
    Local
        .from_local_datetime(&tomorrow)
        .earliest()
        .unwrap_or_else(|| now + Duration::hours(24))
}
