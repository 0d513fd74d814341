use std::fmt;

/// Stats from an expiry sweep.
#[derive(Debug, Default)]
pub struct SweepStats {
    pub contracts_scanned: u64,
    pub flagged: u64,
    pub warnings_sent: u64,
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contracts_scanned={} flagged={} warnings_sent={}",
            self.contracts_scanned, self.flagged, self.warnings_sent
        )
    }
}
