/// One cancelable one-shot deadline. Each trial runner owns exactly one;
/// the driver reads `deadline()` to know how far to advance the clock and
/// delivers a timer event once it is due.
///
/// Cancelling an armed slot has no residual effect: a cancelled wait never
/// fires and therefore never advances a trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<u64>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the slot `delay_ms` from `now_ms`. Re-arming replaces
    /// any pending deadline.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Consume the deadline if it is due. Returns `true` at most once per
    /// arming; spurious timer deliveries are ignored.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
