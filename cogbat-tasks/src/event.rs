/// Participant input delivered to a runner. Each task family listens for a
/// subset and ignores the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Start button: confirms instructions or the practice-to-main handoff.
    Continue,
    /// Left arrow key (flanker).
    Left,
    /// Right arrow key (flanker).
    Right,
    /// Spacebar (reaction time, go/no-go).
    Press,
    /// Click on one of the memory blocks (corsi).
    Block(u8),
    /// Click on a labeled circle (trail making), 1-based label.
    Target(u8),
    /// Replay the sequence during recall (corsi); never scored.
    Replay,
}
