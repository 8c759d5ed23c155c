//! Per-task timing and trial-count parameters.
//!
//! Defaults reproduce the deployed battery; tests shrink the counts.

#[derive(Debug, Clone)]
pub struct FlankerConfig {
    pub practice_trials: u32,
    pub main_trials: u32,
    /// Stimulus exposure; no response inside it scores as a miss.
    pub response_window_ms: u64,
    pub feedback_practice_ms: u64,
    pub feedback_main_ms: u64,
    pub inter_trial_ms: u64,
}

impl Default for FlankerConfig {
    fn default() -> Self {
        Self {
            practice_trials: 10,
            main_trials: 80,
            response_window_ms: 2000,
            feedback_practice_ms: 1000,
            feedback_main_ms: 500,
            inter_trial_ms: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReactionConfig {
    /// Valid (non-false-start) trials required to finish.
    pub valid_trials: u32,
    /// Randomized wait before the go-signal, inclusive bounds.
    pub wait_range_ms: (u64, u64),
    pub false_start_pause_ms: u64,
    pub post_response_pause_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            valid_trials: 50,
            wait_range_ms: (1000, 4000),
            false_start_pause_ms: 1500,
            post_response_pause_ms: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrailsConfig {
    pub targets: u8,
    pub board_width: f32,
    pub board_height: f32,
    pub margin: f32,
    /// Minimum center distance between placed targets.
    pub min_spacing: f32,
    /// Placement attempts per target before the spacing rule is waived.
    pub max_attempts: u32,
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            targets: 10,
            board_width: 800.0,
            board_height: 600.0,
            margin: 50.0,
            min_spacing: 60.0,
            max_attempts: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsiConfig {
    pub blocks: u8,
    pub start_length: u32,
    pub max_length: u32,
    /// Attempts at each length; all must be correct to advance.
    pub trials_per_length: u32,
    pub lead_in_ms: u64,
    pub block_on_ms: u64,
    pub block_off_ms: u64,
    pub score_pause_ms: u64,
    pub between_trials_ms: u64,
}

impl Default for CorsiConfig {
    fn default() -> Self {
        Self {
            blocks: 9,
            start_length: 3,
            max_length: 9,
            trials_per_length: 2,
            lead_in_ms: 1000,
            block_on_ms: 600,
            block_off_ms: 400,
            score_pause_ms: 1500,
            between_trials_ms: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoNogoConfig {
    pub practice_trials: u32,
    pub main_trials: u32,
    /// Share of no-go stimuli in the scored sequence.
    pub nogo_ratio: f64,
    /// Stimulus visibility; responses are only accepted inside it.
    pub stimulus_ms: u64,
    /// Silent tail after the stimulus hides; the trial resolves at its end.
    pub response_tail_ms: u64,
    pub inter_trial_ms: u64,
}

impl Default for GoNogoConfig {
    fn default() -> Self {
        Self {
            practice_trials: 20,
            main_trials: 50,
            nogo_ratio: 0.25,
            stimulus_ms: 1000,
            response_tail_ms: 500,
            inter_trial_ms: 1500,
        }
    }
}
