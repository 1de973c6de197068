use crate::constants::REBUILD_DEBOUNCE_SEC;

/// Reverb effect configuration. Last write wins within the debounce window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReverbParams {
    /// RT60 tail length in seconds (1..=30).
    pub decay: f64,
    /// Seconds of silence before the tail (0..=1).
    pub pre_delay: f64,
    /// Wet return level (0..=1).
    pub wet: f64,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            decay: 30.0,
            pre_delay: 0.1,
            wet: 1.0,
        }
    }
}

/// Partial parameter change coming from one control.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReverbUpdate {
    pub decay: Option<f64>,
    pub pre_delay: Option<f64>,
    pub wet: Option<f64>,
}

/// The subset of an update the caller can apply to the live effect
/// instance immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LiveChanges {
    pub pre_delay: Option<f64>,
    pub wet: Option<f64>,
}

impl LiveChanges {
    pub fn is_empty(&self) -> bool {
        self.pre_delay.is_none() && self.wet.is_none()
    }
}

/// Batches rebuild-class parameter changes into one effect reconfiguration
/// per quiescence window, while routing live-settable parameters through
/// untouched.
///
/// Wet and pre-delay map onto audio params that can be set on the running
/// effect; decay reshapes the impulse response and therefore arms the
/// rebuild deadline instead.
pub struct ParamDebouncer {
    params: ReverbParams,
    rebuild_due: Option<f64>,
}

impl ParamDebouncer {
    pub fn new(params: ReverbParams) -> Self {
        Self {
            params,
            rebuild_due: None,
        }
    }

    /// Latest merged parameters.
    pub fn params(&self) -> ReverbParams {
        self.params
    }

    pub fn rebuild_pending(&self) -> bool {
        self.rebuild_due.is_some()
    }

    /// Merge a partial update, returning the changes to apply live. A decay
    /// change arms (or re-arms) the rebuild deadline.
    pub fn update(&mut self, update: ReverbUpdate, now: f64) -> LiveChanges {
        let mut live = LiveChanges::default();
        if let Some(wet) = update.wet {
            self.params.wet = wet;
            live.wet = Some(wet);
        }
        if let Some(pre_delay) = update.pre_delay {
            self.params.pre_delay = pre_delay;
            live.pre_delay = Some(pre_delay);
        }
        if let Some(decay) = update.decay {
            self.params.decay = decay;
            self.rebuild_due = Some(now + REBUILD_DEBOUNCE_SEC);
        }
        live
    }

    /// Returns the parameters to rebuild with, exactly once per armed
    /// deadline, after the quiescence window has passed.
    pub fn poll(&mut self, now: f64) -> Option<ReverbParams> {
        match self.rebuild_due {
            Some(due) if now >= due => {
                self.rebuild_due = None;
                log::debug!("[reverb] rebuild with decay={:.1}", self.params.decay);
                Some(self.params)
            }
            _ => None,
        }
    }

    /// Drop any pending rebuild. Must run on teardown so a late poll cannot
    /// touch released audio resources.
    pub fn cancel(&mut self) {
        self.rebuild_due = None;
    }
}
