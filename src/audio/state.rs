use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// State shared between the player handle, the decoder thread and the
/// audio callback.
pub(crate) struct SharedState {
    active: AtomicBool,
    paused: AtomicBool,
    samples_played: AtomicU64,
    /// Id of the most recent `Prepare` that could not be loaded, 0 for none
    failed_load: AtomicU64,
}

impl Default for SharedState {
    fn default() -> Self {
        SharedState {
            active: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            samples_played: AtomicU64::new(0),
            failed_load: AtomicU64::new(0),
        }
    }
}

impl SharedState {
    /// Is a clip loaded (playing or paused)?
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Output samples consumed by the device, across all channels
    pub(crate) fn get_samples(&self) -> u64 {
        self.samples_played.load(Ordering::Acquire)
    }

    pub(crate) fn set_active(&self, val: bool) {
        self.active.store(val, Ordering::Release);
    }

    pub(crate) fn set_paused(&self, val: bool) {
        self.paused.store(val, Ordering::Relaxed);
    }

    pub(crate) fn set_samples(&self, samples: u64) {
        self.samples_played.store(samples, Ordering::SeqCst);
    }

    pub(crate) fn add_samples(&self, val: u64) {
        self.samples_played.fetch_add(val, Ordering::Release);
    }

    pub(crate) fn reset_samples(&self) {
        self.samples_played.store(0, Ordering::Release);
    }

    /// True once if `prepare_id` is the load that failed last.
    pub(crate) fn take_failed_load(&self, prepare_id: u64) -> bool {
        prepare_id != 0
            && self
                .failed_load
                .compare_exchange(prepare_id, 0, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    pub(crate) fn set_failed_load(&self, prepare_id: u64) {
        self.failed_load.store(prepare_id, Ordering::Release);
    }
}
