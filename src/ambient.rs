use std::sync::OnceLock;

use crate::recorder::Recorder;

static SHARED: OnceLock<Recorder> = OnceLock::new();

/**
The process-wide recorder, if one has been initialized with [`crate::Setup::init`].
*/
pub fn shared() -> Option<&'static Recorder> {
    SHARED.get()
}

pub(crate) fn init(recorder: Recorder) -> Option<&'static Recorder> {
    let mut fresh = false;

    let shared = SHARED.get_or_init(|| {
        fresh = true;
        recorder
    });

    if fresh {
        Some(shared)
    } else {
        None
    }
}
