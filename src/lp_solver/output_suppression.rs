//! Output suppression for LP solvers
//!
//! CBC prints its progress log straight to the process stdout, which is also
//! where the planning report goes. The solve is wrapped in a `gag` on stdout.
//!
//! **Important**: the `gag` crate allows only one live redirect per output
//! stream per process. Handles share a single `Gag` through an `Arc`, so
//! concurrent solves reuse the same redirect and it is released once the last
//! handle drops.

use gag::Gag;
use std::io;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// A shared handle keeping stdout gagged while alive
pub struct GagHandle {
    _gag: Arc<Gag>,
}

impl GagHandle {
    /// Get a handle that suppresses stdout. Multiple threads can share the same
    /// underlying Gag instance; the gag persists until all handles are dropped.
    pub fn stdout() -> io::Result<Self> {
        STDOUT_GAG_MANAGER.get_gag()
    }
}

/// Hands out `Arc<Gag>` clones while a gag is alive, creating one otherwise
struct GagManager {
    weak_gag: Mutex<Weak<Gag>>,
    create_gag: fn() -> io::Result<Gag>,
}

impl GagManager {
    const fn new(create_gag: fn() -> io::Result<Gag>) -> Self {
        Self {
            weak_gag: Mutex::new(Weak::new()),
            create_gag,
        }
    }

    fn get_gag(&self) -> io::Result<GagHandle> {
        // The guard is held across creation so two threads never race to gag
        let mut weak_gag = self
            .weak_gag
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(gag) = weak_gag.upgrade() {
            return Ok(GagHandle { _gag: gag });
        }

        let gag = Arc::new((self.create_gag)()?);
        *weak_gag = Arc::downgrade(&gag);

        Ok(GagHandle { _gag: gag })
    }
}

static STDOUT_GAG_MANAGER: GagManager = GagManager::new(Gag::stdout);
