//! Anchor labels.
//!
//! Immediate-mode backends key popups by label, so every menu needs a label
//! no user-chosen one will collide with. Labels start with `##`, which such
//! backends treat as an identifier that is never drawn.

use std::sync::{Mutex, OnceLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::queue::lock;

/// Prefix of generated anchor labels.
pub const ANCHOR_PREFIX: &str = "##";

/// Source of random anchor labels.
///
/// Seed it from the OS once per process with [`IdentitySource::from_os_rng`]
/// (or use [`IdentitySource::process`]), or from a fixed seed with
/// [`IdentitySource::seeded`] for reproducible labels.
///
/// # Example
///
/// ```
/// use menutree::IdentitySource;
///
/// let a = IdentitySource::seeded(7);
/// let b = IdentitySource::seeded(7);
/// assert_eq!(a.next_label(), b.next_label());
/// ```
#[derive(Debug)]
pub struct IdentitySource {
    rng: Mutex<StdRng>,
}

impl IdentitySource {
    /// Seed from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seed deterministically.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The shared source seeded from the OS on first use.
    pub fn process() -> &'static IdentitySource {
        static PROCESS: OnceLock<IdentitySource> = OnceLock::new();
        PROCESS.get_or_init(IdentitySource::from_os_rng)
    }

    /// Next random 64-bit value.
    pub fn next_value(&self) -> u64 {
        lock(&self.rng).random()
    }

    /// Next anchor label, `##` followed by a random 64-bit value in decimal.
    pub fn next_label(&self) -> String {
        format!("{ANCHOR_PREFIX}{}", self.next_value())
    }
}
