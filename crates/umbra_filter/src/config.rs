//! Filter configuration

use serde::{Deserialize, Serialize};

/// Parameters of one injected filter.
///
/// `mode` 0 is light mode, any other value selects the dark role-specific
/// transforms. `brightness` and `contrast` are percentages where 100 is
/// identity; `grayscale` and `sepia` are percentages where 0 is identity.
///
/// Identity defaults are deliberately the caller's contract, so this type
/// does not implement `Default`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    pub mode: u8,
    pub brightness: u16,
    pub contrast: u16,
    pub grayscale: u16,
    pub sepia: u16,
}

impl FilterConfig {
    /// Whether the matrix pass would change anything
    pub fn is_matrix_identity(&self) -> bool {
        self.brightness == 100 && self.contrast == 100 && self.grayscale == 0 && self.sepia == 0
    }
}
