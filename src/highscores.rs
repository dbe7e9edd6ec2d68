//! High score persistence
//!
//! A single non-negative integer under a fixed LocalStorage key. Reads that
//! fail or find garbage yield 0; failed writes are logged and forgotten.

/// Where the best score is kept between sessions
pub trait HighScoreStore {
    /// Stored high score (0 when absent or unreadable)
    fn load(&self) -> u32;
    /// Remember a new high score
    fn save(&mut self, high: u32);
}

/// Parse a stored value: leading decimal digits, anything else is 0
///
/// Values past `u32::MAX` saturate so an oversized record is never lost.
pub fn parse_high(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let digits = raw
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw, |end| &raw[..end]);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return 0;
    }
    digits
        .parse::<u64>()
        .map_or(u32::MAX, |v| v.min(u32::MAX as u64) as u32)
}

/// LocalStorage-backed store (no-op on native)
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScore;

impl LocalStorageHighScore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "flappy_roket_high";
}

impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> u32 {
        let high = crate::platform::storage::get_item(Self::STORAGE_KEY)
            .map(|raw| parse_high(&raw))
            .unwrap_or(0);
        log::info!("Loaded high score: {}", high);
        high
    }

    fn save(&mut self, high: u32) {
        if crate::platform::storage::set_item(Self::STORAGE_KEY, &high.to_string()) {
            log::debug!("High score saved ({})", high);
        } else {
            log::warn!("Could not save high score {}", high);
        }
    }
}

/// In-memory store for tests and the native runner
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    pub high: u32,
    /// Number of `save` calls
    pub saves: u32,
}

impl MemoryHighScore {
    pub fn new(high: u32) -> Self {
        Self { high, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.high
    }

    fn save(&mut self, high: u32) {
        self.high = high;
        self.saves += 1;
    }
}
