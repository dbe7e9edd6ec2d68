//! Key/value storage
//!
//! LocalStorage on the web. Native builds have no backing store: reads miss
//! and writes report failure, which every caller tolerates.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a value (None if storage is unavailable or the key is missing)
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Write a value, returning whether it was stored
#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> bool {
    match local_storage() {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(_key: &str, _value: &str) -> bool {
    false
}
