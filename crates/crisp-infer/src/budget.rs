/// Derive the engine tile size from the accelerator's reported memory
/// headroom, in the accelerator's own reporting unit (megabytes).
///
/// Pure threshold table, first match wins; larger headroom permits larger
/// chunks, and the 32-pixel floor keeps even a starved accelerator making
/// forward progress. `None` (headroom unknown or unreadable) takes the floor.
///
/// This function never consults device state; the headroom is probed once at
/// startup and passed in.
pub fn tile_size_for(headroom_mb: Option<u64>) -> u32 {
    match headroom_mb {
        Some(h) if h > 2600 => 400,
        Some(h) if h > 740 => 200,
        Some(h) if h > 250 => 100,
        _ => 32,
    }
}
