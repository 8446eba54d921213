//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Scale `source` dimensions to a fixed target height, preserving aspect
/// ratio.
///
/// Output height is exactly `target_height`; output width is
/// `round(W·T/H)`. Sources shorter than the target are scaled *up* — a
/// 200×100 source at target 400 becomes 800×400.
///
/// # Examples
/// ```
/// # use picquick::imaging::scale_to_height;
/// assert_eq!(scale_to_height((200, 100), 400), (800, 400));
/// assert_eq!(scale_to_height((3000, 2000), 400), (600, 400));
/// ```
pub fn scale_to_height(source: (u32, u32), target_height: u32) -> (u32, u32) {
    let (width, height) = source;
    if height == 0 {
        // Decoded images never have a zero dimension; don't divide by it.
        return (width.max(1), target_height);
    }
    let scaled = (width as f64 * target_height as f64 / height as f64).round() as u32;
    // Extreme portrait sources can round the width down to zero.
    (scaled.max(1), target_height)
}
