//! Minimal bitmap-text overlay for on-frame annotations.
//!
//! Glyphs are 5x7 bitmasks drawn straight into the frame's pixel data, clipped
//! at the edges. Enough of an alphabet for the FPS readout; not a text engine.

use crate::Frame;

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const GLYPH_ADVANCE: i32 = 6;

/// Draw `text` with its top-left corner at (x, y), in the given color
/// (given in the frame's own channel order). Unknown characters advance the
/// cursor without drawing. Pixels outside the frame are clipped.
pub fn draw_label(frame: &mut Frame, mut x: i32, y: i32, text: &str, color: [u8; 3]) {
    let width = frame.width() as i32;
    let height = frame.height() as i32;
    let channels = frame.channels();
    if channels < 3 {
        return;
    }

    for ch in text.chars().flat_map(|c| c.to_uppercase()) {
        if let Some(glyph) = glyph_bits(ch) {
            for (row, pattern) in glyph.iter().enumerate() {
                let py = y + row as i32;
                if py < 0 || py >= height {
                    continue;
                }
                for col in 0..GLYPH_WIDTH {
                    if (pattern >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                        let px = x + col;
                        if px >= 0 && px < width {
                            let idx = (py as usize * width as usize + px as usize) * channels;
                            frame.data_mut()[idx..idx + 3].copy_from_slice(&color);
                        }
                    }
                }
            }
        }
        x += GLYPH_ADVANCE;
    }
}

/// Fill the rectangle [x0, x1) x [y0, y1) with a solid color, clipped to the
/// frame bounds.
pub fn fill_rect(frame: &mut Frame, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
    let width = frame.width() as i32;
    let height = frame.height() as i32;
    let channels = frame.channels();
    if channels < 3 {
        return;
    }

    let x0 = x0.clamp(0, width);
    let x1 = x1.clamp(0, width);
    let y0 = y0.clamp(0, height);
    let y1 = y1.clamp(0, height);

    for py in y0..y1 {
        for px in x0..x1 {
            let idx = (py as usize * width as usize + px as usize) * channels;
            frame.data_mut()[idx..idx + 3].copy_from_slice(&color);
        }
    }
}

/// Render the FPS readout in the top-left corner, white on a dark box.
/// `None` renders the undefined-FPS sentinel.
pub fn draw_fps(frame: &mut Frame, fps: Option<f64>) {
    let text = match fps {
        Some(value) => format!("FPS: {:.1}", value),
        None => "FPS: --".to_string(),
    };
    let text_width = text.chars().count() as i32 * GLYPH_ADVANCE;
    fill_rect(frame, 8, 8, 8 + text_width + 4, 8 + GLYPH_HEIGHT + 4, [0, 0, 0]);
    draw_label(frame, 10, 10, &text, [255, 255, 255]);
}

fn glyph_bits(ch: char) -> Option<[u8; 7]> {
    match ch {
        'F' => Some([
            0b11111, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000, 0b10000,
        ]),
        'P' => Some([
            0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000,
        ]),
        'S' => Some([
            0b01111, 0b10000, 0b01110, 0b00001, 0b00001, 0b10001, 0b01110,
        ]),
        '0' => Some([
            0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110,
        ]),
        '1' => Some([
            0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110,
        ]),
        '2' => Some([
            0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111,
        ]),
        '3' => Some([
            0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110,
        ]),
        '4' => Some([
            0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010,
        ]),
        '5' => Some([
            0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110,
        ]),
        '6' => Some([
            0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110,
        ]),
        '7' => Some([
            0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000,
        ]),
        '8' => Some([
            0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110,
        ]),
        '9' => Some([
            0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100,
        ]),
        ':' => Some([0, 0b00110, 0b00110, 0, 0b00110, 0b00110, 0]),
        '.' => Some([0, 0, 0, 0, 0, 0b00110, 0b00110]),
        '-' => Some([0, 0, 0, 0b11111, 0, 0, 0]),
        ' ' => Some([0, 0, 0, 0, 0, 0, 0]),
        _ => None,
    }
}
