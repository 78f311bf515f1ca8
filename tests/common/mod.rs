#![allow(dead_code)]

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const YELLOW: [u8; 3] = [255, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

#[allow(unused_macros)]
macro_rules! assert_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        let (left_val, right_val, max_error) = (&$left, &$right, &$max_error);
        if left_val.abs_diff(*right_val) > *max_error {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                left_val, right_val, max_error
            );
        }
    };
}
#[allow(unused_imports)]
pub(crate) use assert_almost_eq;

/// RGB image with red, green, yellow and blue quadrants
/// (top-left, top-right, bottom-left, bottom-right).
pub fn quadrant_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let color = match (x < width / 2, y < height / 2) {
                (true, true) => RED,
                (false, true) => GREEN,
                (true, false) => YELLOW,
                (false, false) => BLUE,
            };
            data.extend_from_slice(&color);
        }
    }
    data
}

/// Which of the four reference colors `rgb` is closest to.
pub fn nearest(rgb: &[u8]) -> [u8; 3] {
    let distance = |c: &[u8; 3]| -> u32 {
        c.iter()
            .zip(rgb)
            .map(|(&a, &b)| u32::from(a.abs_diff(b)).pow(2))
            .sum()
    };
    [RED, GREEN, YELLOW, BLUE]
        .into_iter()
        .min_by_key(distance)
        .unwrap()
}

/// Simple deterministic gradient for round-trip tests.
pub fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 255) / width.max(1)) as u8;
            let w = ((y * 255) / height.max(1)) as u8;
            data.extend_from_slice(&[v, w, 128]);
        }
    }
    data
}
