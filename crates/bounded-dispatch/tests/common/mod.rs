//! Shared helpers for bounded dispatch falsification tests.

#![allow(dead_code)]

use bounded_dispatch::buffer::{OutputBuffer, SENTINEL};
use bounded_dispatch::domain::Region;
use proptest::prelude::*;

/// Asserts every cell outside `region` still holds the sentinel.
pub fn assert_clipped_untouched(buf: &OutputBuffer, region: Region) {
    let d = buf.domain();
    for y in 0..d.dim_y {
        for x in 0..d.dim_x {
            if !region.contains(x, y) {
                assert_eq!(
                    buf.get(x, y),
                    SENTINEL,
                    "clipped cell ({x}, {y}) was written"
                );
            }
        }
    }
}

/// Asserts every cell inside `region` holds `x + y * dim_x`.
pub fn assert_active_linear(buf: &OutputBuffer, region: Region) {
    let d = buf.domain();
    for y in region.y_start..region.y_end {
        for x in region.x_start..region.x_end {
            let expected = i32::try_from(x + y * d.dim_x).unwrap();
            assert_eq!(buf.get(x, y), expected, "active cell ({x}, {y})");
        }
    }
}

/// Strategy for `(dim_x, dim_y, region)` with the region inside the domain.
pub fn domain_and_region() -> impl Strategy<Value = (u32, u32, Region)> {
    (1u32..=24, 1u32..=24).prop_flat_map(|(dx, dy)| {
        (0..=dx, 0..=dx, 0..=dy, 0..=dy).prop_map(move |(a, b, c, d)| {
            (dx, dy, Region::new(a.min(b), a.max(b), c.min(d), c.max(d)))
        })
    })
}
