use autotile_ir::Axis;
use test_case::test_case;

use crate::test::helpers::axis;
use crate::tiling::align::align_miss_factor;

fn inner(name: &str, dim: usize, range: usize) -> Axis {
    Axis::builder().name(name).range(range).dim_axis(dim).is_inner(true).build()
}

#[test_case(4, 16, 1, 4 ; "short inner row")]
#[test_case(8, 8, 1, 1 ; "row fills alignment")]
#[test_case(4, 16, 8, 8 ; "keeps larger factor")]
#[test_case(32, 16, 1, 1 ; "row wider than alignment")]
fn test_inner_axis(range: usize, min_to_align: usize, current: usize, expected: usize) {
    let globals = [axis("i", 0, 64), inner("r", 1, range)];
    assert_eq!(align_miss_factor(current, &inner("r", 1, range), &globals, min_to_align), expected);
}

#[test]
fn test_outer_axis_ignored() {
    let globals = [axis("i", 0, 4)];
    assert_eq!(align_miss_factor(1, &axis("i", 0, 4), &globals, 16), 1);
}

#[test]
fn test_range_mismatch_ignored() {
    let globals = [inner("r", 1, 8)];
    // The node only sees half of the global extent.
    assert_eq!(align_miss_factor(1, &inner("r", 1, 4), &globals, 16), 1);
}
