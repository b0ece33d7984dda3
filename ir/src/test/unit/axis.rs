use crate::{Axis, AxisLabel, enum_set};

#[test]
fn test_builder_defaults_tile_to_range() {
    let axis = Axis::builder().name("i").range(64).dim_axis(0).build();
    assert_eq!(axis.c0_tiling, 64);
    assert_eq!(axis.index, 0);
    assert!(!axis.is_inner);
    assert!(!axis.is_innermost);
    assert!(axis.labels.is_empty());
}

#[test]
fn test_builder_explicit_tile() {
    let axis = Axis::builder().name("j").range(64).dim_axis(1).c0_tiling(16).build();
    assert_eq!(axis.c0_tiling, 16);
    assert_eq!(axis.tile_count(), 4);
}

#[test]
fn test_top_level() {
    let top = Axis::builder().name("i").range(8).dim_axis(0).build();
    let nested = Axis::builder().name("k").range(8).dim_axis(1).index(2).build();
    assert!(top.is_top_level());
    assert!(!nested.is_top_level());
}

#[test]
fn test_labels() {
    let axis = Axis::builder()
        .name("i")
        .range(32)
        .dim_axis(0)
        .labels(enum_set!(AxisLabel::MultiCore | AxisLabel::Vectorization))
        .build();
    assert!(axis.has_label(AxisLabel::MultiCore));
    assert!(axis.has_label(AxisLabel::Vectorization));
    assert!(!axis.has_label(AxisLabel::Reduction));
    assert!(!axis.is_multicore_only());

    let mc = Axis::builder().name("b").range(32).dim_axis(0).labels(enum_set!(AxisLabel::MultiCore)).build();
    assert!(mc.is_multicore_only());
}

#[test]
fn test_same_dim_ignores_range() {
    let global = Axis::builder().name("i").range(128).dim_axis(3).build();
    let local = Axis::builder().name("i").range(16).dim_axis(3).build();
    assert!(global.same_dim(&local));
}

#[test]
fn test_display() {
    let axis = Axis::builder().name("i").range(128).dim_axis(2).c0_tiling(32).build();
    assert_eq!(axis.to_string(), "i[d2]=32/128");
}
