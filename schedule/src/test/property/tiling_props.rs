//! Laws every resolver result must satisfy on arbitrary valid graphs.

use autotile_ir::test::property::generators::{arb_model_graph, arb_model_graph_with};
use autotile_ir::{AxisLabel, ModelGraph, OpType};
use proptest::prelude::*;

use crate::tiling::{
    Hardware, Tiler, TilingConfig, TilingStrategy, extend_multicore_axis_tile, live_footprint,
    max_alloc_and_upper_bound, mix_type_axis_tile, vec_axis_tile,
};

fn arb_hardware() -> impl Strategy<Value = Hardware> {
    arb_hardware_with(64..=1 << 16, 0..=8)
}

fn arb_hardware_with(
    mem: std::ops::RangeInclusive<usize>,
    cores: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = Hardware> {
    (mem, 0u32..=6, cores, 1usize..=8, prop_oneof![Just(16usize), Just(32)]).prop_map(
        |(mem_vc_size, align_exp, num_core, vblocknum, vblocksize)| Hardware {
            mem_vc_size,
            mem_vc_align: 1 << align_exp,
            num_core,
            vblocknum,
            vblocksize,
        },
    )
}

fn arb_tiler() -> impl Strategy<Value = Tiler> {
    (arb_model_graph(), arb_hardware()).prop_map(|(graph, hw)| Tiler::new(graph, hw).unwrap())
}

/// Graphs mixing ReduceY with element-wise nodes, so priority axes show up.
fn arb_reduce_graph() -> impl Strategy<Value = ModelGraph> {
    arb_model_graph_with(proptest::sample::select(vec![OpType::ReduceY, OpType::Elementwise, OpType::AllReduce]))
}

fn arb_mix_tiler() -> impl Strategy<Value = Tiler> {
    (arb_reduce_graph(), arb_hardware()).prop_map(|(graph, hw)| {
        let config = TilingConfig::builder().strategy(TilingStrategy::MixType).build();
        Tiler::with_config(graph, hw, config).unwrap()
    })
}

fn reset_tiles(tiler: &mut Tiler) {
    for position in 0..tiler.axes().len() {
        tiler.set_tile(position, 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn run_keeps_tiles_in_bounds(mut tiler in arb_tiler()) {
        tiler.run();
        for axis in tiler.axes() {
            prop_assert!(axis.c0_tiling >= 1, "{axis}");
            prop_assert!(axis.c0_tiling <= axis.range, "{axis}");
        }
    }

    #[test]
    fn vec_tile_is_power_of_two_or_full_shape(mut tiler in arb_tiler(), pick in any::<prop::sample::Index>()) {
        let axis = pick.get(tiler.axes()).clone();
        let (min_shape, _) = tiler.graph().min_shape_and_data_coef(&axis);
        let tile = vec_axis_tile(&mut tiler, &axis);
        prop_assert!(tile >= 1 && tile <= axis.range);
        prop_assert!(tile.is_power_of_two() || tile == min_shape, "tile {tile}, min_shape {min_shape}");
    }

    #[test]
    fn max_alloc_fits_buffer(
        graph in arb_model_graph(),
        hw in arb_hardware_with(1 << 12..=1 << 20, 0..=8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tiler = Tiler::new(graph, hw).unwrap();
        let position = pick.index(tiler.axes().len());
        let axis = tiler.axes()[position].clone();
        let mem = tiler.hardware().mem_vc_size as f64;

        reset_tiles(&mut tiler);
        prop_assume!(live_footprint(&tiler, &axis) <= mem);

        let estimate = max_alloc_and_upper_bound(&tiler, &axis);
        tiler.set_tile(position, estimate.max_alloc);
        prop_assert!(live_footprint(&tiler, &axis) <= mem + 1e-6);
    }

    #[test]
    fn vec_tile_of_outer_axis_is_idempotent(mut tiler in arb_tiler(), pick in any::<prop::sample::Index>()) {
        let axis = pick.get(tiler.axes()).clone();
        prop_assume!(axis.dim_axis != tiler.last_dim_axis());

        let before = tiler.axes().to_vec();
        let first = vec_axis_tile(&mut tiler, &axis);
        let second = vec_axis_tile(&mut tiler, &axis);
        prop_assert_eq!(first, second);
        prop_assert_eq!(tiler.axes(), before.as_slice());
    }

    #[test]
    fn mix_type_run_keeps_tiles_in_bounds(mut tiler in arb_mix_tiler()) {
        let summary = tiler.run();
        prop_assert_eq!(summary.strategy, TilingStrategy::MixType);
        for axis in tiler.axes() {
            prop_assert!(axis.c0_tiling >= 1, "{axis}");
            prop_assert!(axis.c0_tiling <= axis.range, "{axis}");
        }
    }

    #[test]
    fn mix_type_tile_is_power_of_two_or_full_shape(mut tiler in arb_mix_tiler(), pick in any::<prop::sample::Index>()) {
        let axis = pick.get(tiler.axes()).clone();
        let (min_shape, _) = tiler.graph().min_shape_and_data_coef(&axis);
        let mixed = mix_type_axis_tile(&mut tiler, &axis);
        prop_assert!(mixed.tile >= 1 && mixed.tile <= axis.range, "{mixed:?} on {axis}");
        prop_assert!(mixed.tile.is_power_of_two() || mixed.tile == min_shape, "{mixed:?}, min_shape {min_shape}");
    }

    #[test]
    fn multicore_growth_keeps_core_divisibility(
        graph in arb_model_graph(),
        hw in arb_hardware_with(1 << 12..=1 << 20, 1..=8),
    ) {
        let mut tiler = Tiler::new(graph, hw).unwrap();
        reset_tiles(&mut tiler);
        let candidate = tiler.axes()[tiler.axes().len() - 1].clone();
        let (_, data_coef) = tiler.graph().min_shape_and_data_coef(&candidate);
        let estimate = max_alloc_and_upper_bound(&tiler, &candidate);
        let before = tiler.axes().to_vec();

        extend_multicore_axis_tile(&mut tiler, &candidate, estimate.max_alloc, candidate.c0_tiling, data_coef);

        let num_core = tiler.hardware().num_core;
        for (old, new) in before.iter().zip(tiler.axes()) {
            let split = new.has_label(AxisLabel::MultiCore) && !new.is_multicore_only();
            if split && new.c0_tiling != old.c0_tiling && old.tile_count() > num_core {
                prop_assert_eq!(new.range % new.c0_tiling, 0, "{}", new);
                prop_assert_eq!(new.c0_tiling % num_core, 0, "{}", new);
            }
        }
    }
}
