use eda_common::db::core::{FloorplanDB, NetData};
use eda_common::db::indices::{BlockId, TerminalId};
use eda_common::util::config::FloorplanConfig;
use eda_floorplan::place;
use eda_floorplan::result::FloorplanResult;

fn build_design() -> FloorplanDB {
    let mut db = FloorplanDB::new(120, 120);
    let dims: [(u64, u64); 8] = [
        (20, 30),
        (25, 15),
        (10, 40),
        (30, 30),
        (15, 15),
        (20, 10),
        (35, 12),
        (12, 24),
    ];
    for (i, (w, h)) in dims.iter().enumerate() {
        db.add_block(format!("bk{}", i), *w, *h);
    }
    db.add_terminal("p0".to_string(), 0, 60);
    db.add_terminal("p1".to_string(), 120, 60);
    db.add_net(NetData {
        blocks: vec![BlockId::new(0), BlockId::new(1), BlockId::new(2)],
        terminals: vec![TerminalId::new(0)],
    });
    db.add_net(NetData {
        blocks: vec![BlockId::new(3), BlockId::new(4)],
        terminals: vec![],
    });
    db.add_net(NetData {
        blocks: vec![BlockId::new(5), BlockId::new(6), BlockId::new(7)],
        terminals: vec![TerminalId::new(1)],
    });
    db
}

fn test_config(seed: u64) -> FloorplanConfig {
    FloorplanConfig {
        seed: Some(seed),
        workers: 2,
        moves_per_block: 5,
        initial_temperature: 200.0,
        max_cooling_steps: 24,
        max_rounds: 6,
        ..FloorplanConfig::default()
    }
}

fn assert_well_formed(result: &FloorplanResult) {
    let rects = result.rects();
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            assert!(
                !rects[i].overlaps(&rects[j]),
                "blocks {} and {} overlap: {:?} vs {:?}",
                i,
                j,
                rects[i],
                rects[j]
            );
        }
    }
    for rect in &rects {
        assert!(rect.max.x <= result.chip_width);
        assert!(rect.max.y <= result.chip_height);
    }
    assert_eq!(result.chip_area, result.chip_width * result.chip_height);
    assert!(result.cost.is_finite());
    assert!(result.wirelength >= 0.0);
}

#[test]
fn finds_a_legal_packing_on_a_roomy_outline() {
    let result = place(build_design(), &test_config(1234)).unwrap();
    assert_well_formed(&result);
    // Total block area is well under half the outline; the search must
    // fit it within the allotted rounds.
    assert!(result.legal, "chip {}x{}", result.chip_width, result.chip_height);
    assert!(result.chip_width <= 120 && result.chip_height <= 120);
    assert_eq!(result.placements.len(), 8);
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = place(build_design(), &test_config(99)).unwrap();
    let b = place(build_design(), &test_config(99)).unwrap();

    assert_eq!(a.chip_width, b.chip_width);
    assert_eq!(a.chip_height, b.chip_height);
    assert_eq!(a.wirelength, b.wirelength);
    for (pa, pb) in a.placements.iter().zip(&b.placements) {
        assert_eq!(pa.name, pb.name);
        assert_eq!((pa.x1, pa.y1, pa.x2, pa.y2), (pb.x1, pb.y1, pb.x2, pb.y2));
    }
}

#[test]
fn different_seeds_still_produce_well_formed_results() {
    for seed in [7, 21, 1001] {
        let result = place(build_design(), &test_config(seed)).unwrap();
        assert_well_formed(&result);
    }
}
