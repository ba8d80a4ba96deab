use crate::db::core::FloorplanDB;
use crate::geom::rect::Rect;
use rayon::prelude::*;

/// Verifies a finished floorplan: block rectangles must be pairwise
/// non-overlapping (hard failure), and the outline check is reported but
/// non-fatal since the search may legitimately end with a best-effort
/// illegal result.
pub fn run_floorplan_check(db: &FloorplanDB, rects: &[Rect]) -> Result<(), String> {
    log::info!("Starting Floorplan Verification...");

    let mut inside = true;
    for (i, rect) in rects.iter().enumerate() {
        if rect.max.x > db.outline_width || rect.max.y > db.outline_height {
            log::warn!(
                "Block '{}' exceeds the outline: ({}, {}) vs {}x{}",
                db.blocks[i].name,
                rect.max.x,
                rect.max.y,
                db.outline_width,
                db.outline_height
            );
            inside = false;
        }
    }

    let has_overlap = (0..rects.len()).into_par_iter().any(|i| {
        for j in (i + 1)..rects.len() {
            if rects[i].overlaps(&rects[j]) {
                log::error!(
                    "FAIL: Block Overlap '{}' and '{}'",
                    db.blocks[i].name,
                    db.blocks[j].name
                );
                return true;
            }
        }
        false
    });

    if has_overlap {
        return Err("Floorplan verification failed: overlapping blocks.".to_string());
    }

    if inside {
        log::info!("\x1b[32mPASS\x1b[0m: Floorplan is legal.");
    } else {
        log::warn!("Floorplan exceeds the outline (best-effort result).");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_block_db() -> FloorplanDB {
        let mut db = FloorplanDB::new(20, 20);
        db.add_block("a".to_string(), 10, 10);
        db.add_block("b".to_string(), 10, 10);
        db
    }

    #[test]
    fn accepts_disjoint_blocks() {
        let db = two_block_db();
        let rects = vec![Rect::from_extent(0, 0, 10, 10), Rect::from_extent(10, 0, 10, 10)];
        assert!(run_floorplan_check(&db, &rects).is_ok());
    }

    #[test]
    fn rejects_overlap() {
        let db = two_block_db();
        let rects = vec![Rect::from_extent(0, 0, 10, 10), Rect::from_extent(5, 5, 10, 10)];
        assert!(run_floorplan_check(&db, &rects).is_err());
    }

    #[test]
    fn out_of_outline_is_not_fatal() {
        let db = two_block_db();
        let rects = vec![Rect::from_extent(0, 0, 10, 10), Rect::from_extent(15, 0, 10, 10)];
        assert!(run_floorplan_check(&db, &rects).is_ok());
    }
}
