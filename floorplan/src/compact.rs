use eda_common::geom::rect::Rect;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Greedy post-pass that slides blocks toward the origin in fixed-size
/// discrete steps, keeping a step only if it creates no overlap. Operates
/// on realized coordinates only; the sequence pair is untouched. Purely a
/// tightening heuristic with no optimality guarantee.
pub fn compact(rects: &mut [Rect], max_sweeps: usize, step: u64) {
    if step == 0 || rects.len() < 2 {
        return;
    }

    for _ in 0..max_sweeps {
        let mut order: Vec<usize> = (0..rects.len()).collect();
        order.sort_by_key(|&i| (rects[i].min.x, rects[i].min.y));

        let mut moved = false;
        for &i in &order {
            moved |= slide(rects, i, step, Axis::X);
            moved |= slide(rects, i, step, Axis::Y);
        }
        if !moved {
            break;
        }
    }
}

fn slide(rects: &mut [Rect], i: usize, step: u64, axis: Axis) -> bool {
    let mut moved = false;
    loop {
        let r = rects[i];
        let candidate = match axis {
            Axis::X => {
                if r.min.x < step {
                    break;
                }
                Rect::from_extent(r.min.x - step, r.min.y, r.width(), r.height())
            }
            Axis::Y => {
                if r.min.y < step {
                    break;
                }
                Rect::from_extent(r.min.x, r.min.y - step, r.width(), r.height())
            }
        };

        let blocked = rects
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && candidate.overlaps(other));
        if blocked {
            break;
        }
        rects[i] = candidate;
        moved = true;
    }
    moved
}
