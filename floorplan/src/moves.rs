use crate::seqpair::SequencePair;
use rand::Rng;

/// Applies one randomly chosen perturbation in place: a swap in the first
/// sequence only, a swap in both sequences, or an outline-aware rotation.
/// Every resulting state is a valid packing input; illegality is handled
/// by the penalty term, never by rejecting the move itself.
pub fn apply_random_move(
    rng: &mut impl Rng,
    seq: &mut SequencePair,
    dims: &mut [(u64, u64)],
    chip: (u64, u64),
    outline: (u64, u64),
) {
    let n = seq.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        rotate_outline_aware(&mut dims[0], chip, outline);
        return;
    }

    match rng.gen_range(0..3) {
        0 => {
            let (a, b) = pick_pair(rng, n);
            seq.swap_first(a, b);
        }
        1 => {
            let (a, b) = pick_pair(rng, n);
            seq.swap_both(a, b);
        }
        _ => {
            let id = rng.gen_range(0..n);
            rotate_outline_aware(&mut dims[id], chip, outline);
        }
    }
}

fn pick_pair(rng: &mut impl Rng, n: usize) -> (u32, u32) {
    let a = rng.gen_range(0..n);
    let mut b = rng.gen_range(0..n);
    while b == a {
        b = rng.gen_range(0..n);
    }
    (a as u32, b as u32)
}

/// Rotation move. Which flips are useful depends on how the current chip
/// compares to the outline:
/// - both dimensions exceeded: shrink the larger excess, so flip only if
///   the block's longer side lies along that dimension;
/// - width-only excess: flip blocks whose height is less than their width;
/// - height-only excess: symmetric;
/// - legal: flip unconditionally (free exploration).
pub fn rotate_outline_aware(dim: &mut (u64, u64), chip: (u64, u64), outline: (u64, u64)) {
    let (w, h) = *dim;
    let over_w = chip.0 > outline.0;
    let over_h = chip.1 > outline.1;

    let flip = match (over_w, over_h) {
        (true, true) => {
            let excess_w = chip.0 - outline.0;
            let excess_h = chip.1 - outline.1;
            if excess_w >= excess_h { w > h } else { h > w }
        }
        (true, false) => h < w,
        (false, true) => w < h,
        (false, false) => true,
    };
    if flip {
        *dim = (h, w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn legal_chip_rotates_unconditionally() {
        let mut dim = (4, 2);
        rotate_outline_aware(&mut dim, (10, 10), (20, 20));
        assert_eq!(dim, (2, 4));
    }

    #[test]
    fn width_excess_flips_only_wide_blocks() {
        // Chip too wide: a wide block flips to shrink width...
        let mut wide = (6, 2);
        rotate_outline_aware(&mut wide, (30, 10), (20, 20));
        assert_eq!(wide, (2, 6));

        // ...a tall block stays as it is.
        let mut tall = (2, 6);
        rotate_outline_aware(&mut tall, (30, 10), (20, 20));
        assert_eq!(tall, (2, 6));
    }

    #[test]
    fn height_excess_flips_only_tall_blocks() {
        let mut tall = (2, 6);
        rotate_outline_aware(&mut tall, (10, 30), (20, 20));
        assert_eq!(tall, (6, 2));

        let mut wide = (6, 2);
        rotate_outline_aware(&mut wide, (10, 30), (20, 20));
        assert_eq!(wide, (6, 2));
    }

    #[test]
    fn both_exceeded_targets_the_larger_excess() {
        // Width excess 15 dominates height excess 5: flip wide blocks.
        let mut wide = (6, 2);
        rotate_outline_aware(&mut wide, (35, 25), (20, 20));
        assert_eq!(wide, (2, 6));

        // Height excess dominates: the same block is left alone.
        let mut wide = (6, 2);
        rotate_outline_aware(&mut wide, (25, 35), (20, 20));
        assert_eq!(wide, (6, 2));
    }

    #[test]
    fn moves_preserve_sequence_pair_invariants() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seq = SequencePair::random(6, &mut rng);
        let mut dims: Vec<(u64, u64)> = (1..=6).map(|i| (i, i + 1)).collect();

        for _ in 0..200 {
            apply_random_move(&mut rng, &mut seq, &mut dims, (10, 10), (12, 12));
            seq.validate().unwrap();
        }
    }

    #[test]
    fn empty_design_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seq = SequencePair::identity(0);
        let mut dims: Vec<(u64, u64)> = Vec::new();
        apply_random_move(&mut rng, &mut seq, &mut dims, (0, 0), (10, 10));
        assert!(dims.is_empty());
    }

    #[test]
    fn single_block_designs_only_rotate() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seq = SequencePair::identity(1);
        let mut dims = vec![(3u64, 7u64)];
        apply_random_move(&mut rng, &mut seq, &mut dims, (3, 7), (10, 10));
        assert_eq!(dims[0], (7, 3));
        assert_eq!(seq.first(), &[0]);
    }
}
