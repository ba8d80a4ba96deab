use crate::seqpair::SequencePair;
use std::collections::VecDeque;

/// Horizontal and vertical constraint DAGs derived from a sequence pair.
///
/// Nodes are the `n` block indices plus two sentinel endpoints appended at
/// the end: `source = n`, `sink = n + 1`. Edge weights are a function of
/// the edge's source node (block width in the horizontal graph, height in
/// the vertical one, zero for the sentinels), so successor lists plus a
/// node-length array fully describe each graph.
///
/// The buffers are reused across rebuilds; nothing is reallocated per move.
pub struct ConstraintGraphs {
    num_blocks: usize,
    pub h_succ: Vec<Vec<u32>>,
    pub v_succ: Vec<Vec<u32>>,
}

impl ConstraintGraphs {
    pub fn new(num_blocks: usize) -> Self {
        let nodes = num_blocks + 2;
        Self {
            num_blocks,
            h_succ: vec![Vec::new(); nodes],
            v_succ: vec![Vec::new(); nodes],
        }
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.num_blocks
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.num_blocks + 1
    }

    pub fn num_nodes(&self) -> usize {
        self.num_blocks + 2
    }

    /// Rebuilds both DAGs from the sequence pair. For each ordered pair of
    /// distinct blocks (i, k), i gets an edge to k in exactly one graph:
    /// horizontal when i precedes k in both sequences (k packs to the
    /// right of i), vertical when i follows k in the first sequence but
    /// precedes it in the second (k packs above i). The two remaining
    /// order combinations are covered by the symmetric pair (k, i).
    pub fn rebuild(&mut self, sp: &SequencePair) {
        debug_assert_eq!(sp.len(), self.num_blocks);

        for list in &mut self.h_succ {
            list.clear();
        }
        for list in &mut self.v_succ {
            list.clear();
        }

        let n = self.num_blocks as u32;
        for i in 0..n {
            for k in (i + 1)..n {
                let first_before = sp.pos_first(i) < sp.pos_first(k);
                let second_before = sp.pos_second(i) < sp.pos_second(k);
                match (first_before, second_before) {
                    (true, true) => self.h_succ[i as usize].push(k),
                    (false, false) => self.h_succ[k as usize].push(i),
                    (false, true) => self.v_succ[i as usize].push(k),
                    (true, false) => self.v_succ[k as usize].push(i),
                }
            }
        }

        let source = self.source();
        let sink = self.sink() as u32;
        for b in 0..n {
            self.h_succ[source].push(b);
            self.v_succ[source].push(b);
            self.h_succ[b as usize].push(sink);
            self.v_succ[b as usize].push(sink);
        }
        self.h_succ[source].push(sink);
        self.v_succ[source].push(sink);
    }
}

/// Queue-driven longest-path relaxation over a DAG, no topological sort.
///
/// A node is re-enqueued whenever its distance estimate improves; each edge
/// can trigger only finitely many improvements, so the loop terminates.
/// Scratch buffers are reused across runs.
pub struct Relaxation {
    reached: Vec<bool>,
    in_queue: Vec<bool>,
    queue: VecDeque<u32>,
}

impl Relaxation {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            reached: vec![false; num_nodes],
            in_queue: vec![false; num_nodes],
            queue: VecDeque::with_capacity(num_nodes),
        }
    }

    /// Fills `dist` with the longest source-to-node path length, where an
    /// edge u→v contributes `dist[u] + node_len[u]`. For the packing
    /// graphs this makes `dist` of a block its lower placement edge and
    /// `dist[sink]` the packed chip extent.
    pub fn run(&mut self, succ: &[Vec<u32>], node_len: &[u64], source: usize, dist: &mut [u64]) {
        dist.fill(0);
        self.reached.fill(false);
        self.in_queue.fill(false);
        self.queue.clear();

        self.queue.push_back(source as u32);
        self.reached[source] = true;
        self.in_queue[source] = true;

        while let Some(u) = self.queue.pop_front() {
            let u = u as usize;
            self.in_queue[u] = false;
            let reach = dist[u] + node_len[u];
            for &v in &succ[u] {
                let v = v as usize;
                // First visit always updates: sentinel edges have weight
                // zero, so `reach` can tie the initial distance of an
                // untouched node.
                if !self.reached[v] || reach > dist[v] {
                    self.reached[v] = true;
                    dist[v] = reach;
                    if !self.in_queue[v] {
                        self.in_queue[v] = true;
                        self.queue.push_back(v as u32);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Packs the 3-block scenario used throughout: sizes (2x3), (4x2), (3x3).
    fn pack(first: Vec<u32>, second: Vec<u32>) -> (Vec<u64>, Vec<u64>, u64, u64) {
        let sp = SequencePair::from_sequences(first, second).unwrap();
        let widths = [2u64, 4, 3];
        let heights = [3u64, 2, 3];

        let mut graphs = ConstraintGraphs::new(3);
        graphs.rebuild(&sp);

        let mut len_h = vec![0u64; graphs.num_nodes()];
        let mut len_v = vec![0u64; graphs.num_nodes()];
        len_h[..3].copy_from_slice(&widths);
        len_v[..3].copy_from_slice(&heights);

        let mut relax = Relaxation::new(graphs.num_nodes());
        let mut dist_h = vec![0u64; graphs.num_nodes()];
        let mut dist_v = vec![0u64; graphs.num_nodes()];
        relax.run(&graphs.h_succ, &len_h, graphs.source(), &mut dist_h);
        relax.run(&graphs.v_succ, &len_v, graphs.source(), &mut dist_v);

        let chip_w = dist_h[graphs.sink()];
        let chip_h = dist_v[graphs.sink()];
        (dist_h, dist_v, chip_w, chip_h)
    }

    #[test]
    fn identical_order_packs_a_horizontal_row() {
        let (x1, y1, chip_w, chip_h) = pack(vec![0, 1, 2], vec![0, 1, 2]);
        assert_eq!(chip_w, 9);
        assert_eq!(chip_h, 3);
        assert_eq!(&x1[..3], &[0, 2, 6]);
        assert_eq!(&y1[..3], &[0, 0, 0]);
    }

    #[test]
    fn reversed_order_packs_a_vertical_stack() {
        let (x1, y1, chip_w, chip_h) = pack(vec![0, 1, 2], vec![2, 1, 0]);
        assert_eq!(chip_w, 4);
        assert_eq!(chip_h, 8);
        assert_eq!(&x1[..3], &[0, 0, 0]);
        // Block 0 is last in the second sequence, so it stacks on top.
        assert_eq!(&y1[..3], &[5, 3, 0]);
    }

    #[test]
    fn zero_weight_source_edges_still_propagate() {
        // All edges out of the source carry weight zero; blocks on the
        // chip boundary must still end up reached with distance zero, and
        // the sink must see the full extent.
        let sp = SequencePair::identity(1);
        let mut graphs = ConstraintGraphs::new(1);
        graphs.rebuild(&sp);

        let mut len = vec![0u64; graphs.num_nodes()];
        len[0] = 7;
        let mut relax = Relaxation::new(graphs.num_nodes());
        let mut dist = vec![0u64; graphs.num_nodes()];
        relax.run(&graphs.h_succ, &len, graphs.source(), &mut dist);

        assert_eq!(dist[0], 0);
        assert_eq!(dist[graphs.sink()], 7);
    }

    #[test]
    fn packing_is_deterministic() {
        let a = pack(vec![1, 0, 2], vec![2, 0, 1]);
        let b = pack(vec![1, 0, 2], vec![2, 0, 1]);
        assert_eq!(a, b);
    }

    #[test]
    fn sink_distances_bound_every_block() {
        let (x1, y1, chip_w, chip_h) = pack(vec![1, 0, 2], vec![2, 0, 1]);
        let widths = [2u64, 4, 3];
        let heights = [3u64, 2, 3];
        for i in 0..3 {
            assert!(x1[i] + widths[i] <= chip_w);
            assert!(y1[i] + heights[i] <= chip_h);
        }
    }
}
