//! Array-backed max-heap used to rank weighted candidates.

/// Binary max-heap over `f64`-keyed payloads. Backing storage doubles when
/// full and never shrinks. Among entries with equal keys a later push can
/// surface before an earlier one; callers must not rely on any particular
/// tie order.
#[derive(Clone, Debug)]
pub struct MaxHeap<T> {
    nodes: Vec<(f64, T)>,
}

impl<T> MaxHeap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry and sifts it up until a strictly larger parent stops
    /// it. O(log n).
    pub fn push(&mut self, key: f64, item: T) {
        self.nodes.push((key, item));
        let mut i = self.nodes.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[parent].0 > self.nodes[i].0 {
                break;
            }
            self.nodes.swap(parent, i);
            i = parent;
        }
    }

    /// Removes and returns the entry with the largest key, or `None` when the
    /// heap is empty.
    pub fn pop(&mut self) -> Option<(f64, T)> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last);
        }
        let root = std::mem::replace(&mut self.nodes[0], last);
        // sift the relocated entry down, larger child first
        let mut i = 0;
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut largest = i;
            if left < self.nodes.len() && self.nodes[left].0 > self.nodes[largest].0 {
                largest = left;
            }
            if right < self.nodes.len() && self.nodes[right].0 > self.nodes[largest].0 {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.nodes.swap(i, largest);
            i = largest;
        }
        Some(root)
    }

    #[must_use]
    pub fn peek(&self) -> Option<&(f64, T)> {
        self.nodes.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<T> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
