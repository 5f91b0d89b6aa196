/// Allocates and recycles small `u32` indices, optionally bounded.
///
/// A `Scene` uses one bounded to 32 to hand out per-camera visibility bits.
/// Freed indices are recycled lowest-first, so a camera added after another
/// was removed takes over the freed bit.
///
/// # Example
///
/// ```ignore
/// let mut alloc = SlotAllocator::with_capacity(2);
/// let a = alloc.try_alloc();  // Some(0)
/// let b = alloc.try_alloc();  // Some(1)
/// let c = alloc.try_alloc();  // None (exhausted)
/// alloc.free(0);
/// let d = alloc.try_alloc();  // Some(0) (recycled)
/// ```
pub struct SlotAllocator {
    /// Freed indices, kept sorted descending so `pop` yields the lowest
    free_list: Vec<u32>,
    next_id: u32,
    len: u32,
    capacity: Option<u32>,
}

impl SlotAllocator {
    /// Create a new empty, unbounded allocator
    pub fn new() -> Self {
        Self {
            free_list: Vec::new(),
            next_id: 0,
            len: 0,
            capacity: None,
        }
    }

    /// Create an allocator that never hands out an index `>= capacity`
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Allocate the lowest available index, or `None` if the pool is exhausted
    pub fn try_alloc(&mut self) -> Option<u32> {
        let id = match self.free_list.pop() {
            Some(id) => id,
            None => {
                if self.capacity.is_some_and(|cap| self.next_id >= cap) {
                    return None;
                }
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };
        self.len += 1;
        Some(id)
    }

    /// Return an index to the pool for reuse.
    ///
    /// Returns `false` (and changes nothing) if the index is not currently allocated.
    pub fn free(&mut self, id: u32) -> bool {
        if !self.is_allocated(id) {
            return false;
        }
        let pos = self.free_list.partition_point(|&f| f > id);
        self.free_list.insert(pos, id);
        self.len -= 1;
        true
    }

    /// Whether `id` has been handed out and not freed since
    pub fn is_allocated(&self, id: u32) -> bool {
        id < self.next_id && !self.free_list.contains(&id)
    }

    /// Highest index ever allocated + 1.
    pub fn high_water_mark(&self) -> u32 {
        self.next_id
    }

    /// Maximum number of simultaneously allocated indices, if bounded
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Number of currently allocated slots
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether no slots are currently allocated
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
