use crate::objects::ObjectId;

/// Hands out object numbers for one writing session.
///
/// Numbers start at 1 and are allocated strictly increasing; none is ever
/// reused or skipped.
#[derive(Debug, Clone)]
pub struct ObjectAllocator {
    next: u32,
}

impl ObjectAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next, 0);
        self.next += 1;
        id
    }

    /// Number of object numbers handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}
