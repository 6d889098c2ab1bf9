/// Monotonic id source for kinds with store-assigned integer ids. First id is 1.
#[derive(Debug, Default, Clone)]
pub struct IdSequence {
    last: u32,
}

impl IdSequence {
    /// `None` once `u32::MAX` has been handed out or observed.
    pub fn next_id(&mut self) -> Option<u32> {
        let next = self.last.checked_add(1)?;
        self.last = next;
        Some(next)
    }

    /// Never hand out `id` or anything below it again.
    pub fn observe(&mut self, id: u32) {
        self.last = self.last.max(id);
    }
}
