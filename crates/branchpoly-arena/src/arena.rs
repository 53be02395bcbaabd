//! Fixed-capacity arm pool.

use branchpoly_core::ArmId;

use crate::arm::Arm;

/// Bounded pool of [`Arm`] records with a bump cursor.
///
/// Storage grows on demand up to the capacity and is kept across
/// [`reset`](Self::reset), so steady-state growth does not allocate.
///
/// Arms handed out by [`request_arm`](Self::request_arm) stay valid until
/// the next [`reset`](Self::reset) or [`reserve`](Self::reserve). No arm
/// index may be referenced by a topology before the arena returned it.
#[derive(Debug)]
pub struct ArmArena {
    /// Backing storage. `arms.len()` is the number of slots ever touched;
    /// slots beyond `cursor` hold stale data from earlier molecules.
    arms: Vec<Arm>,
    capacity: usize,
    /// Next free slot.
    cursor: usize,
    arms_available: bool,
}

impl ArmArena {
    /// Largest usable capacity: every handed-out id must fit an [`ArmId`].
    pub const MAX_CAPACITY: usize = u32::MAX as usize;

    /// An arena that hands out at most `capacity` arms. Nothing is
    /// allocated until arms are requested.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arms: Vec::new(),
            capacity,
            cursor: 0,
            arms_available: true,
        }
    }

    /// Change the pool's capacity and reset the cursor.
    ///
    /// Slots already touched are kept (up to `capacity`), so calling this
    /// between molecules with the same capacity is allocation-free.
    pub fn reserve(&mut self, capacity: usize) {
        self.arms.truncate(capacity);
        self.capacity = capacity;
        self.reset();
    }

    /// Rewind the cursor for the next molecule. Previously handed-out ids
    /// become invalid.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.arms_available = true;
    }

    /// Hand out the next free arm, reinitialised and unlinked.
    ///
    /// Returns `None` once the pool is exhausted and latches
    /// [`arms_available`](Self::arms_available) to `false` until the next
    /// reset. Callers must check the result of every request. Ids never
    /// wrap: requests past [`MAX_CAPACITY`](Self::MAX_CAPACITY) also fail.
    pub fn request_arm(&mut self) -> Option<ArmId> {
        let raw = match u32::try_from(self.cursor) {
            Ok(raw) if self.cursor < self.capacity && self.cursor < Self::MAX_CAPACITY => raw,
            _ => {
                self.arms_available = false;
                return None;
            }
        };
        let id = ArmId(raw);
        let fresh = Arm::detached(id);
        if self.cursor < self.arms.len() {
            self.arms[self.cursor] = fresh;
        } else {
            self.arms.push(fresh);
        }
        self.cursor += 1;
        Some(id)
    }

    /// Whether every request since the last reset has succeeded.
    pub fn arms_available(&self) -> bool {
        self.arms_available
    }

    /// Maximum number of arms per molecule.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Arms handed out since the last reset.
    pub fn allocated(&self) -> usize {
        self.cursor
    }

    /// Arms still available before exhaustion.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Whether `id` was handed out since the last reset.
    pub fn contains(&self, id: ArmId) -> bool {
        id.index() < self.cursor
    }

    /// Shared access to an allocated arm.
    pub fn get(&self, id: ArmId) -> Option<&Arm> {
        if self.contains(id) {
            self.arms.get(id.index())
        } else {
            None
        }
    }

    /// Mutable access to an allocated arm.
    pub fn get_mut(&mut self, id: ArmId) -> Option<&mut Arm> {
        if self.contains(id) {
            self.arms.get_mut(id.index())
        } else {
            None
        }
    }

    /// Shared access to an allocated arm.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out since the last reset.
    pub fn arm(&self, id: ArmId) -> &Arm {
        assert!(
            self.contains(id),
            "arm {id} not allocated ({} in use)",
            self.cursor
        );
        &self.arms[id.index()]
    }

    /// Mutable access to an allocated arm.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out since the last reset.
    pub fn arm_mut(&mut self, id: ArmId) -> &mut Arm {
        assert!(
            self.contains(id),
            "arm {id} not allocated ({} in use)",
            self.cursor
        );
        &mut self.arms[id.index()]
    }

    /// All arms handed out since the last reset, in allocation order.
    pub fn allocated_arms(&self) -> &[Arm] {
        &self.arms[..self.cursor]
    }
}

impl Default for ArmArena {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchpoly_core::ArmRef;

    #[test]
    fn request_hands_out_sequential_ids() {
        let mut arena = ArmArena::with_capacity(3);
        assert_eq!(arena.request_arm(), Some(ArmId(0)));
        assert_eq!(arena.request_arm(), Some(ArmId(1)));
        assert_eq!(arena.allocated(), 2);
        assert_eq!(arena.remaining(), 1);
    }

    #[test]
    fn exhaustion_returns_none_and_latches() {
        let mut arena = ArmArena::with_capacity(2);
        assert!(arena.request_arm().is_some());
        assert!(arena.request_arm().is_some());
        assert!(arena.arms_available());
        assert_eq!(arena.request_arm(), None);
        assert!(!arena.arms_available());
        assert_eq!(arena.request_arm(), None);
        assert_eq!(arena.allocated(), 2);
    }

    #[test]
    fn zero_capacity_is_immediately_exhausted() {
        let mut arena = ArmArena::with_capacity(0);
        assert_eq!(arena.request_arm(), None);
        assert!(!arena.arms_available());
    }

    #[test]
    fn reset_rewinds_and_reinitialises_slots() {
        let mut arena = ArmArena::with_capacity(2);
        let id = arena.request_arm().unwrap();
        {
            let arm = arena.arm_mut(id);
            arm.length = 12.5;
            arm.right[0] = ArmRef::Forward(ArmId(1));
            arm.sequence_index = Some(3);
        }
        arena.request_arm();
        arena.request_arm();
        assert!(!arena.arms_available());

        arena.reset();
        assert!(arena.arms_available());
        assert_eq!(arena.allocated(), 0);
        let again = arena.request_arm().unwrap();
        assert_eq!(again, id);
        assert_eq!(*arena.arm(again), Arm::detached(again));
    }

    #[test]
    fn reserve_same_capacity_does_not_reallocate() {
        let mut arena = ArmArena::with_capacity(16);
        for _ in 0..16 {
            arena.request_arm();
        }
        let before = arena.allocated_arms().as_ptr();
        arena.reserve(16);
        for _ in 0..16 {
            arena.request_arm();
        }
        assert_eq!(arena.allocated_arms().as_ptr(), before);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut arena = ArmArena::with_capacity(usize::MAX / 2);
        assert_eq!(arena.capacity(), usize::MAX / 2);
        assert_eq!(arena.allocated_arms().len(), 0);
        assert_eq!(arena.request_arm(), Some(ArmId(0)));
        assert_eq!(arena.allocated(), 1);
    }

    #[test]
    fn reserve_changes_capacity() {
        let mut arena = ArmArena::with_capacity(1);
        arena.reserve(4);
        assert_eq!(arena.capacity(), 4);
        for _ in 0..4 {
            assert!(arena.request_arm().is_some());
        }
        assert!(arena.request_arm().is_none());
        arena.reserve(2);
        assert_eq!(arena.remaining(), 2);
    }

    #[test]
    fn get_rejects_unallocated_ids() {
        let mut arena = ArmArena::with_capacity(4);
        arena.request_arm();
        assert!(arena.get(ArmId(0)).is_some());
        assert!(arena.get(ArmId(1)).is_none());
        assert!(arena.get_mut(ArmId(3)).is_none());
    }

    #[test]
    #[should_panic(expected = "not allocated")]
    fn arm_panics_on_unallocated_id() {
        let arena = ArmArena::with_capacity(4);
        arena.arm(ArmId(0));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn allocated_never_exceeds_capacity(
                capacity in 0usize..64,
                requests in 0usize..128,
            ) {
                let mut arena = ArmArena::with_capacity(capacity);
                let granted = (0..requests).filter(|_| arena.request_arm().is_some()).count();
                prop_assert_eq!(granted, requests.min(capacity));
                prop_assert_eq!(arena.allocated(), granted);
                prop_assert_eq!(arena.arms_available(), requests <= capacity);
            }
        }
    }
}
