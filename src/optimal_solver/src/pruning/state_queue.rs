use std::num::NonZeroUsize;

/// A fixed capacity FIFO ring buffer of packed states. Pushing onto a full
/// queue drops the oldest state to make room.
pub struct StateQueue {
    buffer: Box<[u64]>,
    head: usize,
    len: usize,
    overwritten: u64,
}

impl StateQueue {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            buffer: vec![0; capacity.get()].into_boxed_slice(),
            head: 0,
            len: 0,
            overwritten: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many states were dropped by pushes onto a full queue.
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    pub fn push(&mut self, state: u64) {
        let capacity = self.buffer.len();
        let tail = (self.head + self.len) % capacity;
        self.buffer[tail] = state;
        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
            self.overwritten += 1;
        } else {
            self.len += 1;
        }
    }

    pub fn pop(&mut self) -> Option<u64> {
        if self.len == 0 {
            return None;
        }
        let state = self.buffer[self.head];
        self.head = (self.head + 1) % self.buffer.len();
        self.len -= 1;
        Some(state)
    }
}
