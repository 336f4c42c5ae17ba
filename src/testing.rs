use crate::memory::{MemoryInfo, MemoryStatus};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use tokio::time::Instant;

pub enum Reply {
    Status(MemoryStatus),
    Fail,
    Panic,
}

/// A memory provider replaying scripted replies; the last reply repeats.
pub struct FakeMemory {
    replies: RefCell<VecDeque<Reply>>,
    calls: Rc<RefCell<Vec<Instant>>>,
}

impl FakeMemory {
    pub fn new(available_bytes: u64, total_bytes: u64) -> Self {
        Self::scripted([Reply::Status(MemoryStatus {
            available_bytes,
            total_bytes,
        })])
    }

    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            calls: Default::default(),
        }
    }

    /// When each fetch happened, still readable after the provider is boxed away.
    pub fn calls(&self) -> Rc<RefCell<Vec<Instant>>> {
        self.calls.clone()
    }
}

impl MemoryInfo for FakeMemory {
    fn fetch(&self) -> io::Result<MemoryStatus> {
        self.calls.borrow_mut().push(Instant::now());

        let mut replies = self.replies.borrow_mut();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            None
        };
        match reply.as_ref().or(replies.front()) {
            Some(Reply::Status(status)) => Ok(*status),
            Some(Reply::Fail) | None => Err(io::Error::other("scripted failure")),
            Some(Reply::Panic) => panic!("scripted panic"),
        }
    }
}
