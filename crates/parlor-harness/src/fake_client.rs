//! Recording fake for the external call-URL client.

use std::cell::RefCell;

use parlor_core::CallUrlClient;

/// [`CallUrlClient`] implementation that records requested nicknames.
///
/// Tests deliver outcomes by calling
/// [`CallUrlFlow::resolve`](parlor_core::CallUrlFlow::resolve) or
/// [`CallUrlFlow::fail`](parlor_core::CallUrlFlow::fail) themselves.
#[derive(Debug, Default)]
pub struct FakeCallUrlClient {
    requests: RefCell<Vec<String>>,
}

impl FakeCallUrlClient {
    /// Create a fake with no recorded requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nicknames requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl CallUrlClient for FakeCallUrlClient {
    fn request_call_url(&self, nickname: &str) {
        self.requests.borrow_mut().push(nickname.to_owned());
    }
}
