// Copyright (c) Microsoft. All rights reserved.

use std::sync::Mutex;

use crate::{Error, ReloadNotifier};

/// Records reload requests instead of signalling anything, for tests.
#[derive(Default)]
pub struct FakeNotifier {
    pub notify_count: Mutex<u32>,
    /// When set, every notify call reports a delivery failure.
    pub fail_requests: Mutex<bool>,
}

#[async_trait::async_trait]
impl ReloadNotifier for FakeNotifier {
    async fn notify(&self) -> Result<(), Error> {
        *self.notify_count.lock().unwrap() += 1;

        if *self.fail_requests.lock().unwrap() {
            return Err(Error::SignalDelivery("pid 7: EPERM".to_string()));
        }

        Ok(())
    }
}
