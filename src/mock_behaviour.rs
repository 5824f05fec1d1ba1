//! This module provides ways to tweak an [`InMemoryRemote`](crate::memory::InMemoryRemote), so that it can return errors on some tests

use crate::error::RemoteError;

/// This stores some behaviour tweaks, that describe how a mocked remote source will behave during a given test
///
/// So that an operation fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every operation will be allowed
    pub is_suspended: bool,

    pub fetch_tasks_behaviour: (u32, u32),
    pub add_task_behaviour: (u32, u32),
    pub toggle_task_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_tasks_behaviour: (0, n_fails),
            add_task_behaviour: (0, n_fails),
            toggle_task_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_tasks(&mut self) -> Result<(), RemoteError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_tasks_behaviour, "fetch_tasks")
    }
    pub fn can_add_task(&mut self) -> Result<(), RemoteError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.add_task_behaviour, "add_task")
    }
    pub fn can_toggle_task(&mut self) -> Result<(), RemoteError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.toggle_task_behaviour, "toggle_task")
    }
    pub fn can_delete_task(&mut self) -> Result<(), RemoteError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), RemoteError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(RemoteError::Unavailable(format!("mocked behaviour requires this {} to fail this time ({:?})", descr, value)))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_fetch_tasks().is_ok());
        assert!(ok.can_fetch_tasks().is_ok());
        assert!(ok.can_fetch_tasks().is_ok());
        assert!(ok.can_add_task().is_ok());
        assert!(ok.can_toggle_task().is_ok());
        assert!(ok.can_delete_task().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_delete_task().is_err());
        assert!(now.can_delete_task().is_err());
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_fetch_tasks().is_ok());
        assert!(now.can_fetch_tasks().is_ok());
        assert!(now.can_delete_task().is_ok());

        let mut custom = MockBehaviour {
            fetch_tasks_behaviour: (0, 1),
            toggle_task_behaviour: (1, 3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_fetch_tasks().is_err());
        assert!(custom.can_fetch_tasks().is_ok());
        assert!(custom.can_fetch_tasks().is_ok());
        assert!(custom.can_toggle_task().is_ok());
        assert!(custom.can_toggle_task().is_err());
        assert!(custom.can_toggle_task().is_err());
        assert!(custom.can_toggle_task().is_err());
        assert!(custom.can_toggle_task().is_ok());
        assert!(custom.can_toggle_task().is_ok());
    }

    #[test]
    fn suspended_behaviours_allow_everything() {
        let mut behaviour = MockBehaviour::fail_now(2);
        behaviour.suspend();
        assert!(behaviour.can_fetch_tasks().is_ok());
        behaviour.resume();
        assert!(behaviour.can_fetch_tasks().is_err());
    }
}
