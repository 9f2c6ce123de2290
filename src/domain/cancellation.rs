use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::domain::errors::AppError;

type CancelHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct TokenState {
    cancelled: bool,
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
    hooks: Vec<CancelHook>,
}

/// Cancellation scoped to a view's lifetime.
///
/// Clones share state. Cancelling aborts every future currently running under
/// [`CancellationToken::run`], runs the registered hooks once, and makes every
/// later `run` fail immediately with [`AppError::Cancelled`].
#[derive(Clone, Default)]
pub struct CancellationToken {
    state: Rc<RefCell<TokenState>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    pub fn cancel(&self) {
        let (handles, hooks) = {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            (std::mem::take(&mut state.handles), std::mem::take(&mut state.hooks))
        };
        for (_, handle) in handles {
            handle.abort();
        }
        // Hooks run with the borrow released so they may query the token.
        for hook in hooks {
            hook();
        }
    }

    /// Register a hook for cancellation. Runs immediately when already cancelled.
    pub fn on_cancel(&self, hook: impl FnOnce() + 'static) {
        let mut state = self.state.borrow_mut();
        if state.cancelled {
            drop(state);
            hook();
        } else {
            state.hooks.push(Box::new(hook));
        }
    }

    /// Drive `fut` unless the token is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, AppError> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return Err(AppError::Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.handles.push((id, handle));
            id
        };

        let result = Abortable::new(fut, registration).await;
        self.state.borrow_mut().handles.retain(|(handle_id, _)| *handle_id != id);
        result.map_err(|_| AppError::Cancelled)
    }

    #[cfg(test)]
    fn pending_handles(&self) -> usize {
        self.state.borrow().handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn run_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let value = block_on(token.run(async { 7 }));
        assert_eq!(value, Ok(7));
        assert_eq!(token.pending_handles(), 0);
    }

    #[test]
    fn run_after_cancel_fails_fast() {
        let token = CancellationToken::new();
        token.cancel();
        let polled = Rc::new(Cell::new(false));
        let flag = polled.clone();
        let result = block_on(token.run(async move { flag.set(true) }));
        assert_eq!(result, Err(AppError::Cancelled));
        assert!(!polled.get());
    }

    #[test]
    fn cancel_inside_running_future_aborts_it() {
        let token = CancellationToken::new();
        let inner = token.clone();
        let result = block_on(token.run(async move {
            inner.cancel();
            futures::future::pending::<()>().await;
        }));
        assert_eq!(result, Err(AppError::Cancelled));
    }

    #[test]
    fn hooks_run_once() {
        let token = CancellationToken::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        token.on_cancel(move || c.set(c.get() + 1));
        token.cancel();
        token.cancel();
        assert_eq!(count.get(), 1);

        let late = count.clone();
        token.on_cancel(move || late.set(late.get() + 10));
        assert_eq!(count.get(), 11);
    }
}
