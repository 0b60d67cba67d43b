/// Callback invoked once per emitted host line with `(level, tag, message)`.
pub type LogCallback = Box<dyn FnMut(u8, &str, &str) + Send>;

/// Registration handle returned by [`LogCallbacks::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackHandle(usize);

impl CallbackHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// FIFO subscription list owned by the host logging subsystem.
///
/// Callbacks run synchronously, in registration order, on the emitting
/// thread. A callback must not emit into the registry it is called from.
#[derive(Default)]
pub struct LogCallbacks {
    callbacks: Vec<LogCallback>,
}

impl LogCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, callback: F) -> CallbackHandle
    where
        F: FnMut(u8, &str, &str) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
        CallbackHandle(self.callbacks.len() - 1)
    }

    pub fn emit(&mut self, level: u8, tag: &str, message: &str) {
        for callback in &mut self.callbacks {
            callback(level, tag, message);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for LogCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogCallbacks")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_emit_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut callbacks = LogCallbacks::new();

        let first = seen.clone();
        let handle = callbacks.register(move |level, tag, _| {
            first.lock().push(format!("first:{level}:{tag}"));
        });
        let second = seen.clone();
        callbacks.register(move |_, _, message| {
            second.lock().push(format!("second:{message}"));
        });

        callbacks.emit(3, "wifi", "up");
        assert_eq!(handle.index(), 0);
        assert_eq!(callbacks.len(), 2);
        assert_eq!(
            *seen.lock(),
            vec!["first:3:wifi".to_string(), "second:up".to_string()]
        );
    }
}
