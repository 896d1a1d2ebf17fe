/// Error payload produced by a handle's release operations or a debounced
/// callback. Handles wrap caller-owned transports, so the concrete error
/// type is theirs.
pub type HandleError = Box<dyn std::error::Error + Send + Sync>;

/// Release operations a handle declares up front.
///
/// Declared capabilities are checked once, at registration time, so a
/// handle that supports no release operation at all is rejected there
/// instead of silently leaking later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseCapabilities {
    pub unsubscribe: bool,
    pub close: bool,
}

impl ReleaseCapabilities {
    pub fn unsubscribe_and_close() -> Self {
        Self {
            unsubscribe: true,
            close: true,
        }
    }

    pub fn unsubscribe_only() -> Self {
        Self {
            unsubscribe: true,
            close: false,
        }
    }

    pub fn close_only() -> Self {
        Self {
            unsubscribe: false,
            close: true,
        }
    }

    /// A handle with no declared release operation cannot be registered.
    pub fn is_inert(&self) -> bool {
        !self.unsubscribe && !self.close
    }
}

/// A live handle to one remote change-notification stream.
///
/// The registry takes exclusive ownership at registration and invokes the
/// declared release operations exactly once, in order: `unsubscribe`, then
/// `close`. Undeclared operations are skipped.
pub trait LiveChannel: Send + 'static {
    /// Release operations this handle supports. Checked at registration.
    fn capabilities(&self) -> ReleaseCapabilities;

    fn unsubscribe(&mut self) -> Result<(), HandleError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), HandleError> {
        Ok(())
    }
}
