/// Session state of a [`RenderContext`](crate::RenderContext).
///
/// ```text
/// Uninitialized -> Loading -> Ready <-> Resizing
///                     |         |
///                     +---------+--> Disposed
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    /// Awaiting the backdrop texture and the model.
    Loading,
    /// Frame loop active.
    Ready,
    /// Inside the synchronous resize; returns to `Ready` before the call ends.
    Resizing,
    Disposed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid lifecycle transition {from:?} -> {to:?}")]
pub struct LifecycleError {
    pub from: Lifecycle,
    pub to: Lifecycle,
}

impl Lifecycle {
    pub fn can_transition(self, to: Lifecycle) -> bool {
        use Lifecycle::*;
        matches!(
            (self, to),
            (Uninitialized, Loading)
                | (Loading, Ready)
                | (Ready, Resizing)
                | (Resizing, Ready)
                | (Loading | Ready, Disposed)
        )
    }

    pub fn transition(&mut self, to: Lifecycle) -> Result<(), LifecycleError> {
        if !self.can_transition(to) {
            return Err(LifecycleError { from: *self, to });
        }
        log::trace!("lifecycle {:?} -> {to:?}", self);
        *self = to;
        Ok(())
    }

    /// Frames run only in `Ready`.
    pub fn ensure_ready(self) -> Result<(), LifecycleError> {
        if self == Lifecycle::Ready {
            Ok(())
        } else {
            Err(LifecycleError { from: self, to: Lifecycle::Ready })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut s = Lifecycle::default();
        for next in [Lifecycle::Loading, Lifecycle::Ready, Lifecycle::Resizing, Lifecycle::Ready, Lifecycle::Disposed] {
            s.transition(next).unwrap();
        }
        assert_eq!(s, Lifecycle::Disposed);
    }

    #[test]
    fn cannot_skip_loading() {
        let mut s = Lifecycle::Uninitialized;
        let err = s.transition(Lifecycle::Ready).unwrap_err();
        assert_eq!(err, LifecycleError { from: Lifecycle::Uninitialized, to: Lifecycle::Ready });
        assert_eq!(s, Lifecycle::Uninitialized);
    }

    #[test]
    fn disposed_is_terminal() {
        let mut s = Lifecycle::Disposed;
        assert!(s.transition(Lifecycle::Ready).is_err());
        assert!(s.ensure_ready().is_err());
    }
}
