//! Async fetch lifecycle for a piece of remote data.

/// State of a remotely fetched value.
///
/// Replaces the ad-hoc `loading`/`error`/`data` triple a UI would
/// otherwise track per slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resource<T> {
    /// Never requested.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Last request succeeded.
    Ready(T),
    /// Last request failed with a display message.
    Failed(String),
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Resource::Ready(_))
    }

    /// The value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Apply a fetch result.
    pub fn resolve(&mut self, result: Result<T, impl std::fmt::Display>) {
        *self = match result {
            Ok(value) => Resource::Ready(value),
            Err(err) => Resource::Failed(err.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut resource: Resource<i32> = Resource::default();
        assert!(!resource.is_loading());
        assert!(resource.ready().is_none());

        resource = Resource::Loading;
        assert!(resource.is_loading());

        resource.resolve(Ok::<_, String>(42));
        assert_eq!(resource.ready(), Some(&42));

        resource.resolve(Err::<i32, _>("network down"));
        assert_eq!(resource.error(), Some("network down"));
        assert!(!resource.is_ready());
    }
}
