use std::fmt;
use std::sync::Arc;

use crate::limits::Limits;
use crate::tiling::TilePolicy;

/// Destination for one-line warnings.
///
/// Handed to each image at construction. The default forwards to
/// [`log::warn!`] with target `zentiles`.
#[derive(Clone)]
pub struct LogSink(Arc<dyn Fn(&str) + Send + Sync>);

impl LogSink {
    pub fn from_fn(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Discard all messages.
    pub fn silent() -> Self {
        Self::from_fn(|_| {})
    }

    pub fn warn(&self, message: &str) {
        (self.0)(message)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::from_fn(|message| log::warn!(target: "zentiles", "{message}"))
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink")
    }
}

/// Settings shared by every image a backend opens.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub limits: Limits,
    pub tile_policy: TilePolicy,
    pub log: LogSink,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            limits: Limits::size_guarded(),
            tile_policy: TilePolicy::default(),
            log: LogSink::default(),
        }
    }
}

impl BackendConfig {
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_tile_policy(mut self, policy: TilePolicy) -> Self {
        self.tile_policy = policy;
        self
    }

    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn default_is_size_guarded() {
        let config = BackendConfig::default();
        assert_eq!(config.limits, Limits::size_guarded());
        assert_eq!(config.tile_policy, TilePolicy::SquareWithRemainder);
    }

    #[test]
    fn sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            LogSink::from_fn(move |m| seen.lock().unwrap().push(m.to_owned()))
        };
        sink.warn("first");
        sink.clone().warn("second");
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }
}
