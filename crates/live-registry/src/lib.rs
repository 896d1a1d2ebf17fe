pub mod channel_id;
pub mod channel_info;
pub mod connection_pool;
pub mod error;
pub mod live_channel;
pub mod metrics;
pub mod registry;
pub mod registry_stats;

pub use channel_id::ChannelId;
pub use channel_info::ChannelInfo;
pub use connection_pool::PooledConnection;
pub use error::{RegistryError, Result};
pub use live_channel::{HandleError, LiveChannel, ReleaseCapabilities};
pub use metrics::Metrics;
pub use registry::LiveRegistry;
pub use registry_stats::RegistryStats;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for a scheduled handle release.
/// All log entries within the release will include the channel id.
pub fn create_release_span(channel_id: &ChannelId) -> tracing::Span {
    info_span!("channel_release", channel_id = %channel_id)
}
