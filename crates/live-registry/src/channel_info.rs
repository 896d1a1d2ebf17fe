use crate::{ChannelId, ReleaseCapabilities};

use chrono::DateTime;

/// Information about an active channel registration
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub channel_id: ChannelId,
    pub registered_at: DateTime<chrono::Utc>,
    pub capabilities: ReleaseCapabilities,
}
