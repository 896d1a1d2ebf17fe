use crate::ChannelId;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(
        "Handle for channel {channel_id} declares no release operation {location}"
    )]
    InertHandle {
        channel_id: ChannelId,
        location: ErrorLocation,
    },

    #[error("Channel limit exceeded: {current} channels (max: {max}) {location}")]
    ChannelLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
