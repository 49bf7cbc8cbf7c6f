use crate::configurable;
use crate::pipeline::Messenger;
use std::any::Any;

/// No-op reporter, used when a document declares no messenger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeMessenger;

impl FakeMessenger {
    /// Registered type name
    pub const KIND: &'static str = crate::pipeline::FAKE_MESSENGER;

    /// Fresh instance
    #[must_use]
    pub fn boxed() -> Box<dyn Messenger> {
        Box::new(Self)
    }
}

configurable!(FakeMessenger {});

impl Messenger for FakeMessenger {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reports to a Slack channel through an incoming webhook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlackMessenger {
    /// Target channel, e.g. `#ops`
    pub channel: String,
    /// Display name for posted messages
    pub username: Option<String>,
    /// Icon URL for posted messages
    pub icon: Option<String>,
    /// Incoming webhook URL
    pub url: String,
}

impl SlackMessenger {
    /// Registered type name
    pub const KIND: &'static str = "slack";

    /// Fresh unconfigured instance
    #[must_use]
    pub fn boxed() -> Box<dyn Messenger> {
        Box::new(Self::default())
    }
}

configurable!(SlackMessenger {
    "channel" => channel,
    "username" => username,
    "icon" => icon,
    "url" => url,
});

impl Messenger for SlackMessenger {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reports to a HipChat room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HipChatMessenger {
    /// Room to post to
    pub room_id: String,
    /// API token
    pub token: String,
    /// Sender name
    pub from: Option<String>,
    /// Server base URL, for self-hosted instances
    pub base_url: Option<String>,
}

impl HipChatMessenger {
    /// Registered type name
    pub const KIND: &'static str = "hipchat";

    /// Fresh unconfigured instance
    #[must_use]
    pub fn boxed() -> Box<dyn Messenger> {
        Box::new(Self::default())
    }
}

configurable!(HipChatMessenger {
    "room_id" => room_id,
    "token" => token,
    "from" => from,
    "base_url" => base_url,
});

impl Messenger for HipChatMessenger {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
