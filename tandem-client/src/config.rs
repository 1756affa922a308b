use tandem_core::IceServerConfig;

/// ICE configuration handed to the peer-media subsystem when a call session
/// is set up.
#[derive(Debug, Clone)]
pub struct RtcConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig {
                urls: vec![
                    "stun:stun.l.google.com:19302".to_owned(),
                    "stun:global.stun.twilio.com:3478".to_owned(),
                ],
                username: None,
                credential: None,
            }],
        }
    }
}
