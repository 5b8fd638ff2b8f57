/// Largest parameter block an HCI command can carry.
pub const MAX_HCI_PARAMETER_LEN: usize = 255;

/// Controls APCF command encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApcfConfig {
    /// Maximum encoded parameter length per command. Default: 255.
    pub max_parameter_len: usize,
    /// Head room reserved in front of the HCI command header in built frames.
    pub frame_offset: u16,
}

impl Default for ApcfConfig {
    fn default() -> Self {
        Self {
            max_parameter_len: MAX_HCI_PARAMETER_LEN,
            frame_offset: 0,
        }
    }
}
