use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// How the controller reports advertisements that pass a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeliveryMode {
    #[default]
    Immediate = 0,
    /// Track the advertiser; report when found and when lost.
    OnFound = 1,
    Batched = 2,
}

impl TryFrom<u8> for DeliveryMode {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Immediate),
            1 => Ok(Self::OnFound),
            2 => Ok(Self::Batched),
            other => Err(FilterError::InvalidDeliveryMode(other)),
        }
    }
}

/// Caller form of a filter parameter setup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParamSetup {
    pub feat_seln: u16,
    pub list_logic_type: u16,
    pub filt_logic_type: u8,
    pub rssi_high_thres: i8,
    pub rssi_low_thres: i8,
    pub dely_mode: u8,
    pub found_timeout: u16,
    pub found_timeout_cnt: u8,
    pub lost_timeout: u16,
    pub num_of_tracking_entries: u16,
}

/// Per-filter-index controller configuration.
///
/// The on-found fields (`onfound_timeout` through `num_of_tracking_entries`)
/// are only meaningful under [`DeliveryMode::OnFound`]. Under any other mode
/// they are zero and are not encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AdvertisingFilterParameter {
    pub feature_selection: u16,
    pub list_logic_type: u16,
    pub filter_logic_type: u8,
    pub rssi_high_thresh: i8,
    pub delivery_mode: DeliveryMode,
    pub onfound_timeout: u16,
    pub onfound_timeout_cnt: u8,
    pub rssi_low_thresh: i8,
    pub onlost_timeout: u16,
    pub num_of_tracking_entries: u16,
}

impl AdvertisingFilterParameter {
    /// Build from an optional setup; `None` yields the all-default parameter.
    pub fn from_setup(setup: Option<&FilterParamSetup>) -> Result<Self, FilterError> {
        setup.map_or_else(|| Ok(Self::default()), Self::try_from)
    }

    pub fn tracks_on_found(&self) -> bool {
        self.delivery_mode == DeliveryMode::OnFound
    }
}

impl TryFrom<&FilterParamSetup> for AdvertisingFilterParameter {
    type Error = FilterError;

    fn try_from(setup: &FilterParamSetup) -> Result<Self, Self::Error> {
        let delivery_mode = DeliveryMode::try_from(setup.dely_mode)?;
        let mut param = Self {
            feature_selection: setup.feat_seln,
            list_logic_type: setup.list_logic_type,
            filter_logic_type: setup.filt_logic_type,
            rssi_high_thresh: setup.rssi_high_thres,
            delivery_mode,
            ..Self::default()
        };
        if delivery_mode == DeliveryMode::OnFound {
            param.onfound_timeout = setup.found_timeout;
            param.onfound_timeout_cnt = setup.found_timeout_cnt;
            param.rssi_low_thresh = setup.rssi_low_thres;
            param.onlost_timeout = setup.lost_timeout;
            param.num_of_tracking_entries = setup.num_of_tracking_entries;
        }
        Ok(param)
    }
}
