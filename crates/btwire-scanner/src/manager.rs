use btwire_apcf::{
    AdvertisingFilterParameter, AdvertisingPacketContentFilterCommand, ApcfAction, BtUuid,
};

use crate::config::ScanType;
use crate::event::EventSink;

pub type ScannerId = u8;

/// The external scanning stack the shim forwards to.
///
/// Requests are fire-and-forget; results come back through the
/// [`EventSink`] handed over in [`ScanningManager::register_callback`].
pub trait ScanningManager {
    fn register_scanner(&mut self, app_uuid: BtUuid);

    fn unregister(&mut self, scanner_id: ScannerId);

    fn scan(&mut self, start: bool);

    /// Interval and window in units of 0.625 ms.
    fn set_scan_parameters(&mut self, scan_type: ScanType, interval: u16, window: u16);

    fn scan_filter_parameter_setup(
        &mut self,
        action: ApcfAction,
        filter_index: u8,
        parameter: AdvertisingFilterParameter,
    );

    fn scan_filter_add(
        &mut self,
        filter_index: u8,
        filters: Vec<AdvertisingPacketContentFilterCommand>,
    );

    fn scan_filter_enable(&mut self, enable: bool);

    fn register_callback(&mut self, sink: EventSink);
}
