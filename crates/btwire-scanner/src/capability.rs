use btwire_apcf::{Address, ApcfAction, ApcfCommand, BtUuid, FilterParamSetup};

use crate::error::{Result, ScannerError};
use crate::manager::ScannerId;

/// Scanner registration and scan control.
pub trait ScannerControl {
    fn register_scanner(&mut self, app_uuid: BtUuid) -> Result<()>;

    fn unregister(&mut self, scanner_id: ScannerId) -> Result<()>;

    fn scan(&mut self, start: bool) -> Result<()>;

    /// Interval and window in units of 0.625 ms, one entry per PHY in `scan_phy`.
    fn set_scan_parameters(
        &mut self,
        scan_phy: u8,
        scan_interval: &[u32],
        scan_window: &[u32],
    ) -> Result<()>;
}

/// Advertising packet content filter configuration.
pub trait FilterControl {
    /// `setup == None` applies the default parameters.
    fn scan_filter_param_setup(
        &mut self,
        action: ApcfAction,
        filter_index: u8,
        setup: Option<&FilterParamSetup>,
    ) -> Result<()>;

    /// Translate and install every filter of `filters`, or none of them.
    fn scan_filter_add(&mut self, filter_index: u8, filters: &[ApcfCommand]) -> Result<()>;

    fn scan_filter_clear(&mut self, _filter_index: u8) -> Result<()> {
        Err(ScannerError::Unsupported("scan_filter_clear"))
    }

    fn scan_filter_enable(&mut self, enable: bool) -> Result<()>;
}

/// Controller-side batch scan storage.
pub trait BatchScan {
    fn batchscan_config_storage(
        &mut self,
        _client_if: u8,
        _full_max: u8,
        _trunc_max: u8,
        _notify_threshold: u8,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("batchscan_config_storage"))
    }

    fn batchscan_enable(
        &mut self,
        _scan_mode: u8,
        _scan_interval: u32,
        _scan_window: u32,
        _addr_type: u8,
        _discard_rule: u8,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("batchscan_enable"))
    }

    fn batchscan_disable(&mut self) -> Result<()> {
        Err(ScannerError::Unsupported("batchscan_disable"))
    }

    fn batchscan_read_reports(&mut self, _client_if: u8, _scan_mode: u8) -> Result<()> {
        Err(ScannerError::Unsupported("batchscan_read_reports"))
    }
}

/// Periodic advertising sync and sync transfer.
pub trait PeriodicSync {
    fn start_sync(
        &mut self,
        _sid: u8,
        _address: Address,
        _skip: u16,
        _timeout: u16,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("start_sync"))
    }

    fn stop_sync(&mut self, _handle: u16) -> Result<()> {
        Err(ScannerError::Unsupported("stop_sync"))
    }

    fn cancel_create_sync(&mut self, _sid: u8, _address: Address) -> Result<()> {
        Err(ScannerError::Unsupported("cancel_create_sync"))
    }

    fn transfer_sync(
        &mut self,
        _address: Address,
        _service_data: u16,
        _sync_handle: u16,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("transfer_sync"))
    }

    fn transfer_set_info(
        &mut self,
        _address: Address,
        _service_data: u16,
        _adv_handle: u8,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("transfer_set_info"))
    }

    fn sync_tx_parameters(
        &mut self,
        _address: Address,
        _mode: u8,
        _skip: u16,
        _timeout: u16,
    ) -> Result<()> {
        Err(ScannerError::Unsupported("sync_tx_parameters"))
    }
}
