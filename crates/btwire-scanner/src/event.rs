use std::sync::mpsc::Sender;

use btwire_apcf::{Address, ApcfAction, ApcfFilterType, BtUuid};
use serde::Serialize;
use tracing::warn;

use crate::manager::ScannerId;

/// Status value reported for a successful operation.
pub const STATUS_SUCCESS: u8 = 0;

/// One advertisement received while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub event_type: u16,
    pub address_type: u8,
    pub address: Address,
    pub primary_phy: u8,
    pub secondary_phy: u8,
    pub advertising_sid: u8,
    pub tx_power: i8,
    pub rssi: i8,
    pub periodic_advertising_interval: u16,
    pub advertising_data: Vec<u8>,
}

impl ScanResult {
    /// Iterate the AD structures of the advertising data.
    pub fn ad_structures(&self) -> AdStructures<'_> {
        AdStructures::new(&self.advertising_data)
    }
}

/// A single length-type-value element of advertising data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdStructure<'a> {
    pub ad_type: u8,
    pub data: &'a [u8],
}

/// Iterator over AD structures.
///
/// Stops at a zero length byte (significant-part padding) or at an element
/// that runs past the end of the buffer.
#[derive(Debug, Clone)]
pub struct AdStructures<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> AdStructures<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = AdStructure<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = *self.buf.get(self.pos)? as usize;
        let end = self.pos + 1 + len;
        if len == 0 || end > self.buf.len() {
            self.pos = self.buf.len();
            return None;
        }
        let item = AdStructure {
            ad_type: self.buf[self.pos + 1],
            data: &self.buf[self.pos + 2..end],
        };
        self.pos = end;
        Some(item)
    }
}

/// Events relayed from the scanning manager, plus shim-side completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScannerEvent {
    ScannerRegistered {
        app_uuid: BtUuid,
        scanner_id: ScannerId,
        status: u8,
    },
    ScanResult(ScanResult),
    ScanParametersSet {
        status: u8,
    },
    FilterEnable {
        enable: bool,
        status: u8,
    },
    FilterParamSetup {
        available_spaces: u8,
        action: ApcfAction,
        status: u8,
    },
    FilterConfig {
        filter_type: Option<ApcfFilterType>,
        available_spaces: u8,
        action: ApcfAction,
        status: u8,
    },
}

/// Inbound callback handle given to the scanning manager.
///
/// Cloneable; every clone feeds the same receiver. If the receiver has been
/// dropped, events are logged and discarded.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<ScannerEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<ScannerEvent>) -> Self {
        Self { tx }
    }

    pub fn on_scanner_registered(&self, app_uuid: BtUuid, scanner_id: ScannerId, status: u8) {
        self.send(ScannerEvent::ScannerRegistered {
            app_uuid,
            scanner_id,
            status,
        });
    }

    pub fn on_scan_result(&self, result: ScanResult) {
        self.send(ScannerEvent::ScanResult(result));
    }

    pub fn on_scan_parameters_set(&self, status: u8) {
        self.send(ScannerEvent::ScanParametersSet { status });
    }

    pub fn on_filter_enable(&self, enable: bool, status: u8) {
        self.send(ScannerEvent::FilterEnable { enable, status });
    }

    pub fn on_filter_param_setup(&self, available_spaces: u8, action: ApcfAction, status: u8) {
        self.send(ScannerEvent::FilterParamSetup {
            available_spaces,
            action,
            status,
        });
    }

    pub fn on_filter_config(
        &self,
        filter_type: Option<ApcfFilterType>,
        available_spaces: u8,
        action: ApcfAction,
        status: u8,
    ) {
        self.send(ScannerEvent::FilterConfig {
            filter_type,
            available_spaces,
            action,
            status,
        });
    }

    fn send(&self, event: ScannerEvent) {
        if let Err(err) = self.tx.send(event) {
            warn!(event = ?err.0, "scanner event receiver dropped");
        }
    }
}
