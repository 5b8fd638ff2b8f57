use std::sync::mpsc::{self, Receiver};

use btwire_apcf::{
    AdvertisingFilterParameter, ApcfAction, ApcfCommand, BtUuid, FilterParamSetup, Translator,
};
use tracing::{debug, info};

use crate::capability::{BatchScan, FilterControl, PeriodicSync, ScannerControl};
use crate::config::ScannerConfig;
use crate::error::{Result, ScannerError};
use crate::event::{EventSink, ScannerEvent, STATUS_SUCCESS};
use crate::manager::{ScannerId, ScanningManager};

/// Scanner shim owning its scanning manager.
///
/// Construct with [`BleScanner::new`], call [`BleScanner::init`] to hand the
/// manager its callback sink, and [`BleScanner::shutdown`] to take the
/// manager back.
pub struct BleScanner<M> {
    manager: M,
    config: ScannerConfig,
    sink: EventSink,
    translator: Translator,
    initialized: bool,
}

impl<M: ScanningManager> BleScanner<M> {
    /// Create a scanner and the receiving end of its event channel.
    pub fn new(manager: M, config: ScannerConfig) -> (Self, Receiver<ScannerEvent>) {
        let (tx, rx) = mpsc::channel();
        let scanner = Self {
            manager,
            config,
            sink: EventSink::new(tx),
            translator: Translator::new(),
            initialized: false,
        };
        (scanner, rx)
    }

    /// Register the event sink with the manager. Calling twice is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.manager.register_callback(self.sink.clone());
        self.initialized = true;
        debug!("scanner callbacks registered");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// A handle for emitting events into this scanner's channel.
    pub fn sink(&self) -> &EventSink {
        &self.sink
    }

    /// Tear down the scanner and return the manager.
    pub fn shutdown(self) -> M {
        debug!("scanner shut down");
        self.manager
    }

    fn complete(&self, emit: impl FnOnce(&EventSink)) {
        if self.config.synthesize_completions {
            emit(&self.sink);
        }
    }
}

impl<M: ScanningManager> ScannerControl for BleScanner<M> {
    fn register_scanner(&mut self, app_uuid: BtUuid) -> Result<()> {
        info!(%app_uuid, "register scanner");
        self.manager.register_scanner(app_uuid);
        Ok(())
    }

    fn unregister(&mut self, scanner_id: ScannerId) -> Result<()> {
        info!(scanner_id, "unregister scanner");
        self.manager.unregister(scanner_id);
        Ok(())
    }

    fn scan(&mut self, start: bool) -> Result<()> {
        info!(start, "scan");
        self.manager.scan(start);
        Ok(())
    }

    /// Only the first interval/window pair is used.
    fn set_scan_parameters(
        &mut self,
        scan_phy: u8,
        scan_interval: &[u32],
        scan_window: &[u32],
    ) -> Result<()> {
        let (Some(&interval), Some(&window)) = (scan_interval.first(), scan_window.first()) else {
            return Err(ScannerError::InvalidArgument(
                "scan interval and window must not be empty".into(),
            ));
        };
        let interval = u16::try_from(interval).map_err(|_| {
            ScannerError::InvalidArgument(format!("scan interval {interval} out of range"))
        })?;
        let window = u16::try_from(window).map_err(|_| {
            ScannerError::InvalidArgument(format!("scan window {window} out of range"))
        })?;
        if window > interval {
            return Err(ScannerError::InvalidArgument(format!(
                "scan window {window} exceeds interval {interval}"
            )));
        }

        info!(scan_phy, interval, window, "set scan parameters");
        self.manager
            .set_scan_parameters(self.config.scan_type, interval, window);
        self.complete(|sink| sink.on_scan_parameters_set(STATUS_SUCCESS));
        Ok(())
    }
}

impl<M: ScanningManager> FilterControl for BleScanner<M> {
    fn scan_filter_param_setup(
        &mut self,
        action: ApcfAction,
        filter_index: u8,
        setup: Option<&FilterParamSetup>,
    ) -> Result<()> {
        let parameter = AdvertisingFilterParameter::from_setup(setup)?;
        info!(?action, filter_index, "scan filter param setup");
        self.manager
            .scan_filter_parameter_setup(action, filter_index, parameter);
        self.complete(|sink| sink.on_filter_param_setup(0, action, STATUS_SUCCESS));
        Ok(())
    }

    fn scan_filter_add(&mut self, filter_index: u8, filters: &[ApcfCommand]) -> Result<()> {
        let commands = self.translator.translate_batch(filters)?;
        let filter_type = commands.first().map(|command| command.filter_type);
        info!(filter_index, count = commands.len(), "scan filter add");
        self.manager.scan_filter_add(filter_index, commands);
        self.complete(|sink| {
            sink.on_filter_config(filter_type, 0, ApcfAction::Add, STATUS_SUCCESS)
        });
        Ok(())
    }

    fn scan_filter_enable(&mut self, enable: bool) -> Result<()> {
        info!(enable, "scan filter enable");
        self.manager.scan_filter_enable(enable);
        self.complete(|sink| sink.on_filter_enable(enable, STATUS_SUCCESS));
        Ok(())
    }
}

impl<M: ScanningManager> BatchScan for BleScanner<M> {}

impl<M: ScanningManager> PeriodicSync for BleScanner<M> {}

#[cfg(test)]
mod tests {
    use btwire_apcf::{
        Address, AdvertisingPacketContentFilterCommand, ApcfFilterType, DeliveryMode,
        FilterError,
    };

    use super::*;
    use crate::config::ScanType;
    use crate::event::ScanResult;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Register(BtUuid),
        Unregister(ScannerId),
        Scan(bool),
        Params(ScanType, u16, u16),
        ParamSetup(ApcfAction, u8, AdvertisingFilterParameter),
        FilterAdd(u8, Vec<AdvertisingPacketContentFilterCommand>),
        FilterEnable(bool),
    }

    #[derive(Default)]
    struct MockManager {
        calls: Vec<Call>,
        sink: Option<EventSink>,
    }

    impl ScanningManager for MockManager {
        fn register_scanner(&mut self, app_uuid: BtUuid) {
            self.calls.push(Call::Register(app_uuid));
            if let Some(sink) = &self.sink {
                sink.on_scanner_registered(app_uuid, 7, STATUS_SUCCESS);
            }
        }

        fn unregister(&mut self, scanner_id: ScannerId) {
            self.calls.push(Call::Unregister(scanner_id));
        }

        fn scan(&mut self, start: bool) {
            self.calls.push(Call::Scan(start));
        }

        fn set_scan_parameters(&mut self, scan_type: ScanType, interval: u16, window: u16) {
            self.calls.push(Call::Params(scan_type, interval, window));
        }

        fn scan_filter_parameter_setup(
            &mut self,
            action: ApcfAction,
            filter_index: u8,
            parameter: AdvertisingFilterParameter,
        ) {
            self.calls
                .push(Call::ParamSetup(action, filter_index, parameter));
        }

        fn scan_filter_add(
            &mut self,
            filter_index: u8,
            filters: Vec<AdvertisingPacketContentFilterCommand>,
        ) {
            self.calls.push(Call::FilterAdd(filter_index, filters));
        }

        fn scan_filter_enable(&mut self, enable: bool) {
            self.calls.push(Call::FilterEnable(enable));
        }

        fn register_callback(&mut self, sink: EventSink) {
            self.sink = Some(sink);
        }
    }

    fn scanner() -> (BleScanner<MockManager>, Receiver<ScannerEvent>) {
        let (mut scanner, rx) = BleScanner::new(MockManager::default(), ScannerConfig::default());
        scanner.init();
        (scanner, rx)
    }

    fn uuid_filter(uuid: &str) -> ApcfCommand {
        ApcfCommand {
            filter_type: ApcfFilterType::ServiceUuid as u8,
            uuid: uuid.parse().unwrap(),
            ..ApcfCommand::default()
        }
    }

    #[test]
    fn register_relays_manager_callback() {
        let (mut scanner, rx) = scanner();
        assert!(scanner.is_initialized());
        let app = BtUuid::from_16bit(0xfeed);
        scanner.register_scanner(app).unwrap();

        assert_eq!(scanner.manager().calls, vec![Call::Register(app)]);
        assert_eq!(
            rx.try_recv().unwrap(),
            ScannerEvent::ScannerRegistered {
                app_uuid: app,
                scanner_id: 7,
                status: STATUS_SUCCESS
            }
        );
    }

    #[test]
    fn scan_results_flow_through_sink() {
        let (scanner, rx) = scanner();
        let result = ScanResult {
            event_type: 0x0010,
            address_type: 1,
            address: "C0:FF:EE:00:00:01".parse().unwrap(),
            primary_phy: 1,
            secondary_phy: 0,
            advertising_sid: 0xff,
            tx_power: 127,
            rssi: -40,
            periodic_advertising_interval: 0,
            advertising_data: vec![0x02, 0x01, 0x06],
        };
        let manager = scanner.shutdown();
        manager
            .sink
            .as_ref()
            .unwrap()
            .on_scan_result(result.clone());
        assert_eq!(rx.try_recv().unwrap(), ScannerEvent::ScanResult(result));
    }

    #[test]
    fn forwards_scan_control() {
        let (mut scanner, _rx) = scanner();
        scanner.scan(true).unwrap();
        scanner.unregister(3).unwrap();
        scanner.scan(false).unwrap();
        assert_eq!(
            scanner.shutdown().calls,
            vec![Call::Scan(true), Call::Unregister(3), Call::Scan(false)]
        );
    }

    #[test]
    fn scan_parameters_use_first_pair() {
        let (mut scanner, rx) = scanner();
        scanner
            .set_scan_parameters(1, &[0x60, 0x100], &[0x30, 0x80])
            .unwrap();
        assert_eq!(
            scanner.manager().calls,
            vec![Call::Params(ScanType::Active, 0x60, 0x30)]
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ScannerEvent::ScanParametersSet { status: 0 }
        );
    }

    #[test]
    fn scan_parameters_validated() {
        let (mut scanner, _rx) = scanner();
        for (interval, window) in [
            (&[][..], &[0x30][..]),
            (&[0x60][..], &[][..]),
            (&[0x1_0000][..], &[0x30][..]),
            (&[0x30][..], &[0x60][..]),
        ] {
            assert!(matches!(
                scanner.set_scan_parameters(1, interval, window),
                Err(ScannerError::InvalidArgument(_))
            ));
        }
        assert!(scanner.manager().calls.is_empty());
    }

    #[test]
    fn param_setup_gates_on_found_fields() {
        let (mut scanner, rx) = scanner();
        let setup = FilterParamSetup {
            dely_mode: 0,
            found_timeout: 100,
            ..FilterParamSetup::default()
        };
        scanner
            .scan_filter_param_setup(ApcfAction::Add, 2, Some(&setup))
            .unwrap();
        scanner
            .scan_filter_param_setup(ApcfAction::Delete, 2, None)
            .unwrap();

        let calls = &scanner.manager().calls;
        let Call::ParamSetup(ApcfAction::Add, 2, param) = &calls[0] else {
            panic!("unexpected call {:?}", calls[0]);
        };
        assert_eq!(param.delivery_mode, DeliveryMode::Immediate);
        assert_eq!(param.onfound_timeout, 0);
        assert_eq!(
            calls[1],
            Call::ParamSetup(ApcfAction::Delete, 2, AdvertisingFilterParameter::default())
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            ScannerEvent::FilterParamSetup {
                action: ApcfAction::Add,
                ..
            }
        ));
    }

    #[test]
    fn param_setup_rejects_bad_delivery_mode() {
        let (mut scanner, _rx) = scanner();
        let setup = FilterParamSetup {
            dely_mode: 9,
            ..FilterParamSetup::default()
        };
        assert!(matches!(
            scanner.scan_filter_param_setup(ApcfAction::Add, 0, Some(&setup)),
            Err(ScannerError::Filter(FilterError::InvalidDeliveryMode(9)))
        ));
        assert!(scanner.manager().calls.is_empty());
    }

    #[test]
    fn filter_add_forwards_translated_batch() {
        let (mut scanner, rx) = scanner();
        scanner
            .scan_filter_add(1, &[uuid_filter("180d"), uuid_filter("12345678")])
            .unwrap();

        let Call::FilterAdd(1, commands) = &scanner.manager().calls[0] else {
            panic!("expected filter add");
        };
        assert_eq!(commands.len(), 2);
        assert_eq!(
            rx.try_recv().unwrap(),
            ScannerEvent::FilterConfig {
                filter_type: Some(ApcfFilterType::ServiceUuid),
                available_spaces: 0,
                action: ApcfAction::Add,
                status: 0
            }
        );
    }

    #[test]
    fn rejected_batch_never_reaches_manager() {
        let (mut scanner, rx) = scanner();
        let mut bad = uuid_filter("180f");
        bad.address = "not-an-address".into();

        let err = scanner
            .scan_filter_add(1, &[uuid_filter("180d"), bad, uuid_filter("1812")])
            .unwrap_err();
        assert!(matches!(
            err,
            ScannerError::Filter(FilterError::InvalidAddress(_))
        ));
        assert!(scanner.manager().calls.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn uuid_filter_without_uuid_never_reaches_manager() {
        let (mut scanner, rx) = scanner();
        let missing = ApcfCommand {
            filter_type: ApcfFilterType::ServiceSolicitationUuid as u8,
            ..ApcfCommand::default()
        };

        let err = scanner
            .scan_filter_add(2, &[uuid_filter("180d"), missing])
            .unwrap_err();
        assert!(matches!(
            err,
            ScannerError::Filter(FilterError::MissingUuid(
                ApcfFilterType::ServiceSolicitationUuid
            ))
        ));
        assert!(scanner.manager().calls.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn filter_enable_reports_completion() {
        let (mut scanner, rx) = scanner();
        scanner.scan_filter_enable(true).unwrap();
        assert_eq!(scanner.manager().calls, vec![Call::FilterEnable(true)]);
        assert_eq!(
            rx.try_recv().unwrap(),
            ScannerEvent::FilterEnable {
                enable: true,
                status: 0
            }
        );
    }

    #[test]
    fn completions_can_be_left_to_manager() {
        let config = ScannerConfig {
            synthesize_completions: false,
            ..ScannerConfig::default()
        };
        let (mut scanner, rx) = BleScanner::new(MockManager::default(), config);
        scanner.init();
        scanner.scan_filter_enable(false).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unsupported_capabilities_are_explicit() {
        let (mut scanner, _rx) = scanner();
        assert!(matches!(
            scanner.scan_filter_clear(0),
            Err(ScannerError::Unsupported("scan_filter_clear"))
        ));
        assert!(matches!(
            scanner.batchscan_enable(0, 0, 0, 0, 0),
            Err(ScannerError::Unsupported("batchscan_enable"))
        ));
        assert!(matches!(
            scanner.batchscan_read_reports(0, 0),
            Err(ScannerError::Unsupported(_))
        ));
        assert!(matches!(
            scanner.start_sync(0, Address::ANY, 0, 0),
            Err(ScannerError::Unsupported("start_sync"))
        ));
        assert!(matches!(
            scanner.sync_tx_parameters(Address::ANY, 0, 0, 0),
            Err(ScannerError::Unsupported(_))
        ));
        assert!(scanner.manager().calls.is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let (mut scanner, _rx) = scanner();
        scanner.init();
        assert!(scanner.manager().sink.is_some());
    }
}
