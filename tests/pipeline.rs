//! Host-side pipeline test through the public API (requires `mock`)

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use pico_ppg::devices::ppg::{Max30102Config, Max30102Driver};
use pico_ppg::devices::traits::{PpgError, PpgSample};
use pico_ppg::platform::mock::{MockI2c, MockIntPin, MockTimer};
use pico_ppg::subsystems::acquisition::{
    consume_one, format_line, service_edge, Acquisition, AcquisitionConfig, DataReady,
    SampleQueue, SampleSink, StartupGate, WakeCause,
};

#[derive(Default)]
struct Console {
    out: String,
}

impl SampleSink for Console {
    async fn emit(&mut self, sample: &PpgSample) {
        self.out.push_str(format_line(sample).as_str());
    }
}

#[tokio::test]
async fn test_edge_to_console() {
    let mut i2c = MockI2c::new();
    // PART_ID, REV_ID, MODE_CONFIG, then one cycle: status, WR_PTR, RD_PTR, 2 dual samples
    i2c.set_read_data(&[
        0x15, 0x03, 0x00, 0x80, 6, 4, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x03, 0xFF,
        0xFF, 0xFF,
    ]);
    let mut driver = Max30102Driver::new(i2c, Max30102Config::dual_channel());
    driver.initialize(&mut MockTimer::new()).await.unwrap();

    let sensor = Mutex::<NoopRawMutex, _>::new(driver);
    let ready = DataReady::<NoopRawMutex>::new();
    let gate = StartupGate::<NoopRawMutex>::new();
    let queue = SampleQueue::<NoopRawMutex>::new();
    let mut pin = MockIntPin::new();

    gate.open();
    gate.wait_open().await;

    pin.push_falling_edge();
    service_edge(&mut pin, &ready).await;

    let mut acquisition = Acquisition::new(
        &sensor,
        &ready,
        &queue,
        MockTimer::new(),
        AcquisitionConfig::default(),
    );
    let report = acquisition.run_cycle().await;
    assert_eq!(report.wake, WakeCause::Interrupt);
    assert_eq!(report.enqueued, 2);

    let mut console = Console::default();
    consume_one(&queue, &mut console).await;
    consume_one(&queue, &mut console).await;
    assert_eq!(console.out, "256,2\n3,262143\n");
}

#[tokio::test]
async fn test_wrong_part_never_configures() {
    let mut i2c = MockI2c::new();
    i2c.set_read_data(&[0x00]);
    let mut driver = Max30102Driver::new(i2c, Max30102Config::default());

    let err = driver.initialize(&mut MockTimer::new()).await.unwrap_err();

    assert_eq!(
        err,
        PpgError::IdentityMismatch {
            found: 0x00,
            expected: 0x15
        }
    );
    assert!(!driver.is_initialized());
}
