//! MAX30102 PPG stream over USB serial
//!
//! Streams raw PPG samples from a MAX30102 to the host, one sample per line
//! (`ir` in single-channel mode, `ir,red` in dual-channel mode).
//!
//! # Hardware
//! - MAX30102 I2C address: 0x57
//! - SDA: GPIO 4, SCL: GPIO 5 (I2C0, 400 kHz)
//! - INT: GPIO 20 (active low, internal pull-up)
//!
//! # Usage
//! ```bash
//! PPG_CHANNELS=dual cargo build --release --example ppg_stream --features pico2_w \
//!     --target thumbv8m.main-none-eabihf
//! screen /dev/ttyACM0 115200
//! ```
//!
//! Nothing is configured until the terminal asserts DTR. Diagnostics go to
//! RTT (defmt); the USB console carries only sample lines.

#![no_std]
#![no_main]

use core::ptr::addr_of_mut;
use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::{I2C0, USB};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config, UsbDevice};
use embedded_alloc::LlffHeap as Heap;
use pico_ppg::devices::ppg::{Max30102Config, Max30102Driver};
use pico_ppg::devices::traits::{PpgSample, PpgSensor};
use pico_ppg::platform::rp2350::{EmbassyIntPin, Rp2350I2c};
use pico_ppg::subsystems::acquisition::{
    format_line, run_consumer, watch_interrupt, Acquisition, AcquisitionConfig, DataReady,
    SampleQueue, SampleSink, StartupGate,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 32 * 1024;

/// Channel layout selected at build time (`PPG_CHANNELS=single|dual`)
const PPG_CHANNELS: &str = env!("PPG_CHANNELS");

/// Interval between die temperature readouts
const TEMPERATURE_PERIOD: Duration = Duration::from_secs(10);

hal::bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
    I2C0_IRQ => embassy_rp::i2c::InterruptHandler<I2C0>;
});

type Sensor = Max30102Driver<Rp2350I2c<'static, I2C0>>;
type SharedSensor = Mutex<CriticalSectionRawMutex, Sensor>;
type UsbDriver = Driver<'static, USB>;

static READY: DataReady<CriticalSectionRawMutex> = DataReady::new();
static GATE: StartupGate<CriticalSectionRawMutex> = StartupGate::new();
static QUEUE: SampleQueue<CriticalSectionRawMutex> = SampleQueue::new();
static SENSOR: StaticCell<SharedSensor> = StaticCell::new();

/// USB CDC-ACM console as the sample sink
struct UsbSink {
    class: CdcAcmClass<'static, UsbDriver>,
}

impl SampleSink for UsbSink {
    async fn emit(&mut self, sample: &PpgSample) {
        let line = format_line(sample);
        if self.class.write_packet(line.as_bytes()).await.is_err() {
            warn!("USB write failed, waiting for host");
            wait_for_host(&mut self.class).await;
        }
    }
}

/// Block until the host has opened the port (DTR asserted)
async fn wait_for_host(class: &mut CdcAcmClass<'static, UsbDriver>) {
    loop {
        class.wait_connection().await;
        if class.dtr() {
            return;
        }
        Timer::after_millis(100).await;
    }
}

#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) {
    usb.run().await
}

#[embassy_executor::task]
async fn interrupt_task(mut pin: EmbassyIntPin<'static>) {
    watch_interrupt(&mut pin, &READY).await
}

#[embassy_executor::task]
async fn reader_task(sensor: &'static SharedSensor) {
    let mut acquisition = Acquisition::new(
        sensor,
        &READY,
        &QUEUE,
        Delay,
        AcquisitionConfig::default(),
    );
    acquisition.run(&GATE).await
}

#[embassy_executor::task]
async fn consumer_task(mut sink: UsbSink) {
    run_consumer(&QUEUE, &mut sink).await
}

#[embassy_executor::task]
async fn temperature_task(sensor: &'static SharedSensor) {
    GATE.wait_open().await;
    loop {
        Timer::after(TEMPERATURE_PERIOD).await;
        match sensor.lock().await.temperature().await {
            Ok(celsius) => info!("Die temperature: {} C", celsius),
            Err(e) => warn!("Die temperature read failed: {}", e),
        }
    }
}

fn sensor_config() -> Max30102Config {
    match PPG_CHANNELS {
        "dual" => Max30102Config::dual_channel(),
        _ => Max30102Config::single_channel(),
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize heap (sample queue)
    {
        static mut HEAP_MEM: [u8; HEAP_SIZE] = [0; HEAP_SIZE];
        unsafe {
            HEAP.init(addr_of_mut!(HEAP_MEM) as *mut u8 as usize, HEAP_SIZE);
        }
    }

    let p = hal::init(Default::default());

    // USB serial
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = Config::new(0x2e8a, 0x000a);
    usb_config.manufacturer = Some("Raspberry Pi");
    usb_config.product = Some("pico_ppg stream");
    usb_config.serial_number = Some("12345678");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static USB_STATE: StaticCell<State> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );
    let mut class = CdcAcmClass::new(&mut builder, USB_STATE.init(State::new()), 64);
    let usb = builder.build();
    spawner.must_spawn(usb_task(usb));

    info!("Waiting for host to open the serial port");
    wait_for_host(&mut class).await;
    info!("Host attached");

    // I2C0: GPIO 5 (SCL), GPIO 4 (SDA)
    let mut i2c_config = embassy_rp::i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let bus = Rp2350I2c::new(i2c);

    let mut driver = Max30102Driver::new(bus, sensor_config());
    if let Err(e) = driver.initialize(&mut Delay).await {
        error!("MAX30102 initialization failed: {}", e);
        // Acquisition never starts
        core::future::pending::<()>().await;
    }

    // Clear any interrupt latched during configuration so INT can fall again
    if let Err(e) = driver.interrupt_status().await {
        warn!("Initial status clear failed: {}", e);
    }

    let sensor: &'static SharedSensor = SENSOR.init(Mutex::new(driver));

    spawner.must_spawn(interrupt_task(EmbassyIntPin::pull_up(p.PIN_20)));
    spawner.must_spawn(reader_task(sensor));
    spawner.must_spawn(consumer_task(UsbSink { class }));
    spawner.must_spawn(temperature_task(sensor));

    info!("Starting acquisition ({=str} channel)", PPG_CHANNELS);
    GATE.open();
}
