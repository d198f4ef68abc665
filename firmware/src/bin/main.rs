#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use djc_firmware::{
    rx_loop, tx_loop, ActiveLowButton, AdcSticks, Behaviors, FlightControl, FrameQueue,
    LocalMenu, MavlinkCodec, OledDisplay, Periphery, RadioLink, Remote, RemoteEncoding,
    RemoteMenu, BEHAVIOR_SLOTS, DEFAULT_CONFIG,
};
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, Config as I2cConfig, I2c};
use embassy_rp::peripherals::{I2C0, UART1};
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx, UartTx};
use embassy_sync::channel::Channel;
use embassy_time::{block_for, Duration, Instant, Ticker};
use mavlink_proto::MAVLINK_BAUDRATE_TELEMETRY;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

type Board = Remote<
    AdcSticks<'static>,
    ActiveLowButton<'static>,
    RadioLink,
    OledDisplay<I2c<'static, I2C0, i2c::Blocking>>,
    Behaviors,
    BEHAVIOR_SLOTS,
>;

/// Frames waiting for the radio, and frames received from it.
static TX_FRAMES: StaticCell<FrameQueue> = StaticCell::new();
static RX_FRAMES: StaticCell<FrameQueue> = StaticCell::new();

/// Loop period; the remote rate-limits update and render on its own.
const TICK: Duration = Duration::from_millis(5);

/// Pause between calibration sample rounds.
const CALIBRATION_STEP: Duration = Duration::from_millis(1);

#[cfg(feature = "legacy-menu-codes")]
const MENU_ENCODING: RemoteEncoding = RemoteEncoding::Legacy;
#[cfg(not(feature = "legacy-menu-codes"))]
const MENU_ENCODING: RemoteEncoding = RemoteEncoding::Packed;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ESP32-DJC remote starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let tx_frames = TX_FRAMES.init(Channel::new());
    let rx_frames = RX_FRAMES.init(Channel::new());

    // --- Radio (UART1 on GPIO 8/9) ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = MAVLINK_BAUDRATE_TELEMETRY;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // --- Sticks (ADC on GPIO 26..=29) and buttons ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sticks = AdcSticks::new(
        adc,
        [
            AdcChannel::new_pin(p.PIN_26, Pull::None), // left X
            AdcChannel::new_pin(p.PIN_27, Pull::None), // left Y
            AdcChannel::new_pin(p.PIN_28, Pull::None), // right X
            AdcChannel::new_pin(p.PIN_29, Pull::None), // right Y
        ],
    );
    let left_button = ActiveLowButton::new(Input::new(p.PIN_14, Pull::Up));
    let right_button = ActiveLowButton::new(Input::new(p.PIN_15, Pull::Up));

    // --- Display (I2C0, SDA GPIO 4, SCL GPIO 5) ---
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
    let display = OledDisplay::new(i2c);

    let config = DEFAULT_CONFIG;
    let periphery = Periphery::new(
        sticks,
        left_button,
        right_button,
        RadioLink::new(tx_frames, rx_frames),
        config,
    );
    let mut remote: Board = Remote::new(periphery, display);

    match LocalMenu::new(config.direction_threshold) {
        Ok(menu) => register(&mut remote, menu),
        Err(e) => error!("Local menu unavailable: {:?}", e),
    }
    register(
        &mut remote,
        FlightControl::new(MavlinkCodec::default(), config.heartbeat_period_ms),
    );
    register(
        &mut remote,
        RemoteMenu::new(MENU_ENCODING, config.direction_threshold),
    );

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(radio_tx_task(tx, tx_frames).unwrap());
    spawner.spawn(radio_rx_task(rx, rx_frames).unwrap());

    let calibration = remote.init(|| block_for(CALIBRATION_STEP));
    info!("Calibrated: {:?}", calibration);

    let mut ticker = Ticker::every(TICK);
    loop {
        remote.tick(Instant::now().as_millis());
        ticker.next().await;
    }
}

fn register(remote: &mut Board, behavior: impl Into<Behaviors>) {
    if let Err(e) = remote.register(behavior) {
        error!("Behavior not registered: {:?}", e);
    }
}

/// Radio TX task - writes queued frames to the UART.
#[embassy_executor::task]
async fn radio_tx_task(tx: UartTx<'static, Async>, queue: &'static FrameQueue) {
    tx_loop(tx, queue).await
}

/// Radio RX task - splits received bytes into frames.
#[embassy_executor::task]
async fn radio_rx_task(rx: UartRx<'static, Async>, queue: &'static FrameQueue) {
    rx_loop(rx, queue).await
}
