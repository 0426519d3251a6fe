use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::{
    CriticalSectionRawMutex, NoopRawMutex, RawMutex,
};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use i2c_dev::{Error, I2cConfig, I2cDev, MAX_WRITE_LEN};

// ---------------------------------------------------------------------------
// Lock instrumentation
// ---------------------------------------------------------------------------

struct LockState {
    held: Cell<bool>,
    acquired: Cell<usize>,
}

// The tracking mutex runs on the calling thread, so per-thread state is enough
// to observe it without tests interfering with each other.
std::thread_local! {
    static LOCK: LockState = const {
        LockState { held: Cell::new(false), acquired: Cell::new(0) }
    };
}

fn lock_held() -> bool {
    LOCK.with(|s| s.held.get())
}

fn lock_acquired() -> usize {
    LOCK.with(|s| s.acquired.get())
}

/// Raw mutex that records acquisitions and refuses re-entry.
struct TrackingRawMutex;

unsafe impl RawMutex for TrackingRawMutex {
    const INIT: Self = TrackingRawMutex;

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        LOCK.with(|s| {
            assert!(!s.held.get(), "lock taken twice");
            s.held.set(true);
            s.acquired.set(s.acquired.get() + 1);
        });
        let ret = f();
        LOCK.with(|s| s.held.set(false));
        ret
    }
}

/// Raw mutex backed by a std mutex, one per descriptor.
struct StdRawMutex(std::sync::Mutex<()>);

unsafe impl RawMutex for StdRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = StdRawMutex(std::sync::Mutex::new(()));

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f()
    }
}

// ---------------------------------------------------------------------------
// Fake bus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Write(u8, Vec<u8>),
    Read(u8, usize),
}

#[derive(Default)]
struct FakeBus {
    ops: Vec<Op>,
    response: Vec<u8>,
    fail: bool,
    /// Require the tracking lock to be held during every transfer.
    check_lock: bool,
    /// Shared flag used to detect overlapping transfers.
    busy: Option<Arc<AtomicBool>>,
}

impl FakeBus {
    fn tracked() -> Self {
        Self { check_lock: true, ..Default::default() }
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.check_lock {
            assert!(lock_held(), "bus touched without holding the lock");
        }
        if let Some(busy) = &self.busy {
            assert!(!busy.swap(true, Ordering::SeqCst), "overlapping transfer");
            std::thread::sleep(std::time::Duration::from_micros(50));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    self.ops.push(Op::Write(address, data.to_vec()))
                }
                Operation::Read(buf) => {
                    for (dst, src) in buf.iter_mut().zip(self.response.iter()) {
                        *dst = *src;
                    }
                    self.ops.push(Op::Read(address, buf.len()));
                }
            }
        }

        if let Some(busy) = &self.busy {
            busy.store(false, Ordering::SeqCst);
        }

        if self.fail {
            Err(ErrorKind::Other)
        } else {
            Ok(())
        }
    }
}

const CONFIG: I2cConfig = I2cConfig::new(21, 22, 400_000);

fn make_dev(bus: FakeBus) -> I2cDev<TrackingRawMutex, FakeBus> {
    I2cDev::new(bus, 0, 0x23, CONFIG).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn new_stores_descriptor_fields() {
    let dev: I2cDev<NoopRawMutex, FakeBus> =
        I2cDev::new(FakeBus::default(), 1, 0x44, CONFIG).unwrap();

    assert_eq!(dev.port(), 1);
    assert_eq!(dev.addr(), 0x44);
    assert_eq!(dev.config(), &CONFIG);
    assert_eq!(dev.config().clk_speed_hz, 400_000);
}

#[test]
fn new_rejects_ten_bit_address() {
    let result: Result<I2cDev<NoopRawMutex, FakeBus>, _> =
        I2cDev::new(FakeBus::default(), 0, 0x80, CONFIG);

    assert!(matches!(result, Err(Error::InvalidArgument)));
}

#[test]
fn free_returns_bus_without_traffic() {
    let dev = make_dev(FakeBus::tracked());
    let before = lock_acquired();

    let bus = dev.free();
    assert!(bus.ops.is_empty());
    assert_eq!(lock_acquired(), before);
}

#[test]
fn unaddressed_write_sends_payload_only() {
    let dev = make_dev(FakeBus::tracked());

    dev.write(None, &[0x21]).unwrap();

    let bus = dev.free();
    assert_eq!(bus.ops, [Op::Write(0x23, vec![0x21])]);
}

#[test]
fn addressed_write_prefixes_register() {
    let dev = make_dev(FakeBus::tracked());

    dev.write_reg(0x02, &[0x38]).unwrap();

    let bus = dev.free();
    assert_eq!(bus.ops, [Op::Write(0x23, vec![0x02, 0x38])]);
}

#[test]
fn unaddressed_read_fills_buffer() {
    let dev = make_dev(FakeBus {
        response: vec![0x01, 0x68],
        ..FakeBus::tracked()
    });

    let mut buf = [0u8; 2];
    dev.read(None, &mut buf).unwrap();
    assert_eq!(buf, [0x01, 0x68]);

    let bus = dev.free();
    assert_eq!(bus.ops, [Op::Read(0x23, 2)]);
}

#[test]
fn addressed_read_uses_repeated_start() {
    let dev = make_dev(FakeBus {
        response: vec![0xAB],
        ..FakeBus::tracked()
    });

    let mut buf = [0u8; 1];
    dev.read_reg(0x10, &mut buf).unwrap();
    assert_eq!(buf, [0xAB]);

    let bus = dev.free();
    assert_eq!(bus.ops, [Op::Write(0x23, vec![0x10]), Op::Read(0x23, 1)]);
}

#[test]
fn each_transfer_takes_the_lock_once() {
    let dev = make_dev(FakeBus::tracked());
    let before = lock_acquired();

    dev.write(None, &[0x01]).unwrap();
    dev.write_reg(0x00, &[0x02]).unwrap();
    let mut buf = [0u8; 2];
    dev.read(None, &mut buf).unwrap();

    assert_eq!(lock_acquired() - before, 3);
    assert!(!lock_held());
}

#[test]
fn empty_transfers_are_rejected_without_locking() {
    let dev = make_dev(FakeBus::tracked());
    let before = lock_acquired();

    assert_eq!(dev.write(None, &[]), Err(Error::InvalidArgument));
    assert_eq!(dev.read(None, &mut []), Err(Error::InvalidArgument));

    assert_eq!(lock_acquired(), before);
    assert!(dev.free().ops.is_empty());
}

#[test]
fn oversized_addressed_write_is_rejected_without_locking() {
    let dev = make_dev(FakeBus::tracked());
    let before = lock_acquired();

    let payload = [0u8; MAX_WRITE_LEN + 1];
    assert_eq!(dev.write_reg(0x00, &payload), Err(Error::InvalidArgument));

    let payload = [0u8; MAX_WRITE_LEN];
    assert!(dev.write_reg(0x00, &payload).is_ok());

    assert_eq!(lock_acquired() - before, 1);
}

#[test]
fn bus_error_is_passed_through_and_lock_released() {
    let dev = make_dev(FakeBus { fail: true, ..FakeBus::tracked() });

    assert_eq!(dev.write(None, &[0x10]), Err(Error::I2c(ErrorKind::Other)));
    assert!(!lock_held());

    // The next transfer must be able to take the lock again.
    let mut buf = [0u8; 2];
    assert_eq!(dev.read(None, &mut buf), Err(Error::I2c(ErrorKind::Other)));
    assert!(!lock_held());
}

#[test]
fn bus_error_converts_into_error() {
    let err: Error<ErrorKind> = ErrorKind::NoAcknowledge(
        embedded_hal::i2c::NoAcknowledgeSource::Address,
    )
    .into();
    assert!(matches!(err, Error::I2c(ErrorKind::NoAcknowledge(_))));
}

#[test]
fn error_display_forwards_bus_error_display() {
    let err: Error<ErrorKind> = Error::I2c(ErrorKind::Other);
    assert_eq!(
        err.to_string(),
        format!("I2C communication error: {}", ErrorKind::Other)
    );

    let err: Error<ErrorKind> = Error::InvalidArgument;
    assert_eq!(err.to_string(), "Invalid argument");
}

#[test]
fn error_helpers() {
    let bus: Error<ErrorKind> = Error::I2c(ErrorKind::Overrun);
    assert_eq!(bus.bus_error(), Some(&ErrorKind::Overrun));
    assert!(!bus.is_invalid_argument());

    let arg: Error<ErrorKind> = Error::InvalidArgument;
    assert_eq!(arg.bus_error(), None);
    assert!(arg.is_invalid_argument());
}

#[test]
fn critical_section_mutex_descriptor() {
    let dev: I2cDev<CriticalSectionRawMutex, FakeBus> =
        I2cDev::new(FakeBus::default(), 0, 0x5C, CONFIG).unwrap();

    dev.write(None, &[0x10]).unwrap();
    assert_eq!(dev.free().ops, [Op::Write(0x5C, vec![0x10])]);
}

/// Hammer one descriptor from several threads and check that no two bus
/// transactions ever overlap.
fn assert_serialized<M>(addr: u8)
where
    M: RawMutex + Send + Sync + 'static,
{
    const THREADS: usize = 4;
    const PER_THREAD: usize = 25;

    let busy = Arc::new(AtomicBool::new(false));
    let dev: Arc<I2cDev<M, FakeBus>> = Arc::new(
        I2cDev::new(
            FakeBus { busy: Some(busy), ..Default::default() },
            0,
            addr,
            CONFIG,
        )
        .unwrap(),
    );
    let done = Arc::new(AtomicUsize::new(0));

    let workers: Vec<_> = (0..THREADS)
        .map(|n| {
            let dev = dev.clone();
            let done = done.clone();
            std::thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    dev.write_reg(n as u8, &[0x00]).unwrap();
                    done.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(done.load(Ordering::SeqCst), THREADS * PER_THREAD);
    let Some(dev) = Arc::into_inner(dev) else {
        panic!("descriptor still shared");
    };
    assert_eq!(dev.free().ops.len(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_transfers_are_serialized_by_critical_section() {
    assert_serialized::<CriticalSectionRawMutex>(0x23);
}

#[test]
fn concurrent_transfers_are_serialized_by_per_descriptor_mutex() {
    assert_serialized::<StdRawMutex>(0x44);
}
