//! Time source abstraction

/// Monotonic millisecond clock
///
/// The counter is allowed to wrap; consumers measure elapsed time with
/// wrapping subtraction. Accuracy is one tick.
pub trait Millis {
    /// Milliseconds since an arbitrary epoch
    fn millis(&self) -> u32;

    /// Milliseconds elapsed since `since`, tolerant of counter wrap
    fn elapsed_since(&self, since: u32) -> u32 {
        self.millis().wrapping_sub(since)
    }
}

impl<T: Millis + ?Sized> Millis for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// [`Millis`] backed by the embassy-time driver
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMillis;

#[cfg(feature = "embassy-time")]
impl Millis for EmbassyMillis {
    fn millis(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
