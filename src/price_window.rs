use crate::{Price, ring_buffer::RingBuffer};

/// Trailing window of prices with a running sum.
///
/// The sum is kept with Neumaier compensation, so an evicted price that
/// was far larger than the rest leaves no rounding residue behind.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    window: RingBuffer,
    sum: Price,
    /// Low-order bits lost from `sum`.
    compensation: Price,
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self {
            window: RingBuffer::new(size),
            sum: 0.0,
            compensation: 0.0,
        }
    }

    #[inline]
    pub fn push(&mut self, price: Price) {
        if let Some(evicted) = self.window.push(price) {
            self.add(-evicted);
        }
        self.add(price);
    }

    /// Sum of the window, once it holds `size` prices.
    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.window
            .is_ready()
            .then_some(self.sum + self.compensation)
    }

    #[inline]
    fn add(&mut self, value: Price) {
        let total = self.sum + value;
        self.compensation += if self.sum.abs() >= value.abs() {
            (self.sum - total) + value
        } else {
            (value - total) + self.sum
        };
        self.sum = total;
    }
}
