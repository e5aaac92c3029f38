//! # Sensor Slots
//!
//! Single-writer, multi-reader cells holding the latest value of one physical
//! quantity. The producer keeps the [`SlotWriter`]; the registry, encoders and
//! climb sampler hold [`SlotReader`]s.
//!
//! Values are stored as raw bits in an atomic integer, so a reader always sees
//! a whole value and a producer never waits on a reader.

use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Scalar types that can live in a sensor slot.
pub trait SlotValue: Copy + Send + Sync + 'static {
    /// Atomic storage for the value's bit pattern
    type Cell: Send + Sync;

    /// Create storage holding `value`
    fn new_cell(value: Self) -> Self::Cell;

    /// Load the current value
    fn load(cell: &Self::Cell) -> Self;

    /// Replace the current value
    fn store(cell: &Self::Cell, value: Self);
}

impl SlotValue for f32 {
    type Cell = AtomicU32;

    fn new_cell(value: Self) -> Self::Cell {
        AtomicU32::new(value.to_bits())
    }

    fn load(cell: &Self::Cell) -> Self {
        f32::from_bits(cell.load(Ordering::Relaxed))
    }

    fn store(cell: &Self::Cell, value: Self) {
        cell.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl SlotValue for f64 {
    type Cell = AtomicU64;

    fn new_cell(value: Self) -> Self::Cell {
        AtomicU64::new(value.to_bits())
    }

    fn load(cell: &Self::Cell) -> Self {
        f64::from_bits(cell.load(Ordering::Relaxed))
    }

    fn store(cell: &Self::Cell, value: Self) {
        cell.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Create a slot holding `initial`, returning the producer and reader halves.
///
/// # Examples
///
/// ```
/// use hott_responder::sensors::slot::slot;
///
/// let (writer, reader) = slot(0.0f32);
/// writer.set(123.5);
/// assert_eq!(reader.get(), 123.5);
/// ```
pub fn slot<T: SlotValue>(initial: T) -> (SlotWriter<T>, SlotReader<T>) {
    let cell = Arc::new(T::new_cell(initial));
    (
        SlotWriter { cell: Arc::clone(&cell) },
        SlotReader { cell },
    )
}

/// Producer half of a slot; one per slot, not `Clone`.
pub struct SlotWriter<T: SlotValue> {
    cell: Arc<T::Cell>,
}

impl<T: SlotValue> SlotWriter<T> {
    /// Publish a new value
    pub fn set(&self, value: T) {
        T::store(&self.cell, value);
    }

    /// Read back the last published value
    pub fn get(&self) -> T {
        T::load(&self.cell)
    }

    /// Create another reader for this slot
    pub fn reader(&self) -> SlotReader<T> {
        SlotReader { cell: Arc::clone(&self.cell) }
    }
}

impl<T: SlotValue + fmt::Debug> fmt::Debug for SlotWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotWriter").field(&self.get()).finish()
    }
}

/// Read-only half of a slot.
pub struct SlotReader<T: SlotValue> {
    cell: Arc<T::Cell>,
}

impl<T: SlotValue> SlotReader<T> {
    /// Current value
    pub fn get(&self) -> T {
        T::load(&self.cell)
    }
}

impl<T: SlotValue> Clone for SlotReader<T> {
    fn clone(&self) -> Self {
        Self { cell: Arc::clone(&self.cell) }
    }
}

impl<T: SlotValue + fmt::Debug> fmt::Debug for SlotReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotReader").field(&self.get()).finish()
    }
}
