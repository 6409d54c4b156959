use std::collections::BTreeMap;

use crate::canvas::{ChangeSet, PixelChange, PixelSurface, Rgba8};

/// What a stroke has done to one pixel so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccumulationRecord {
    /// Value before the stroke first touched the pixel. Never overwritten.
    pub before: Rgba8,
    /// Latest value written by the stroke.
    pub after: Rgba8,
    /// Strongest alpha applied to the pixel in this stroke.
    pub peak_alpha: u8,
}

/// Per-stroke map from flat pixel index to its [`AccumulationRecord`].
#[derive(Debug, Default)]
pub struct AccumulationStore {
    records: BTreeMap<usize, AccumulationRecord>,
}

impl AccumulationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AccumulationRecord> {
        self.records.get(&index)
    }

    /// Pre-stroke value of a pixel, whether or not the stroke touched it yet.
    pub fn original(&self, target: &dyn PixelSurface, index: usize) -> Rgba8 {
        self.records
            .get(&index)
            .map_or_else(|| target.pixel(index), |r| r.before)
    }

    fn record(&mut self, target: &dyn PixelSurface, index: usize) -> &mut AccumulationRecord {
        self.records.entry(index).or_insert_with(|| {
            let before = target.pixel(index);
            AccumulationRecord {
                before,
                after: before,
                peak_alpha: 0,
            }
        })
    }

    /// Blend into a pixel at `alpha` unless the stroke already hit it harder.
    ///
    /// `compose` receives the record's current value. Returns whether the
    /// pixel was written.
    ///
    /// A partial pass at exactly the peak alpha is skipped too, not just a
    /// weaker one: overlapping soft stamps would otherwise darken a pixel
    /// they already covered. Only a 255 pass may repeat, since it cannot
    /// build up.
    pub fn blend<F>(&mut self, target: &mut dyn PixelSurface, index: usize, alpha: u8, compose: F) -> bool
    where
        F: FnOnce(Rgba8) -> Rgba8,
    {
        let record = self.record(&*target, index);
        if alpha < record.peak_alpha || (alpha == record.peak_alpha && alpha < u8::MAX) {
            return false;
        }
        record.peak_alpha = alpha;
        let next = compose(record.after);
        record.after = next;
        target.set_pixel(index, next);
        true
    }

    /// Unconditionally write a pixel, for painters that move existing paint
    /// around rather than lay new paint down.
    pub fn write(&mut self, target: &mut dyn PixelSurface, index: usize, alpha: u8, value: Rgba8) {
        let record = self.record(&*target, index);
        record.peak_alpha = record.peak_alpha.max(alpha);
        record.after = value;
        target.set_pixel(index, value);
    }

    /// Turn the records into a change set and empty the store.
    pub fn take_change_set(&mut self, description: &str) -> Option<ChangeSet> {
        let records = std::mem::take(&mut self.records);
        let changes = records
            .into_iter()
            .map(|(index, r)| PixelChange {
                index,
                before: r.before,
                after: r.after,
            })
            .collect();
        ChangeSet::new(description, changes)
    }
}
