//! Bounds-checked splicing over ordered collections.

use crate::error::Error;

/// Insert `item` so that it ends up at `index`. `index` may equal the length.
pub fn insert_at<T>(items: &mut Vec<T>, index: usize, item: T) -> Result<(), Error> {
    if index > items.len() {
        return Err(Error::IndexOutOfRange {
            index,
            count: 1,
            len: items.len(),
        });
    }
    items.insert(index, item);
    Ok(())
}

/// Remove `count` items starting at `start`, returning them.
pub fn remove_span<T>(items: &mut Vec<T>, start: usize, count: usize) -> Result<Vec<T>, Error> {
    let in_range = start
        .checked_add(count)
        .map_or(false, |end| end <= items.len());
    if !in_range {
        return Err(Error::IndexOutOfRange {
            index: start,
            count,
            len: items.len(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }
    Ok(items.drain(start..start + count).collect())
}

/// Move the item at `from` so that it ends up at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), Error> {
    let len = items.len();
    if from >= len {
        return Err(Error::IndexOutOfRange {
            index: from,
            count: 1,
            len,
        });
    }
    if to >= len {
        return Err(Error::IndexOutOfRange {
            index: to,
            count: 1,
            len,
        });
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}
