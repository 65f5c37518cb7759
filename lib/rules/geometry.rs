use crate::chess::{Board, Square};

/// How a pair of squares line up on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Alignment {
    /// Same rank or same file.
    Straight,
    /// Same diagonal or anti-diagonal.
    Diagonal,
}

/// How `whence` and `whither` line up, if they are distinct and share a line.
#[inline]
pub fn alignment(whence: Square, whither: Square) -> Option<Alignment> {
    match whence.delta(whither) {
        (0, 0) => None,
        (0, _) | (_, 0) => Some(Alignment::Straight),
        (df, dr) if df.abs() == dr.abs() => Some(Alignment::Diagonal),
        _ => None,
    }
}

/// The unit step that walks from `whence` towards `whither`, if they line up.
#[inline]
pub fn direction(whence: Square, whither: Square) -> Option<(i8, i8)> {
    alignment(whence, whither)?;
    let (df, dr) = whence.delta(whither);
    Some((df.signum(), dr.signum()))
}

/// The squares strictly between `whence` and `whither`.
///
/// Empty unless the squares line up.
pub fn between(whence: Square, whither: Square) -> impl Iterator<Item = Square> {
    let step = direction(whence, whither);
    let mut cursor = whence;
    std::iter::from_fn(move || {
        let (df, dr) = step?;
        cursor = cursor.offset(df, dr).filter(|&sq| sq != whither)?;
        Some(cursor)
    })
}

/// Whether `whence` and `whither` line up with nothing standing strictly between them.
#[inline]
pub fn is_clear(board: &Board, whence: Square, whither: Square) -> bool {
    alignment(whence, whither).is_some()
        && between(whence, whither).all(|sq| !board.is_occupied(sq))
}
