/// Chess domain types.
pub mod chess;
/// Move legality, check detection and turn bookkeeping.
pub mod rules;
