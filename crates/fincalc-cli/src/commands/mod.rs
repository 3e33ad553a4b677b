pub mod export;
pub mod loans;
pub mod savings;
pub mod tax;

/// Overwrite `slot` when the flag was given on the command line.
pub(crate) fn set<T>(slot: &mut T, flag: Option<T>) {
    if let Some(value) = flag {
        *slot = value;
    }
}
