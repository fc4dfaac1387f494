//! Element identity for small proton counts.
//!
//! Covers the first ten elements, the range offered by the periodic-table
//! picker and the electron cloud table.

/// Identity of a chemical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    /// Proton count that identifies this element.
    pub atomic_number: u32,
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Highest proton count with a known element entry.
pub const MAX_KNOWN_ATOMIC_NUMBER: u32 = 10;

// Indexed by atomic number - 1.
const ELEMENTS: [(&str, &str); MAX_KNOWN_ATOMIC_NUMBER as usize] = [
    ("H", "Hydrogen"),
    ("He", "Helium"),
    ("Li", "Lithium"),
    ("Be", "Beryllium"),
    ("B", "Boron"),
    ("C", "Carbon"),
    ("N", "Nitrogen"),
    ("O", "Oxygen"),
    ("F", "Fluorine"),
    ("Ne", "Neon"),
];

/// Looks up the element for `proton_count`.
///
/// Returns `None` for zero protons (no element) and for counts beyond
/// [`MAX_KNOWN_ATOMIC_NUMBER`].
pub fn element_for(proton_count: u32) -> Option<Element> {
    let index = usize::try_from(proton_count.checked_sub(1)?).ok()?;
    ELEMENTS.get(index).map(|&(symbol, name)| Element {
        atomic_number: proton_count,
        symbol,
        name,
    })
}
