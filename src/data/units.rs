//! Built-in unit vocabulary
//!
//! Symbols that force unit classification when they occur as an isolated
//! alphabetic run. A symbol may carry replacement text used by the unit
//! formatter in place of the literal symbol.
//!
//! Single capital letters that double as element symbols (`H`, `C`, `N`,
//! `O`, `K`, `S`, `V`, `W`, `F`, `T`, ...) are deliberately absent, as are
//! two-letter units that collide with elements (`Pa`, `Np`). A formula such as
//! `K2O` must stay a molecule; add them through the configuration if needed.

use phf::phf_ordered_map;

/// Unit symbol to optional replacement text, in listing order
pub static BUILTIN_UNITS: phf::OrderedMap<&'static str, Option<&'static str>> = phf_ordered_map! {
    // Length
    "m" => None,
    "cm" => None,
    "mm" => None,
    "km" => None,
    "um" => Some("$\\mu$m"),
    "nm" => None,
    "pm" => None,
    "au" => None,
    "AU" => None,
    "ly" => None,
    "pc" => None,
    "kpc" => None,
    "Mpc" => None,
    "Gpc" => None,
    "Rsun" => Some("R$_\\odot$"),
    "Rearth" => Some("R$_\\oplus$"),

    // Time
    "s" => None,
    "ms" => None,
    "us" => Some("$\\mu$s"),
    "ns" => None,
    "ps" => None,
    "min" => None,
    "h" => None,
    "yr" => None,
    "kyr" => None,
    "Myr" => None,
    "Gyr" => None,

    // Mass and amount
    "g" => None,
    "mg" => None,
    "kg" => None,
    "Msun" => Some("M$_\\odot$"),
    "Mearth" => Some("M$_\\oplus$"),
    "mol" => None,
    "mmol" => None,

    // Energy, power, force
    "J" => None,
    "kJ" => None,
    "erg" => None,
    "eV" => None,
    "keV" => None,
    "MeV" => None,
    "GeV" => None,
    "TeV" => None,
    "Lsun" => Some("L$_\\odot$"),
    "dyn" => None,
    "kW" => None,
    "MW" => None,

    // Frequency and flux density
    "Hz" => None,
    "kHz" => None,
    "MHz" => None,
    "GHz" => None,
    "THz" => None,
    "Jy" => None,
    "mJy" => None,
    "uJy" => Some("$\\mu$Jy"),

    // Electromagnetism
    "G" => None,
    "mT" => None,
    "mV" => None,
    "kV" => None,
    "mA" => None,

    // Pressure and volume
    "bar" => None,
    "mbar" => None,
    "atm" => None,
    "L" => None,
    "mL" => None,

    // Angles and logarithmic units
    "rad" => None,
    "sr" => None,
    "deg" => Some("$^\\circ$"),
    "arcmin" => Some("$^\\prime$"),
    "arcsec" => Some("$^{\\prime\\prime}$"),
    "mas" => None,
    "mag" => None,
    "dex" => None,
};

/// Check if a symbol belongs to the built-in vocabulary
#[inline]
pub fn is_builtin_unit(symbol: &str) -> bool {
    BUILTIN_UNITS.contains_key(symbol)
}

/// Replacement text for a built-in symbol, if it has one
#[inline]
pub fn builtin_replacement(symbol: &str) -> Option<&'static str> {
    BUILTIN_UNITS.get(symbol).copied().flatten()
}
