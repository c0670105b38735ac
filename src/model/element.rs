use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported atomic number: {0}")]
pub struct UnknownAtomicNumberError(pub i32);

/// Chemical elements that occur in molecular organic crystals.
///
/// Covers the main-group set through Ca plus the heavier halogens and
/// noble gases seen in CSD-style datasets. Discriminants are atomic
/// numbers, so conversion from the caller's `i32` type codes is a
/// table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Se = 34,
    Br = 35,
    Kr = 36,
    I = 53,
}

impl Element {
    /// Atomic number (1-based).
    #[inline]
    pub fn atomic_number(self) -> i32 {
        self as i32
    }

    /// Converts a caller-side atomic-number type code into an element.
    pub fn from_atomic_number(z: i32) -> Result<Self, UnknownAtomicNumberError> {
        use Element::*;
        Ok(match z {
            1 => H,
            2 => He,
            3 => Li,
            4 => Be,
            5 => B,
            6 => C,
            7 => N,
            8 => O,
            9 => F,
            10 => Ne,
            11 => Na,
            12 => Mg,
            13 => Al,
            14 => Si,
            15 => P,
            16 => S,
            17 => Cl,
            18 => Ar,
            19 => K,
            20 => Ca,
            34 => Se,
            35 => Br,
            36 => Kr,
            53 => I,
            _ => return Err(UnknownAtomicNumberError(z)),
        })
    }

    /// Van der Waals radius in Ångströms (Bondi set).
    ///
    /// Used to estimate the occupied molecular volume for the packing
    /// coefficient.
    pub fn vdw_radius(self) -> f64 {
        use Element::*;
        match self {
            H => 1.20,
            He => 1.40,
            Li => 1.82,
            Be => 1.53,
            B => 1.92,
            C => 1.70,
            N => 1.55,
            O => 1.52,
            F => 1.47,
            Ne => 1.54,
            Na => 2.27,
            Mg => 1.73,
            Al => 1.84,
            Si => 2.10,
            P => 1.80,
            S => 1.80,
            Cl => 1.75,
            Ar => 1.88,
            K => 2.75,
            Ca => 2.31,
            Se => 1.90,
            Br => 1.85,
            Kr => 2.02,
            I => 1.98,
        }
    }

    /// Volume of the van der Waals sphere in Å³.
    #[inline]
    pub fn vdw_volume(self) -> f64 {
        let r = self.vdw_radius();
        4.0 / 3.0 * std::f64::consts::PI * r * r * r
    }

    /// Default hydrogen-bond donor classification (the hydrogen itself).
    #[inline]
    pub fn is_default_donor(self) -> bool {
        self == Element::H
    }

    /// Default hydrogen-bond acceptor classification (N, O, F).
    #[inline]
    pub fn is_default_acceptor(self) -> bool {
        matches!(self, Element::N | Element::O | Element::F)
    }

    /// Element symbol.
    pub fn symbol(self) -> &'static str {
        use Element::*;
        match self {
            H => "H",
            He => "He",
            Li => "Li",
            Be => "Be",
            B => "B",
            C => "C",
            N => "N",
            O => "O",
            F => "F",
            Ne => "Ne",
            Na => "Na",
            Mg => "Mg",
            Al => "Al",
            Si => "Si",
            P => "P",
            S => "S",
            Cl => "Cl",
            Ar => "Ar",
            K => "K",
            Ca => "Ca",
            Se => "Se",
            Br => "Br",
            Kr => "Kr",
            I => "I",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Element::*;
        Ok(match s {
            "H" => H,
            "He" => He,
            "Li" => Li,
            "Be" => Be,
            "B" => B,
            "C" => C,
            "N" => N,
            "O" => O,
            "F" => F,
            "Ne" => Ne,
            "Na" => Na,
            "Mg" => Mg,
            "Al" => Al,
            "Si" => Si,
            "P" => P,
            "S" => S,
            "Cl" => Cl,
            "Ar" => Ar,
            "K" => K,
            "Ca" => Ca,
            "Se" => Se,
            "Br" => Br,
            "Kr" => Kr,
            "I" => I,
            _ => return Err(ParseElementError(s.to_string())),
        })
    }
}
