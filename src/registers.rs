//! Register, condition and register-pair codes of the 8080.
//!
//! Names are matched case-insensitively. Each enum discriminant is the
//! field value that lands in the opcode byte.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    B = 0b000,
    C = 0b001,
    D = 0b010,
    E = 0b011,
    H = 0b100,
    L = 0b101,
    /// Memory addressed by HL.
    M = 0b110,
    A = 0b111,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Nz = 0b000,
    Z = 0b001,
    Nc = 0b010,
    C = 0b011,
    Po = 0b100,
    Pe = 0b101,
    P = 0b110,
    M = 0b111,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegPair {
    Bc = 0b00,
    De = 0b01,
    Hl = 0b10,
    /// Stack pointer, or PSW for PUSH/POP.
    Sp = 0b11,
}

const REGISTERS: &[(&str, Register)] = &[
    ("B", Register::B),
    ("C", Register::C),
    ("D", Register::D),
    ("E", Register::E),
    ("H", Register::H),
    ("L", Register::L),
    ("M", Register::M),
    ("A", Register::A),
];

const CONDITIONS: &[(&str, Condition)] = &[
    ("NZ", Condition::Nz),
    ("Z", Condition::Z),
    ("NC", Condition::Nc),
    ("C", Condition::C),
    ("PO", Condition::Po),
    ("PE", Condition::Pe),
    ("P", Condition::P),
    ("M", Condition::M),
];

const REG_PAIRS: &[(&str, RegPair)] = &[
    ("BC", RegPair::Bc),
    ("DE", RegPair::De),
    ("HL", RegPair::Hl),
    ("SP", RegPair::Sp),
    ("PSW", RegPair::Sp),
    ("B", RegPair::Bc),
    ("D", RegPair::De),
    ("H", RegPair::Hl),
];

fn find<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, v)| v)
}

impl Register {
    pub fn from_name(name: &str) -> Option<Self> {
        find(REGISTERS, name)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Condition {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn all() -> impl Iterator<Item = (&'static str, Condition)> {
        CONDITIONS.iter().copied()
    }
}

impl RegPair {
    pub fn from_name(name: &str) -> Option<Self> {
        find(REG_PAIRS, name)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_codes_follow_encoding_order() {
        let names = ["B", "C", "D", "E", "H", "L", "M", "A"];
        for (i, n) in names.iter().enumerate() {
            assert_eq!(Register::from_name(n).unwrap().code(), i as u8);
        }
        assert_eq!(Register::from_name("a"), Some(Register::A));
        assert_eq!(Register::from_name("BC"), None);
        assert_eq!(Register::from_name(""), None);
    }

    #[test]
    fn psw_aliases_stack_pointer_pair() {
        assert_eq!(RegPair::from_name("PSW"), RegPair::from_name("SP"));
        assert_eq!(RegPair::from_name("psw").unwrap().code(), 0b11);
        assert_eq!(RegPair::from_name("B"), Some(RegPair::Bc));
        assert_eq!(RegPair::from_name("D"), Some(RegPair::De));
        assert_eq!(RegPair::from_name("H"), Some(RegPair::Hl));
        assert_eq!(RegPair::from_name("A"), None);
    }

    #[test]
    fn conditions_cover_all_eight_codes() {
        let mut codes: Vec<u8> = Condition::all().map(|(_, c)| c.code()).collect();
        codes.sort_unstable();
        assert_eq!(codes, (0..8).collect::<Vec<u8>>());
        let pe = Condition::all().find(|(n, _)| *n == "PE").map(|(_, c)| c);
        assert_eq!(pe, Some(Condition::Pe));
    }
}
